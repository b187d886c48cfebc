//! Spooler abstraction
//!
//! Everything the directory needs from the OS print subsystem goes through
//! [`PrinterSystem`], so the directory logic can run against the real spooler
//! or an in-memory fake.

use crate::error::SpoolResult;
use crate::model::{PrinterDetails, RawPrinter};
use std::path::Path;

/// Which registry sources an enumeration covers.
///
/// Local and connected printers are always included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnumerationScope {
    pub include_network: bool,
}

impl EnumerationScope {
    pub fn with_network(mut self, include_network: bool) -> Self {
        self.include_network = include_network;
        self
    }
}

/// Shell verb used to hand a document to the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintVerb {
    /// `print`: the document's handler prints to the default printer
    Print,
    /// `printto`: the document's handler prints to the named printer
    PrintTo(String),
}

impl PrintVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::PrintTo(_) => "printto",
        }
    }

    /// Parameters passed alongside the verb
    pub fn parameters(&self) -> Option<String> {
        match self {
            Self::Print => None,
            Self::PrintTo(printer) => Some(format!("\"{}\"", printer)),
        }
    }
}

/// Open handle to one printer.
///
/// Implementations release the OS handle on `Drop`, so a handle never
/// outlives the scope that opened it.
pub trait PrinterHandle {
    fn details(&self) -> SpoolResult<PrinterDetails>;
}

/// OS print subsystem
pub trait PrinterSystem {
    type Handle: PrinterHandle;

    /// List registry entries (no per-printer detail)
    fn enumerate(&self, scope: EnumerationScope) -> SpoolResult<Vec<RawPrinter>>;

    /// Current default printer name, `None` if no default is set
    fn default_printer(&self) -> SpoolResult<Option<String>>;

    fn set_default_printer(&self, name: &str) -> SpoolResult<()>;

    fn open_printer(&self, name: &str) -> SpoolResult<Self::Handle>;

    /// Hand a document to the shell print verb
    fn shell_print(&self, file: &Path, verb: &PrintVerb) -> SpoolResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_names() {
        assert_eq!(PrintVerb::Print.as_str(), "print");
        assert_eq!(PrintVerb::PrintTo("HP".into()).as_str(), "printto");
    }

    #[test]
    fn test_printto_quotes_printer_name() {
        let verb = PrintVerb::PrintTo("Office Laser 2".into());
        assert_eq!(verb.parameters().as_deref(), Some("\"Office Laser 2\""));
        assert_eq!(PrintVerb::Print.parameters(), None);
    }

    #[test]
    fn test_default_scope_excludes_network() {
        assert!(!EnumerationScope::default().include_network);
        assert!(EnumerationScope::default().with_network(true).include_network);
    }
}
