//! Virtual printer detection
//!
//! Software-only queues (PDF writers, fax, OneNote, ...) are not useful print
//! targets for the caller and are hidden from enumeration. Detection is driven
//! by data: a list of case-insensitive name fragments plus a list of virtual
//! port names. Both lists can be extended from configuration.

use crate::model::RawPrinter;

/// Built-in name fragments that identify virtual printers
pub const DEFAULT_VIRTUAL_NAME_FRAGMENTS: &[&str] = &[
    "Microsoft Print to PDF",
    "Microsoft XPS Document Writer",
    "Fax",
    "OneNote",
    "Adobe PDF",
    "PDFCreator",
    "Virtual Printer",
    "CutePDF",
    "doPDF",
    "PDF24",
    "Foxit PDF",
    "Send To Kindle",
];

/// Ports that never lead to physical hardware (exact match)
const VIRTUAL_PORTS: &[&str] = &["file:", "portprompt:", "xpsport:", "nul:"];

/// Port families that never lead to physical hardware (prefix match)
const VIRTUAL_PORT_PREFIXES: &[&str] = &["onenote", "wfsport:"];

/// Case-insensitive denylist of virtual printers
#[derive(Debug, Clone)]
pub struct VirtualPrinterFilter {
    /// Lowercased name fragments, in insertion order
    fragments: Vec<String>,
}

impl Default for VirtualPrinterFilter {
    fn default() -> Self {
        Self::from_fragments(DEFAULT_VIRTUAL_NAME_FRAGMENTS.iter().copied())
    }
}

impl VirtualPrinterFilter {
    /// Filter with exactly the given fragments (no built-ins)
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self {
            fragments: Vec::new(),
        };
        filter.extend(fragments);
        filter
    }

    /// Add fragments to the denylist.
    ///
    /// Blank fragments and duplicates are ignored.
    pub fn extend<I, S>(&mut self, fragments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for fragment in fragments {
            let fragment = fragment.as_ref().trim().to_lowercase();
            if !fragment.is_empty() && !self.fragments.contains(&fragment) {
                self.fragments.push(fragment);
            }
        }
    }

    /// Builder-style [`extend`](Self::extend)
    pub fn with_fragments<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(fragments);
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Check a printer name against the denylist.
    ///
    /// Blank names are never virtual so that a naming anomaly cannot hide a
    /// real device.
    pub fn is_virtual_name(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let lower = name.to_lowercase();
        self.fragments.iter().any(|f| lower.contains(f.as_str()))
    }

    /// Check if a port is a virtual printer port
    pub fn is_virtual_port(port: &str) -> bool {
        let p = port.trim().to_lowercase();
        VIRTUAL_PORTS.contains(&p.as_str())
            || VIRTUAL_PORT_PREFIXES.iter().any(|prefix| p.starts_with(prefix))
    }

    /// Whether an enumerated entry should be hidden
    pub fn is_virtual(&self, printer: &RawPrinter) -> bool {
        self.is_virtual_name(&printer.name) || Self::is_virtual_port(&printer.port_name)
    }
}
