//! In-memory spooler for tests
//!
//! Behaves like a small print server: printers can be healthy, fail their
//! detail query, or refuse to open. Handle bookkeeping lets tests assert that
//! every opened handle was released.

use crate::error::{SpoolError, SpoolResult};
use crate::model::{PrinterDetails, RawPrinter};
use crate::system::{EnumerationScope, PrintVerb, PrinterHandle, PrinterSystem};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Message the real spooler returns for an unknown printer name
const INVALID_PRINTER_NAME: &str = "The printer name is invalid. (os error 1801)";

#[derive(Debug, Clone)]
enum Behavior {
    Healthy(PrinterDetails),
    QueryFails(String),
    OpenFails(String),
}

#[derive(Debug, Clone)]
struct MemoryPrinter {
    raw: RawPrinter,
    behavior: Behavior,
    network_only: bool,
}

#[derive(Debug, Default)]
struct State {
    printers: Vec<MemoryPrinter>,
    default: Option<String>,
    enumeration_error: Option<String>,
    dispatch_error: Option<String>,
    open_handles: usize,
    handles_opened: usize,
    dispatched: Vec<(PathBuf, PrintVerb)>,
}

/// Single-threaded fake of the OS print subsystem
#[derive(Debug, Clone, Default)]
pub struct MemorySpooler {
    state: Rc<RefCell<State>>,
}

impl MemorySpooler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, raw: RawPrinter, behavior: Behavior, network_only: bool) -> Self {
        self.state.borrow_mut().printers.push(MemoryPrinter {
            raw,
            behavior,
            network_only,
        });
        self
    }

    /// Add a printer whose details resolve successfully
    pub fn with_printer(self, name: &str, details: PrinterDetails) -> Self {
        let raw = RawPrinter::new(name)
            .with_port(details.port_name.clone())
            .with_attributes(details.attributes.bits());
        self.push(raw, Behavior::Healthy(details), false)
    }

    /// Add an entry exactly as the registry would report it
    pub fn with_raw_printer(self, raw: RawPrinter, details: PrinterDetails) -> Self {
        self.push(raw, Behavior::Healthy(details), false)
    }

    /// Add a printer that only shows up when network printers are requested
    pub fn with_network_printer(self, name: &str, details: PrinterDetails) -> Self {
        self.push(RawPrinter::new(name), Behavior::Healthy(details), true)
    }

    /// Add a printer that opens but fails its detail query
    pub fn with_broken_printer(self, name: &str, message: &str) -> Self {
        self.push(
            RawPrinter::new(name),
            Behavior::QueryFails(message.to_string()),
            false,
        )
    }

    /// Add a printer whose handle cannot be opened
    pub fn with_unopenable_printer(self, name: &str, message: &str) -> Self {
        self.push(
            RawPrinter::new(name),
            Behavior::OpenFails(message.to_string()),
            false,
        )
    }

    pub fn with_default(self, name: &str) -> Self {
        self.state.borrow_mut().default = Some(name.to_string());
        self
    }

    /// Make the registry query itself fail
    pub fn failing_enumeration(self, message: &str) -> Self {
        self.state.borrow_mut().enumeration_error = Some(message.to_string());
        self
    }

    /// Make the shell print dispatch fail
    pub fn failing_dispatch(self, message: &str) -> Self {
        self.state.borrow_mut().dispatch_error = Some(message.to_string());
        self
    }

    /// Handles currently open
    pub fn open_handles(&self) -> usize {
        self.state.borrow().open_handles
    }

    /// Handles successfully opened over the spooler's lifetime
    pub fn handles_opened(&self) -> usize {
        self.state.borrow().handles_opened
    }

    /// Documents handed to the shell, in order
    pub fn dispatched(&self) -> Vec<(PathBuf, PrintVerb)> {
        self.state.borrow().dispatched.clone()
    }
}

/// Handle into a [`MemorySpooler`]; decrements the open count on drop
#[derive(Debug)]
pub struct MemoryHandle {
    state: Rc<RefCell<State>>,
    behavior: Behavior,
}

impl PrinterHandle for MemoryHandle {
    fn details(&self) -> SpoolResult<PrinterDetails> {
        match &self.behavior {
            Behavior::Healthy(details) => Ok(details.clone()),
            Behavior::QueryFails(message) | Behavior::OpenFails(message) => {
                Err(SpoolError::spooler("GetPrinter", message))
            }
        }
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.open_handles = state.open_handles.saturating_sub(1);
    }
}

impl PrinterSystem for MemorySpooler {
    type Handle = MemoryHandle;

    fn enumerate(&self, scope: EnumerationScope) -> SpoolResult<Vec<RawPrinter>> {
        let state = self.state.borrow();
        if let Some(message) = &state.enumeration_error {
            return Err(SpoolError::spooler("EnumPrinters", message));
        }
        Ok(state
            .printers
            .iter()
            .filter(|p| scope.include_network || !p.network_only)
            .map(|p| p.raw.clone())
            .collect())
    }

    fn default_printer(&self) -> SpoolResult<Option<String>> {
        Ok(self.state.borrow().default.clone())
    }

    fn set_default_printer(&self, name: &str) -> SpoolResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.printers.iter().any(|p| p.raw.name == name) {
            return Err(SpoolError::spooler("SetDefaultPrinter", INVALID_PRINTER_NAME));
        }
        state.default = Some(name.to_string());
        Ok(())
    }

    fn open_printer(&self, name: &str) -> SpoolResult<MemoryHandle> {
        let mut state = self.state.borrow_mut();
        let behavior = state
            .printers
            .iter()
            .find(|p| p.raw.name == name)
            .map(|p| p.behavior.clone())
            .ok_or_else(|| SpoolError::spooler("OpenPrinter", INVALID_PRINTER_NAME))?;

        if let Behavior::OpenFails(message) = &behavior {
            return Err(SpoolError::spooler("OpenPrinter", message));
        }

        state.open_handles += 1;
        state.handles_opened += 1;
        Ok(MemoryHandle {
            state: Rc::clone(&self.state),
            behavior,
        })
    }

    fn shell_print(&self, file: &Path, verb: &PrintVerb) -> SpoolResult<()> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = &state.dispatch_error {
            return Err(SpoolError::spooler("ShellExecute", message));
        }
        state.dispatched.push((file.to_path_buf(), verb.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_printers_follow_scope() {
        let spooler = MemorySpooler::new()
            .with_printer("Local", PrinterDetails::default())
            .with_network_printer("Remote", PrinterDetails::default());

        let local = spooler.enumerate(EnumerationScope::default()).unwrap();
        assert_eq!(local.len(), 1);

        let all = spooler
            .enumerate(EnumerationScope::default().with_network(true))
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_handle_drop_releases() {
        let spooler = MemorySpooler::new().with_printer("Local", PrinterDetails::default());
        {
            let _handle = spooler.open_printer("Local").unwrap();
            assert_eq!(spooler.open_handles(), 1);
        }
        assert_eq!(spooler.open_handles(), 0);
        assert_eq!(spooler.handles_opened(), 1);
    }

    #[test]
    fn test_open_unknown_printer() {
        let spooler = MemorySpooler::new();
        assert!(spooler.open_printer("ghost").is_err());
        assert_eq!(spooler.handles_opened(), 0);
    }
}
