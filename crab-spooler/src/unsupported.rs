//! Fallback binding for platforms without a supported spooler

use crate::error::{SpoolError, SpoolResult};
use crate::model::{PrinterDetails, RawPrinter};
use crate::system::{EnumerationScope, PrintVerb, PrinterHandle, PrinterSystem};
use std::path::Path;

/// Spooler that rejects every call with [`SpoolError::Unsupported`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedSpooler;

impl UnsupportedSpooler {
    pub fn new() -> Self {
        Self
    }
}

/// Never constructed; exists to satisfy [`PrinterSystem::Handle`]
#[derive(Debug)]
pub struct UnsupportedHandle;

impl PrinterHandle for UnsupportedHandle {
    fn details(&self) -> SpoolResult<PrinterDetails> {
        Err(SpoolError::Unsupported)
    }
}

impl PrinterSystem for UnsupportedSpooler {
    type Handle = UnsupportedHandle;

    fn enumerate(&self, _scope: EnumerationScope) -> SpoolResult<Vec<RawPrinter>> {
        tracing::warn!("Printer enumeration requested on unsupported platform");
        Err(SpoolError::Unsupported)
    }

    fn default_printer(&self) -> SpoolResult<Option<String>> {
        Err(SpoolError::Unsupported)
    }

    fn set_default_printer(&self, _name: &str) -> SpoolResult<()> {
        Err(SpoolError::Unsupported)
    }

    fn open_printer(&self, _name: &str) -> SpoolResult<UnsupportedHandle> {
        Err(SpoolError::Unsupported)
    }

    fn shell_print(&self, _file: &Path, _verb: &PrintVerb) -> SpoolResult<()> {
        Err(SpoolError::Unsupported)
    }
}
