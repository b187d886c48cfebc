//! # crab-spooler
//!
//! Bridge to the host print spooler - discovery, default printer, job hand-off.
//!
//! ## Scope
//!
//! This crate handles:
//! - Printer enumeration with normalized status
//! - Virtual printer filtering (PDF writers, fax, OneNote, ...)
//! - Per-printer degradation when a driver misbehaves
//! - Default printer changes
//! - Handing files to the shell `print` / `printto` verb
//!
//! It does not spool, render, queue or retry anything; the OS does the
//! printing.
//!
//! ## Example
//!
//! ```ignore
//! use crab_spooler::{PlatformSpooler, PrintJob, PrinterDirectory};
//!
//! let directory = PrinterDirectory::new(PlatformSpooler::default());
//!
//! let result = directory.list();
//! for printer in &result.printers {
//!     println!("{} ready={}", printer.name, printer.is_ready);
//! }
//!
//! let job = PrintJob::new("invoice.pdf", "Office Laser").set_as_default_before_print(true);
//! directory.submit(&job)?;
//! ```

mod classifier;
mod directory;
mod error;
mod job;
mod model;
pub mod status;
mod system;
mod unsupported;

#[cfg(windows)]
mod win32;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

// Re-exports
pub use classifier::{DEFAULT_VIRTUAL_NAME_FRAGMENTS, VirtualPrinterFilter};
pub use directory::PrinterDirectory;
pub use error::{SpoolError, SpoolResult};
pub use job::{JobReceipt, PrintJob};
pub use model::{
    EnumerationResult, PrinterDetails, PrinterRecord, RawPrinter, UNKNOWN_STATUS, sort_printers,
};
pub use status::{PrinterAttributes, PrinterStatus, StatusFlag};
pub use system::{EnumerationScope, PrintVerb, PrinterHandle, PrinterSystem};
pub use unsupported::UnsupportedSpooler;

#[cfg(windows)]
pub use win32::{WindowsPrinterHandle, WindowsSpooler};

/// Spooler binding for the host platform
#[cfg(windows)]
pub type PlatformSpooler = WindowsSpooler;

/// Spooler binding for the host platform
#[cfg(not(windows))]
pub type PlatformSpooler = UnsupportedSpooler;
