//! Print job submission
//!
//! Jobs are not rendered here: the file is handed to the OS shell `print` /
//! `printto` verb and the registered document handler does the printing.

use crate::directory::PrinterDirectory;
use crate::error::{SpoolError, SpoolResult};
use crate::system::{PrintVerb, PrinterSystem};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// A file to print and where to print it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub file: PathBuf,
    pub printer: String,
    /// Make `printer` the OS default before dispatching.
    ///
    /// Some document handlers ignore `printto` and always use the default
    /// printer. Setting this changes the default permanently, not just for
    /// this job.
    pub set_as_default_before_print: bool,
}

impl PrintJob {
    pub fn new(file: impl Into<PathBuf>, printer: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            printer: printer.into(),
            set_as_default_before_print: false,
        }
    }

    pub fn set_as_default_before_print(mut self, enabled: bool) -> Self {
        self.set_as_default_before_print = enabled;
        self
    }

    /// Verb used for dispatch.
    ///
    /// `print` targets the default printer, so it is used when the job made
    /// its printer the default or named no printer at all.
    pub fn verb(&self) -> PrintVerb {
        if self.printer.is_empty() || self.set_as_default_before_print {
            PrintVerb::Print
        } else {
            PrintVerb::PrintTo(self.printer.clone())
        }
    }
}

/// Confirmation that a job reached the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReceipt {
    pub printer: String,
    pub verb: &'static str,
    pub message: String,
}

impl<S: PrinterSystem> PrinterDirectory<S> {
    /// Submit a file for printing.
    ///
    /// A missing file fails before any OS call. The printer is not checked
    /// against the enumerated list; unknown names are left to the OS.
    #[instrument(skip(self, job), fields(file = %job.file.display(), printer = %job.printer))]
    pub fn submit(&self, job: &PrintJob) -> SpoolResult<JobReceipt> {
        if !job.file.exists() {
            warn!("Print file does not exist");
            return Err(SpoolError::FileNotFound(job.file.clone()));
        }
        let file = resolve_path(&job.file)?;

        if job.set_as_default_before_print && !job.printer.is_empty() {
            self.set_default(&job.printer)?;
        }

        let verb = job.verb();
        self.system().shell_print(&file, &verb)?;

        info!(verb = verb.as_str(), "Print job dispatched");
        let target = if job.printer.is_empty() {
            "default printer"
        } else {
            job.printer.as_str()
        };
        Ok(JobReceipt {
            printer: job.printer.clone(),
            verb: verb.as_str(),
            message: format!("Print job sent to {}", target),
        })
    }
}

/// Absolute form of `path`; the shell resolves relative paths against its own
/// working directory.
fn resolve_path(path: &Path) -> SpoolResult<PathBuf> {
    Ok(std::path::absolute(path)?)
}
