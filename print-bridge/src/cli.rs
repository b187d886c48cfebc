use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// print-bridge - expose the OS print spooler to a calling process.
///
/// Every command writes exactly one JSON object to stdout.
#[derive(Parser, Debug)]
#[command(name = "print-bridge", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Printer names and paths are taken verbatim, even when they start with '-'.
// Surplus positionals are accepted and ignored.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List physical printers with normalized status
    #[command(name = "get_printers")]
    GetPrinters {
        #[arg(hide = true)]
        ignored: Vec<OsString>,
    },

    /// Make a printer the OS default
    #[command(name = "set_default")]
    SetDefault {
        /// Printer name as reported by get_printers
        #[arg(allow_hyphen_values = true)]
        printer_name: String,

        #[arg(hide = true)]
        ignored: Vec<OsString>,
    },

    /// Hand a file to the OS print verb
    #[command(name = "print")]
    Print {
        #[arg(allow_hyphen_values = true)]
        file_path: PathBuf,

        #[arg(allow_hyphen_values = true)]
        printer_name: String,

        #[arg(hide = true)]
        ignored: Vec<OsString>,

        /// Do not make the printer the default before printing
        #[arg(long)]
        keep_default: bool,
    },
}
