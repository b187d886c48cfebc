//! Command dispatch
//!
//! Maps a command line onto the directory service and renders the result as a
//! single JSON document plus a process exit code.

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::response::BridgeResponse;
use clap::Parser;
use clap::error::ErrorKind;
use crab_spooler::{
    EnumerationScope, PrintJob, PrinterDirectory, PrinterSystem, VirtualPrinterFilter,
};
use std::ffi::OsString;
use tracing::{info, instrument, warn};

/// What to write to stdout and how to exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: u8,
}

impl Outcome {
    fn respond(response: BridgeResponse, exit_code: u8) -> Self {
        Self {
            output: response.to_json(),
            exit_code,
        }
    }
}

/// Build the directory service with configuration applied
pub fn build_directory<S: PrinterSystem>(system: S, config: &Config) -> PrinterDirectory<S> {
    let filter =
        VirtualPrinterFilter::default().with_fragments(config.extra_virtual_printers.iter());
    let scope = EnumerationScope::default().with_network(config.include_network);

    PrinterDirectory::new(system)
        .with_filter(filter)
        .with_scope(scope)
}

/// Run one invocation.
///
/// Unknown commands answer with an error body but exit 0; callers have to
/// read `success` rather than the exit code.
#[instrument(skip_all)]
pub fn run<S, I, T>(args: I, directory: &PrinterDirectory<S>, config: &Config) -> Outcome
where
    S: PrinterSystem,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            let command = args.get(1).map(|arg| arg.to_string_lossy());
            return usage_error(e, command.as_deref());
        }
    };

    let Some(command) = cli.command else {
        warn!("No command provided");
        return Outcome::respond(BridgeResponse::error("No command provided"), 1);
    };

    info!(?command, "Dispatching command");
    let response = match command {
        Commands::GetPrinters { .. } => BridgeResponse::from(directory.list()),
        Commands::SetDefault { printer_name, .. } => directory.set_default(&printer_name).into(),
        Commands::Print {
            file_path,
            printer_name,
            keep_default,
            ..
        } => {
            let job = PrintJob::new(file_path, printer_name)
                .set_as_default_before_print(config.set_default_before_print && !keep_default);
            directory.submit(&job).into()
        }
    };

    if let Some(error) = &response.error {
        warn!(error = %error, "Command failed");
    }
    Outcome::respond(response, 0)
}

fn usage_error(err: clap::Error, command: Option<&str>) -> Outcome {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Outcome {
            output: err.render().to_string(),
            exit_code: 0,
        },
        ErrorKind::MissingRequiredArgument => {
            let message = match command {
                Some("set_default") => "No printer name provided",
                Some("print") => "Missing file path or printer name",
                _ => "Missing argument",
            };
            warn!(?command, "{}", message);
            Outcome::respond(BridgeResponse::error(message), 1)
        }
        kind => {
            warn!(?command, ?kind, "Invalid command");
            Outcome::respond(BridgeResponse::error("Invalid command"), 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crab_spooler::PrinterDetails;
    use crab_spooler::memory::MemorySpooler;
    use serde_json::Value;

    fn spooler() -> MemorySpooler {
        MemorySpooler::new()
            .with_printer("Office Laser", PrinterDetails::default())
            .with_printer("Photo Booth DNP", PrinterDetails::default())
            .with_printer("Snagit 2024", PrinterDetails::default())
            .with_printer("Microsoft Print to PDF", PrinterDetails::default())
            .with_default("Office Laser")
    }

    fn invoke(args: &[&str], directory: &PrinterDirectory<MemorySpooler>, config: &Config) -> (Value, u8) {
        let mut argv = vec!["print-bridge"];
        argv.extend_from_slice(args);
        let outcome = run(argv, directory, config);
        let json = serde_json::from_str(&outcome.output).expect("stdout is one JSON document");
        (json, outcome.exit_code)
    }

    #[test]
    fn test_get_printers() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(&["get_printers"], &directory, &config);

        assert_eq!(code, 0);
        assert_eq!(json["success"], true);
        assert!(json["timestamp"].is_i64());
        let names: Vec<_> = json["printers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Office Laser", "Photo Booth DNP", "Snagit 2024"]);
    }

    #[test]
    fn test_configured_virtual_printers_hidden() {
        let config = Config {
            extra_virtual_printers: vec!["snagit".to_string()],
            ..Config::default()
        };
        let directory = build_directory(spooler(), &config);
        let (json, _) = invoke(&["get_printers"], &directory, &config);

        assert_eq!(json["printers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_get_printers_failure() {
        let config = Config::default();
        let directory = build_directory(spooler().failing_enumeration("spooler stopped"), &config);
        let (json, code) = invoke(&["get_printers"], &directory, &config);

        assert_eq!(code, 0);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "EnumPrinters failed: spooler stopped");
        assert!(json.get("printers").is_none());
    }

    #[test]
    fn test_set_default() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(&["set_default", "Photo Booth DNP"], &directory, &config);

        assert_eq!(code, 0);
        assert_eq!(json, serde_json::json!({ "success": true }));

        let (json, _) = invoke(&["get_printers"], &directory, &config);
        assert_eq!(json["printers"][0]["name"], "Photo Booth DNP");
        assert_eq!(json["printers"][0]["isDefault"], true);
    }

    #[test]
    fn test_set_default_unknown() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(&["set_default", "Ghost"], &directory, &config);

        assert_eq!(code, 0);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("printer name is invalid"));
    }

    #[test]
    fn test_print_sets_default_by_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("strip.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(
            &["print", file.to_str().unwrap(), "Photo Booth DNP"],
            &directory,
            &config,
        );

        assert_eq!(code, 0);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Print job sent to Photo Booth DNP");
        assert_eq!(
            directory.system().default_printer().unwrap().as_deref(),
            Some("Photo Booth DNP")
        );
    }

    #[test]
    fn test_print_keep_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("strip.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, _) = invoke(
            &["print", file.to_str().unwrap(), "Photo Booth DNP", "--keep-default"],
            &directory,
            &config,
        );

        assert_eq!(json["success"], true);
        assert_eq!(
            directory.system().default_printer().unwrap().as_deref(),
            Some("Office Laser")
        );
    }

    #[test]
    fn test_print_missing_file() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(&["print", "nope.pdf", "Office Laser"], &directory, &config);

        assert_eq!(code, 0);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "File not found: nope.pdf");
        assert!(directory.system().dispatched().is_empty());
    }

    #[test]
    fn test_no_command() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(&[], &directory, &config);

        assert_eq!(code, 1);
        assert_eq!(json["error"], "No command provided");
    }

    #[test]
    fn test_missing_arguments() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);

        let (json, code) = invoke(&["set_default"], &directory, &config);
        assert_eq!(code, 1);
        assert_eq!(json["error"], "No printer name provided");

        let (json, code) = invoke(&["print", "file.pdf"], &directory, &config);
        assert_eq!(code, 1);
        assert_eq!(json["error"], "Missing file path or printer name");
    }

    #[test]
    fn test_invalid_command_exits_zero() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let (json, code) = invoke(&["reboot_printer"], &directory, &config);

        assert_eq!(code, 0);
        assert_eq!(json, serde_json::json!({ "success": false, "error": "Invalid command" }));
    }

    #[test]
    fn test_leading_dash_printer_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        std::fs::write(&file, b"%PDF-1.4").unwrap();

        let config = Config::default();
        let directory = build_directory(spooler().with_printer("-Label", PrinterDetails::default()), &config);

        let (json, code) = invoke(&["set_default", "-Label"], &directory, &config);
        assert_eq!(code, 0);
        assert_eq!(json, serde_json::json!({ "success": true }));

        let (json, code) = invoke(&["print", file.to_str().unwrap(), "-Label"], &directory, &config);
        assert_eq!(code, 0);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Print job sent to -Label");
    }

    #[test]
    fn test_surplus_arguments_ignored() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);

        let (json, code) = invoke(&["get_printers", "extra"], &directory, &config);
        assert_eq!(code, 0);
        assert_eq!(json["success"], true);

        let (json, _) = invoke(&["set_default", "Photo Booth DNP", "extra"], &directory, &config);
        assert_eq!(json, serde_json::json!({ "success": true }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_still_answers_json() {
        use std::os::unix::ffi::OsStrExt;

        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let path = std::ffi::OsStr::from_bytes(b"photo\xff.jpg").to_os_string();
        let args = vec![
            OsString::from("print-bridge"),
            OsString::from("print"),
            path,
            OsString::from("Office Laser"),
        ];

        let outcome = run(args, &directory, &config);
        let json: Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("File not found: photo"));
        assert!(directory.system().dispatched().is_empty());
    }

    #[test]
    fn test_help_is_plain_text() {
        let config = Config::default();
        let directory = build_directory(spooler(), &config);
        let outcome = run(["print-bridge", "--help"], &directory, &config);

        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.output.contains("get_printers"));
    }
}
