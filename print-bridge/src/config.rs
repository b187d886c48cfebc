//! print-bridge configuration, read from environment variables

use std::path::PathBuf;

/// Log file directory name under the system temp dir
const DEFAULT_LOG_SUBDIR: &str = "print-bridge";

/// Bridge settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
    /// Diagnostic log directory
    pub log_dir: PathBuf,
    /// Mirror diagnostics to stderr (stdout is reserved for JSON)
    pub log_to_stderr: bool,
    /// Include network printers in enumeration
    pub include_network: bool,
    /// Extra virtual printer name fragments
    pub extra_virtual_printers: Vec<String>,
    /// Whether `print` makes its printer the default first
    pub set_default_before_print: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_SUBDIR),
            log_to_stderr: false,
            include_network: false,
            extra_virtual_printers: Vec::new(),
            set_default_before_print: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            log_level: var("PRINT_BRIDGE_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: var("PRINT_BRIDGE_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_to_stderr: var("PRINT_BRIDGE_LOG_STDERR")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.log_to_stderr),
            include_network: var("PRINT_BRIDGE_INCLUDE_NETWORK")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.include_network),
            extra_virtual_printers: var("PRINT_BRIDGE_VIRTUAL_PRINTERS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            set_default_before_print: var("PRINT_BRIDGE_SET_DEFAULT_BEFORE_PRINT")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.set_default_before_print),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
