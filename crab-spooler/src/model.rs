//! Printer records and enumeration results

use crate::status::{PrinterAttributes, PrinterStatus, StatusFlag};
use serde::Serialize;

/// Status code reported when details could not be resolved
pub const UNKNOWN_STATUS: i64 = -1;

/// Entry returned by the spooler's cheap enumeration call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawPrinter {
    pub name: String,
    /// Port the queue prints to (empty if the spooler did not report one)
    pub port_name: String,
    pub attributes: PrinterAttributes,
}

impl RawPrinter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port_name = port.into();
        self
    }

    pub fn with_attributes(mut self, attributes: u32) -> Self {
        self.attributes = PrinterAttributes(attributes);
        self
    }
}

/// Details read through an open printer handle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrinterDetails {
    pub status: PrinterStatus,
    pub attributes: PrinterAttributes,
    pub location: String,
    pub server_name: String,
    pub port_name: String,
    pub driver_name: String,
    pub comment: String,
    pub jobs: u32,
}

/// Normalized printer entry handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterRecord {
    pub name: String,
    pub is_default: bool,
    /// Raw status bitmask, or [`UNKNOWN_STATUS`] for degraded records
    pub status: i64,
    pub is_ready: bool,
    pub is_network: bool,
    pub location: String,
    pub server_name: String,
    pub port_name: String,
    pub driver_name: String,
    pub comment: String,
    pub jobs: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status_flags: Vec<StatusFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PrinterRecord {
    /// Build a record from a successful detail lookup.
    ///
    /// `raw` carries the attributes seen during enumeration; the network
    /// bit counts if either source reports it.
    pub fn resolved(raw: &RawPrinter, is_default: bool, details: PrinterDetails) -> Self {
        let is_network = details.attributes.is_network() || raw.attributes.is_network();
        let port_name = if details.port_name.is_empty() {
            raw.port_name.clone()
        } else {
            details.port_name
        };

        Self {
            name: raw.name.clone(),
            is_default,
            status: i64::from(details.status.bits()),
            is_ready: details.status.is_ready(),
            is_network,
            location: details.location,
            server_name: details.server_name,
            port_name,
            driver_name: details.driver_name,
            comment: details.comment,
            jobs: details.jobs,
            status_flags: details.status.flags(),
            error: None,
        }
    }

    /// Build a record for a printer whose details could not be read
    pub fn degraded(name: &str, is_default: bool, error: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            is_default,
            status: UNKNOWN_STATUS,
            is_ready: false,
            is_network: false,
            location: String::new(),
            server_name: String::new(),
            port_name: String::new(),
            driver_name: String::new(),
            comment: String::new(),
            jobs: 0,
            status_flags: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of one printer enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationResult {
    pub success: bool,
    pub printers: Vec<PrinterRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Capture time in Unix epoch milliseconds
    pub timestamp: i64,
}

impl EnumerationResult {
    pub fn success(printers: Vec<PrinterRecord>) -> Self {
        Self {
            success: true,
            printers,
            error: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            printers: Vec::new(),
            error: Some(error.into()),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// The record flagged as the OS default, if any survived filtering
    pub fn default_printer(&self) -> Option<&PrinterRecord> {
        self.printers.iter().find(|p| p.is_default)
    }

    pub fn find(&self, name: &str) -> Option<&PrinterRecord> {
        self.printers.iter().find(|p| p.name == name)
    }
}

/// Order records default-first, then by case-insensitive name.
///
/// Exact name breaks ties so the ordering is total.
pub fn sort_printers(printers: &mut [PrinterRecord]) {
    printers.sort_by(|a, b| {
        b.is_default
            .cmp(&a.is_default)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}
