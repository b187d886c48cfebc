//! JSON response envelope
//!
//! Every invocation writes exactly one of these to stdout.

use crab_spooler::{EnumerationResult, JobReceipt, PrinterRecord, SpoolError};
use serde::Serialize;

/// Envelope shared by every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printers: Option<Vec<PrinterRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unix epoch milliseconds, only on enumeration responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl BridgeResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            printers: None,
            message: None,
            error: None,
            timestamp: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn to_json(&self) -> String {
        // Only strings, numbers and bools: serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"Failed to serialize response"}"#.to_string()
        })
    }
}

impl From<EnumerationResult> for BridgeResponse {
    fn from(result: EnumerationResult) -> Self {
        if result.success {
            Self {
                printers: Some(result.printers),
                timestamp: Some(result.timestamp),
                ..Self::ok()
            }
        } else {
            Self {
                timestamp: Some(result.timestamp),
                ..Self::error(result.error.unwrap_or_else(|| "Unknown error".to_string()))
            }
        }
    }
}

impl From<JobReceipt> for BridgeResponse {
    fn from(receipt: JobReceipt) -> Self {
        Self {
            message: Some(receipt.message),
            ..Self::ok()
        }
    }
}

impl From<SpoolError> for BridgeResponse {
    fn from(err: SpoolError) -> Self {
        Self::error(err.to_string())
    }
}

impl<T: Into<BridgeResponse>> From<Result<T, SpoolError>> for BridgeResponse {
    fn from(result: Result<T, SpoolError>) -> Self {
        match result {
            Ok(value) => value.into(),
            Err(e) => e.into(),
        }
    }
}

impl From<()> for BridgeResponse {
    fn from(_: ()) -> Self {
        Self::ok()
    }
}
