//! Per-message records and the aggregate fetch report

use crate::classify::{BillingStatus, UNKNOWN_SERVICE};
use crate::error::PersistError;
use crate::price::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Structured fields extracted from one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// `From` header, verbatim
    #[serde(rename = "from")]
    pub sender: String,

    pub subject: String,

    /// `Date` header, verbatim
    pub date: String,

    pub snippet: String,

    /// Resolved plain text body, possibly empty
    #[serde(rename = "detail")]
    pub body_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    /// `date` parsed as RFC 2822, when it parses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,

    /// Sender's service name, `unknown` when the sender has no domain
    #[serde(default = "unknown_service")]
    pub service: String,

    #[serde(default)]
    pub status: BillingStatus,

    #[serde(default)]
    pub confidence: f32,
}

fn unknown_service() -> String {
    UNKNOWN_SERVICE.to_string()
}

/// Outcome of one inbox fetch
///
/// `messages` is in completion order, not listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchReport {
    /// Number of message ids the listing returned
    pub total_found: usize,

    pub fetched_count: usize,

    /// Messages that failed, including any abandoned on cancellation
    pub errors_count: usize,

    pub messages: Vec<MessageRecord>,

    /// Whether the caller cancelled before every message finished
    #[serde(default)]
    pub cancelled: bool,
}

impl FetchReport {
    /// Whether every listed message produced a record
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.errors_count == 0 && !self.cancelled
    }

    /// Messages that carry a price
    pub fn priced(&self) -> impl Iterator<Item = &MessageRecord> {
        self.messages.iter().filter(|m| m.price.is_some())
    }
}

/// Write the report's messages to `path` as pretty-printed JSON
///
/// Missing parent directories are created.
pub fn save_messages(report: &FetchReport, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let io_err = |source| PersistError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(&report.messages)?;
    fs::write(path, json).map_err(io_err)?;

    tracing::debug!(
        "Saved {} messages to {}",
        report.messages.len(),
        path.display()
    );
    Ok(())
}
