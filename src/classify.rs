//! Rule-based billing and subscription classification

use regex::Regex;
use serde::{Deserialize, Serialize};

static SERVICE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"@([\w-]+)\.").unwrap());

/// Service name used when the sender has no recognizable domain
pub const UNKNOWN_SERVICE: &str = "unknown";

const SERVICE_WEIGHT: f32 = 0.3;
const PRICE_WEIGHT: f32 = 0.3;
const STATUS_WEIGHT: f32 = 0.4;

/// What a billing message is about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    PaymentFailed,
    RenewalNotice,
    TrialEnding,
    Receipt,
    #[default]
    Unknown,
}

/// Outcome of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub service: String,
    pub status: BillingStatus,

    /// 0.0 to 1.0, the sum of the weights of the signals found
    pub confidence: f32,
}

/// First domain label after the `@` of the sender, lowercased
///
/// `"Netflix <info@mailer.netflix.com>"` gives `"mailer"`.
#[must_use]
pub fn extract_service(sender: &str) -> String {
    let lower = sender.to_lowercase();
    SERVICE_REGEX
        .captures(&lower)
        .map_or_else(|| UNKNOWN_SERVICE.to_string(), |cap| cap[1].to_string())
}

/// Keyword-based status, checked in priority order
#[must_use]
pub fn detect_status(text: &str) -> BillingStatus {
    let text = text.to_lowercase();

    if text.contains("payment failed") || text.contains("couldn't collect") {
        BillingStatus::PaymentFailed
    } else if text.contains("renew") {
        BillingStatus::RenewalNotice
    } else if text.contains("trial") {
        BillingStatus::TrialEnding
    } else if text.contains("receipt") || text.contains("invoice") {
        BillingStatus::Receipt
    } else {
        BillingStatus::Unknown
    }
}

/// Confidence from the three independent signals
#[must_use]
pub fn confidence(service: &str, has_price: bool, status: BillingStatus) -> f32 {
    let mut score = 0.0;
    if service != UNKNOWN_SERVICE {
        score += SERVICE_WEIGHT;
    }
    if has_price {
        score += PRICE_WEIGHT;
    }
    if status != BillingStatus::Unknown {
        score += STATUS_WEIGHT;
    }
    score
}

/// Classify a message from its sender, subject and snippet
///
/// Status keywords are looked up in the subject and snippet only; the body
/// is not consulted.
#[must_use]
pub fn classify(sender: &str, subject: &str, snippet: &str, has_price: bool) -> Classification {
    let service = extract_service(sender);
    let status = detect_status(&format!("{subject} {snippet}"));
    let confidence = confidence(&service, has_price, status);

    Classification {
        service,
        status,
        confidence,
    }
}
