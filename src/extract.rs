//! Turn a retrieved message into a [`MessageRecord`]

use crate::body::resolve_body;
use crate::classify::classify;
use crate::price::extract_price;
use crate::report::MessageRecord;
use crate::types::RawMessage;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Extract the structured fields of one message
///
/// Pure and synchronous: missing headers become empty strings, an
/// unresolvable body becomes empty text, and a missing price is `None`.
/// The price found anywhere in the message counts toward the
/// classification confidence.
#[must_use]
pub fn extract_record(message: &RawMessage) -> MessageRecord {
    let sender = header_or_empty(message, "from");
    let subject = header_or_empty(message, "subject");
    let date = header_or_empty(message, "date");
    let sent_at = parse_date(&date);
    let body_text = resolve_body(&message.payload);

    let haystack = format!("{subject} {} {body_text}", message.snippet);
    let price = extract_price(&haystack);
    let class = classify(&sender, &subject, &message.snippet, price.is_some());

    debug!(
        "Extracted message {:?} from {sender}, price {:?}, status {:?} ({:.1})",
        subject,
        price.as_ref().map(ToString::to_string),
        class.status,
        class.confidence
    );

    MessageRecord {
        sender,
        subject,
        date,
        snippet: message.snippet.clone(),
        body_text,
        price,
        sent_at,
        service: class.service,
        status: class.status,
        confidence: class.confidence,
    }
}

fn header_or_empty(message: &RawMessage, name: &str) -> String {
    message.header(name).unwrap_or_default().to_string()
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    // Providers sometimes append a comment such as "(UTC)"
    let trimmed = raw.split(" (").next().unwrap_or(raw).trim();
    DateTime::parse_from_rfc2822(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
