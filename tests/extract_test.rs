use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use inbox_extract::*;

fn message(headers: &[(&str, &str)], snippet: &str, payload: MimeNode) -> RawMessage {
    RawMessage {
        id: Some(MessageId::new("m1")),
        snippet: snippet.to_string(),
        headers: headers.iter().map(|(n, v)| Header::new(*n, *v)).collect(),
        payload,
    }
}

#[test]
fn test_extract_full_record() {
    let raw = message(
        &[
            ("From", "Netflix <info@netflix.com>"),
            ("Subject", "Your membership renews soon"),
            ("Date", "Wed, 01 Jan 2025 12:00:00 +0000"),
        ],
        "Your plan renews on Jan 5",
        MimeNode::leaf("text/plain", URL_SAFE.encode("You will be charged 419 บาท.")),
    );

    let record = extract_record(&raw);

    assert_eq!(record.sender, "Netflix <info@netflix.com>");
    assert_eq!(record.subject, "Your membership renews soon");
    assert_eq!(record.date, "Wed, 01 Jan 2025 12:00:00 +0000");
    assert_eq!(record.snippet, "Your plan renews on Jan 5");
    assert_eq!(record.body_text, "You will be charged 419 บาท.");
    assert_eq!(record.price.unwrap().to_string(), "419 บาท");
    assert_eq!(
        record.sent_at.unwrap().to_rfc3339(),
        "2025-01-01T12:00:00+00:00"
    );
}

#[test]
fn test_price_from_subject() {
    let raw = message(
        &[("Subject", "Receipt for $12.99")],
        "Thanks for your order",
        MimeNode::default(),
    );
    assert_eq!(extract_record(&raw).price.unwrap().to_string(), "$12.99");
}

#[test]
fn test_subject_price_wins_over_body() {
    let raw = message(
        &[("Subject", "Pay $5")],
        "",
        MimeNode::leaf("text/plain", URL_SAFE.encode("or $10 later")),
    );
    assert_eq!(extract_record(&raw).price.unwrap().to_string(), "$5");
}

#[test]
fn test_missing_headers_are_empty() {
    let record = extract_record(&message(&[], "", MimeNode::default()));

    assert_eq!(record.sender, "");
    assert_eq!(record.subject, "");
    assert_eq!(record.date, "");
    assert_eq!(record.body_text, "");
    assert!(record.price.is_none());
    assert!(record.sent_at.is_none());
}

#[test]
fn test_header_names_case_insensitive() {
    let raw = message(
        &[("from", "a@example.com"), ("SUBJECT", "hi")],
        "",
        MimeNode::default(),
    );
    let record = extract_record(&raw);

    assert_eq!(record.sender, "a@example.com");
    assert_eq!(record.subject, "hi");
}

#[test]
fn test_first_header_wins() {
    let raw = message(
        &[("Subject", "first"), ("Subject", "second")],
        "",
        MimeNode::default(),
    );
    assert_eq!(extract_record(&raw).subject, "first");
}

#[test]
fn test_unparseable_date_kept_raw() {
    let raw = message(&[("Date", "sometime last week")], "", MimeNode::default());
    let record = extract_record(&raw);

    assert_eq!(record.date, "sometime last week");
    assert!(record.sent_at.is_none());
}
