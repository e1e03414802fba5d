use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use inbox_extract::*;

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 1e-6
}

// --- extract_service ---

#[test]
fn test_service_from_display_name_address() {
    assert_eq!(extract_service("Spotify <no-reply@spotify.com>"), "spotify");
}

#[test]
fn test_service_takes_first_domain_label() {
    assert_eq!(
        extract_service("Google <no-reply@accounts.google.com>"),
        "accounts"
    );
}

#[test]
fn test_service_is_lowercased() {
    assert_eq!(extract_service("BILLING@Adobe.COM"), "adobe");
}

#[test]
fn test_service_allows_hyphens() {
    assert_eq!(extract_service("x@my-gym.co.th"), "my-gym");
}

#[test]
fn test_service_unknown_without_domain() {
    assert_eq!(extract_service("Mailer Daemon"), UNKNOWN_SERVICE);
    assert_eq!(extract_service("user@localhost"), UNKNOWN_SERVICE);
    assert_eq!(extract_service(""), UNKNOWN_SERVICE);
}

// --- detect_status ---

#[test]
fn test_status_payment_failed() {
    assert_eq!(detect_status("Payment failed for your plan"), BillingStatus::PaymentFailed);
    assert_eq!(
        detect_status("We couldn't collect your payment"),
        BillingStatus::PaymentFailed
    );
}

#[test]
fn test_status_renewal_notice() {
    assert_eq!(detect_status("Your plan will RENEW soon"), BillingStatus::RenewalNotice);
    assert_eq!(detect_status("Auto-renewal reminder"), BillingStatus::RenewalNotice);
}

#[test]
fn test_status_trial_ending() {
    assert_eq!(detect_status("Your free trial ends in 3 days"), BillingStatus::TrialEnding);
}

#[test]
fn test_status_receipt() {
    assert_eq!(detect_status("Your receipt from Apple"), BillingStatus::Receipt);
    assert_eq!(detect_status("Invoice #1234"), BillingStatus::Receipt);
}

#[test]
fn test_status_unknown() {
    assert_eq!(detect_status("Lunch on Friday?"), BillingStatus::Unknown);
    assert_eq!(detect_status(""), BillingStatus::Unknown);
}

#[test]
fn test_status_priority_order() {
    assert_eq!(
        detect_status("Payment failed: renew your trial, see invoice"),
        BillingStatus::PaymentFailed
    );
    assert_eq!(
        detect_status("Renew before your trial ends, invoice attached"),
        BillingStatus::RenewalNotice
    );
    assert_eq!(
        detect_status("Trial ending, receipt attached"),
        BillingStatus::TrialEnding
    );
}

#[test]
fn test_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&BillingStatus::PaymentFailed).unwrap(),
        "\"payment_failed\""
    );
    assert_eq!(
        serde_json::to_string(&BillingStatus::Unknown).unwrap(),
        "\"unknown\""
    );
}

// --- confidence ---

#[test]
fn test_confidence_no_signals() {
    assert!(close(confidence(UNKNOWN_SERVICE, false, BillingStatus::Unknown), 0.0));
}

#[test]
fn test_confidence_service_only() {
    assert!(close(confidence("netflix", false, BillingStatus::Unknown), 0.3));
}

#[test]
fn test_confidence_price_only() {
    assert!(close(confidence(UNKNOWN_SERVICE, true, BillingStatus::Unknown), 0.3));
}

#[test]
fn test_confidence_status_only() {
    assert!(close(confidence(UNKNOWN_SERVICE, false, BillingStatus::Receipt), 0.4));
}

#[test]
fn test_confidence_all_signals() {
    assert!(close(confidence("netflix", true, BillingStatus::RenewalNotice), 1.0));
}

// --- classify ---

#[test]
fn test_classify_subject_and_snippet() {
    let class = classify(
        "Google <no-reply@accounts.google.com>",
        "Subscription alert",
        "Your trial is ending",
        false,
    );

    assert_eq!(class.service, "accounts");
    assert_eq!(class.status, BillingStatus::TrialEnding);
    assert!(close(class.confidence, 0.7));
}

#[test]
fn test_classify_ignores_body_keywords() {
    let raw = RawMessage {
        headers: vec![Header::new("Subject", "Hello")],
        payload: MimeNode::leaf("text/plain", URL_SAFE.encode("your receipt is attached")),
        ..RawMessage::default()
    };
    let record = extract_record(&raw);

    assert_eq!(record.status, BillingStatus::Unknown);
    assert_eq!(record.service, UNKNOWN_SERVICE);
}

#[test]
fn test_record_carries_classification() {
    let raw = RawMessage {
        snippet: "Payment failed, we couldn't charge 349 บาท".into(),
        headers: vec![
            Header::new("From", "Netflix <info@netflix.com>"),
            Header::new("Subject", "Update your payment"),
        ],
        ..RawMessage::default()
    };
    let record = extract_record(&raw);

    assert_eq!(record.service, "netflix");
    assert_eq!(record.status, BillingStatus::PaymentFailed);
    assert_eq!(record.price.as_ref().unwrap().to_string(), "349 บาท");
    assert!(close(record.confidence, 1.0));
}
