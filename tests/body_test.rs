use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use inbox_extract::*;

fn encoded(mime_type: &str, text: &str) -> MimeNode {
    MimeNode::leaf(mime_type, URL_SAFE.encode(text))
}

#[test]
fn test_single_plain_part() {
    let root = encoded("text/plain", "Hello there");
    assert_eq!(resolve_body(&root), "Hello there");
}

#[test]
fn test_plain_preferred_over_html_sibling() {
    let root = MimeNode::multipart(
        "multipart/alternative",
        vec![
            encoded("text/html", "<p>HTML version</p>"),
            encoded("text/plain", "Plain version"),
        ],
    );
    assert_eq!(resolve_body(&root), "Plain version");
}

#[test]
fn test_plain_nested_under_html_wins() {
    let mut html = encoded("text/html", "<b>Shallow HTML</b>");
    html.parts.push(encoded("text/plain", "Deep plain"));
    let root = MimeNode::multipart("multipart/mixed", vec![html]);

    assert_eq!(resolve_body(&root), "Deep plain");
}

#[test]
fn test_plain_deeper_than_html_still_wins() {
    let root = MimeNode::multipart(
        "multipart/mixed",
        vec![
            encoded("text/html", "<i>top level html</i>"),
            MimeNode::multipart(
                "multipart/related",
                vec![MimeNode::multipart(
                    "multipart/alternative",
                    vec![encoded("text/plain", "buried plain")],
                )],
            ),
        ],
    );
    assert_eq!(resolve_body(&root), "buried plain");
}

#[test]
fn test_html_only_is_stripped() {
    let root = encoded("text/html", "<b>Hello</b>&nbsp;World");
    assert_eq!(resolve_body(&root), "Hello World");
}

#[test]
fn test_first_plain_in_preorder() {
    let root = MimeNode::multipart(
        "multipart/mixed",
        vec![
            MimeNode::multipart("multipart/alternative", vec![encoded("text/plain", "first")]),
            encoded("text/plain", "second"),
        ],
    );
    assert_eq!(resolve_body(&root), "first");
}

#[test]
fn test_malformed_plain_falls_through() {
    let root = MimeNode::multipart(
        "multipart/alternative",
        vec![
            MimeNode::leaf("text/plain", "%%% not base64 %%%"),
            encoded("text/plain", "good part"),
        ],
    );
    assert_eq!(resolve_body(&root), "good part");
}

#[test]
fn test_malformed_plain_falls_back_to_html() {
    let root = MimeNode::multipart(
        "multipart/alternative",
        vec![
            MimeNode::leaf("text/plain", "%%%"),
            encoded("text/html", "<p>fallback</p>"),
        ],
    );
    assert_eq!(resolve_body(&root), "fallback");
}

#[test]
fn test_empty_plain_is_skipped() {
    let root = MimeNode::multipart(
        "multipart/alternative",
        vec![MimeNode::leaf("text/plain", ""), encoded("text/html", "<p>html</p>")],
    );
    assert_eq!(resolve_body(&root), "html");
}

#[test]
fn test_unpadded_payload() {
    let root = MimeNode::leaf("text/plain", URL_SAFE_NO_PAD.encode("no padding!"));
    assert_eq!(resolve_body(&root), "no padding!");
}

#[test]
fn test_utf8_payload() {
    let root = encoded("text/plain", "ราคา 500 บาท");
    assert_eq!(resolve_body(&root), "ราคา 500 บาท");
}

#[test]
fn test_nothing_found_is_empty() {
    assert_eq!(resolve_body(&MimeNode::default()), "");

    let root = MimeNode::multipart(
        "multipart/mixed",
        vec![encoded("application/pdf", "%PDF-1.4"), encoded("image/png", "png")],
    );
    assert_eq!(resolve_body(&root), "");
}

#[test]
fn test_content_type_case_insensitive() {
    let root = encoded("Text/Plain", "mixed case");
    assert_eq!(resolve_body(&root), "mixed case");
}
