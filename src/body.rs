//! Best-effort body text resolution over a MIME tree

use crate::html::strip_html;
use crate::types::MimeNode;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const TEXT_PLAIN: &str = "text/plain";
const TEXT_HTML: &str = "text/html";

/// URL-safe base64 that accepts payloads with or without trailing padding
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Resolve the most readable text representation of a message
///
/// The whole tree is searched for a non-empty `text/plain` part first; only
/// if none exists is it searched again for `text/html`, whose content is
/// passed through [`strip_html`]. A message with neither yields an empty
/// string.
#[must_use]
pub fn resolve_body(root: &MimeNode) -> String {
    if let Some(plain) = find_part(root, TEXT_PLAIN) {
        return plain;
    }

    find_part(root, TEXT_HTML).map_or_else(String::new, |html| strip_html(&html))
}

/// Pre-order search for the first part of `mime_type` with a decodable,
/// non-empty payload
fn find_part(node: &MimeNode, mime_type: &str) -> Option<String> {
    if node.is_type(mime_type)
        && let Some(text) = node.data.as_deref().and_then(decode_payload)
    {
        return Some(text);
    }

    node.parts.iter().find_map(|part| find_part(part, mime_type))
}

/// Decode a part payload; malformed or empty payloads count as absent
fn decode_payload(data: &str) -> Option<String> {
    if data.is_empty() {
        return None;
    }

    let bytes = URL_SAFE_LENIENT.decode(data).ok()?;
    if bytes.is_empty() {
        return None;
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}
