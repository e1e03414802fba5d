//! Core types handed to the fetcher by the mail service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque provider-assigned message identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single message header as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One part of a message's MIME tree
///
/// `data` holds the part body still encoded with the URL-safe base64
/// alphabet, exactly as the provider ships it. Multipart containers usually
/// carry no data of their own and only children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeNode {
    /// Content type label, e.g. `text/plain`
    pub mime_type: String,

    /// Encoded body payload
    pub data: Option<String>,

    /// Child parts, in provider order
    pub parts: Vec<MimeNode>,
}

impl MimeNode {
    /// Leaf part with an encoded payload
    pub fn leaf(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: Some(data.into()),
            parts: Vec::new(),
        }
    }

    /// Container part with children and no payload
    pub fn multipart(mime_type: impl Into<String>, parts: Vec<Self>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: None,
            parts,
        }
    }

    /// Whether this node carries the given content type
    #[must_use]
    pub fn is_type(&self, mime_type: &str) -> bool {
        self.mime_type.eq_ignore_ascii_case(mime_type)
    }
}

/// A message as retrieved from the provider, before extraction
#[derive(Debug, Clone, Default)]
pub struct RawMessage {
    pub id: Option<MessageId>,

    /// Provider-supplied short preview
    pub snippet: String,

    /// Top-level headers, in provider order
    pub headers: Vec<Header>,

    /// Root of the MIME tree
    pub payload: MimeNode,
}

impl RawMessage {
    /// First header value whose name matches case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}
