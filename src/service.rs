//! The seam between the fetcher and a concrete mail provider

use crate::error::Result;
use crate::types::{MessageId, RawMessage};
use async_trait::async_trait;
use std::sync::Arc;

/// Listing and retrieval capabilities of a mail provider
///
/// Implementations must be shareable across tasks; the fetcher calls
/// `get_message` concurrently.
#[async_trait]
pub trait MailService: Send + Sync {
    /// Ids of the newest messages, at most `max_results` of them
    async fn list_message_ids(&self, max_results: u32) -> Result<Vec<MessageId>>;

    /// Headers, snippet and MIME tree of one message
    async fn get_message(&self, id: &MessageId) -> Result<RawMessage>;
}

#[async_trait]
impl<S: MailService + ?Sized> MailService for Arc<S> {
    async fn list_message_ids(&self, max_results: u32) -> Result<Vec<MessageId>> {
        (**self).list_message_ids(max_results).await
    }

    async fn get_message(&self, id: &MessageId) -> Result<RawMessage> {
        (**self).get_message(id).await
    }
}
