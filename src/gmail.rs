//! Gmail REST implementation of [`MailService`]

use crate::auth::AuthorizedTransport;
use crate::error::{FetchError, Result};
use crate::service::MailService;
use crate::types::{Header, MessageId, MimeNode, RawMessage};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// The authenticated user, in Gmail's path syntax
const USER_ID: &str = "me";

/// Gmail refuses larger pages
const MAX_PAGE_SIZE: usize = 500;

/// Gmail API client over an [`AuthorizedTransport`]
#[derive(Debug, Clone)]
pub struct GmailService {
    transport: AuthorizedTransport,
    messages_url: Url,
}

impl GmailService {
    /// Build a client rooted at `api_base_url`, e.g. `https://gmail.googleapis.com`
    pub fn new(transport: AuthorizedTransport, api_base_url: &str) -> Result<Self> {
        let mut messages_url = Url::parse(api_base_url)
            .map_err(|e| FetchError::Setup(format!("invalid API base URL {api_base_url:?}: {e}")))?;

        messages_url
            .path_segments_mut()
            .map_err(|()| FetchError::Setup(format!("API base URL {api_base_url:?} cannot be a base")))?
            .pop_if_empty()
            .extend(["gmail", "v1", "users", USER_ID, "messages"]);

        if transport.token().is_expired() {
            warn!("Access token has expired, requests will likely be rejected");
        }

        Ok(Self {
            transport,
            messages_url,
        })
    }

    fn list_url(&self, page_size: usize, page_token: Option<&str>) -> Url {
        let mut url = self.messages_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("maxResults", &page_size.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        url
    }

    fn message_url(&self, id: &MessageId) -> Url {
        let mut url = self.messages_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url.query_pairs_mut().append_pair("format", "full");
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T> {
        let response = self.transport.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                context: context.to_string(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(format!("{context}: {e}")))
    }
}

#[async_trait]
impl MailService for GmailService {
    async fn list_message_ids(&self, max_results: u32) -> Result<Vec<MessageId>> {
        let wanted = usize::try_from(max_results).unwrap_or(usize::MAX);
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        while ids.len() < wanted {
            let page_size = (wanted - ids.len()).min(MAX_PAGE_SIZE);
            let url = self.list_url(page_size, page_token.as_deref());
            let page: ListMessagesResponse = self.get_json(url, "messages.list").await?;

            ids.extend(page.messages.into_iter().map(|m| MessageId(m.id)));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        ids.truncate(wanted);
        debug!("Listed {} message ids", ids.len());
        Ok(ids)
    }

    async fn get_message(&self, id: &MessageId) -> Result<RawMessage> {
        let message: GmailMessage = self.get_json(self.message_url(id), "messages.get").await?;
        Ok(message.into())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMessagesResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

/// A `users.messages` resource in `full` format
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailMessage {
    id: Option<String>,
    #[serde(default)]
    snippet: String,
    payload: Option<GmailPart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailPart {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    headers: Vec<GmailHeader>,
    body: Option<GmailBody>,
    #[serde(default)]
    parts: Vec<GmailPart>,
}

#[derive(Debug, Deserialize)]
struct GmailHeader {
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct GmailBody {
    data: Option<String>,
}

impl From<GmailPart> for MimeNode {
    fn from(part: GmailPart) -> Self {
        Self {
            mime_type: part.mime_type,
            data: part.body.and_then(|b| b.data),
            parts: part.parts.into_iter().map(Self::from).collect(),
        }
    }
}

impl From<GmailMessage> for RawMessage {
    fn from(message: GmailMessage) -> Self {
        let mut payload = message.payload.unwrap_or_default();
        let headers = std::mem::take(&mut payload.headers)
            .into_iter()
            .map(|h| Header::new(h.name, h.value))
            .collect();

        Self {
            id: message.id.map(MessageId),
            snippet: message.snippet,
            headers,
            payload: payload.into(),
        }
    }
}
