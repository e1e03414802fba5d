// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Inbox Extract
//!
//! Fetches a bounded batch of inbox messages over an OAuth2-authenticated
//! transport and extracts structured fields from each one.
//!
//! # Features
//!
//! - Bounded-concurrency retrieval with partial-failure tolerance
//! - Plain text body resolution over the MIME tree, with HTML fallback
//! - Heuristic price extraction (baht and dollar amounts)
//! - Rule-based billing status classification with a confidence score
//! - Cooperative cancellation that keeps completed records
//! - Pluggable [`MailService`] seam, with a Gmail REST implementation
//!
//! # Example
//!
//! ```rust,no_run
//! use inbox_extract::{AuthorizedTransport, FetchOptions, Token, fetch_inbox};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = AuthorizedTransport::new(Token::load("token.json")?)?;
//! let options = FetchOptions::default().with_max_results(20);
//! let report = fetch_inbox(transport, &options, &CancellationToken::new()).await?;
//!
//! println!("Fetched {}/{}", report.fetched_count, report.total_found);
//! for message in report.priced() {
//!     println!("{}: {:?}", message.subject, message.price);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod body;
mod classify;
mod config;
mod error;
mod extract;
mod fetcher;
mod gmail;
mod html;
mod price;
mod report;
mod service;
mod types;

pub use auth::{AuthorizedTransport, Token};
pub use body::resolve_body;
pub use classify::{
    BillingStatus, Classification, UNKNOWN_SERVICE, classify, confidence, detect_status,
    extract_service,
};
pub use config::*;
pub use error::{AuthError, FetchError, PersistError, Result};
pub use extract::extract_record;
pub use fetcher::{fetch_inbox, fetch_inbox_with, fetch_messages};
pub use gmail::GmailService;
pub use html::strip_html;
pub use price::{CurrencyPlacement, Price, extract_price};
pub use report::{FetchReport, MessageRecord, save_messages};
pub use service::MailService;
pub use types::*;
