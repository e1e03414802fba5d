//! Bounded-concurrency inbox fetching

use crate::auth::AuthorizedTransport;
use crate::config::FetchOptions;
use crate::error::{FetchError, Result};
use crate::extract::extract_record;
use crate::gmail::GmailService;
use crate::report::FetchReport;
use crate::service::MailService;
use crate::types::MessageId;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Fetch and extract the newest messages of the authenticated mailbox
///
/// Builds a [`GmailService`] over `transport` and hands it to
/// [`fetch_inbox_with`].
pub async fn fetch_inbox(
    transport: AuthorizedTransport,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<FetchReport> {
    let service = GmailService::new(transport, &options.api_base_url)?;
    fetch_inbox_with(service, options, cancel).await
}

/// List up to `options.max_results` messages and fetch them all
///
/// Only a failed listing (or cancellation before the listing returns) is an
/// error. Failures of individual messages are logged and counted in the
/// report.
pub async fn fetch_inbox_with<S>(
    service: S,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<FetchReport>
where
    S: MailService + 'static,
{
    let ids = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(FetchError::Cancelled),
        listed = service.list_message_ids(options.max_results) => {
            listed.map_err(|e| FetchError::Listing(Box::new(e)))?
        }
    };

    Ok(fetch_messages(Arc::new(service), ids, options.concurrency_limit, cancel).await)
}

/// Fetch and extract every message in `ids`, at most `concurrency_limit` at
/// a time
///
/// Returns once every unit has finished. Records are in completion order.
/// On cancellation no new unit starts, in-flight units are aborted, and
/// every unit without a record is counted as an error, so
/// `fetched_count + errors_count == total_found` holds either way.
pub async fn fetch_messages<S>(
    service: Arc<S>,
    ids: Vec<MessageId>,
    concurrency_limit: usize,
    cancel: &CancellationToken,
) -> FetchReport
where
    S: MailService + 'static,
{
    let total_found = ids.len();
    let semaphore = Arc::new(Semaphore::new(concurrency_limit.max(1)));
    let mut units = JoinSet::new();
    let mut started = 0;

    for id in ids {
        // A slot is taken before the unit is spawned and released when the
        // unit's future is dropped, whether it finished or was aborted.
        let permit = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let service = Arc::clone(&service);
        units.spawn(async move {
            let _permit = permit;
            let outcome = service.get_message(&id).await.map(|m| extract_record(&m));
            (id, outcome)
        });
        started += 1;
    }

    let mut report = FetchReport {
        total_found,
        errors_count: total_found - started,
        ..FetchReport::default()
    };
    let mut aborted = false;
    let mut cut_short = 0;

    loop {
        let joined = tokio::select! {
            biased;
            () = cancel.cancelled(), if !aborted => {
                units.abort_all();
                aborted = true;
                continue;
            }
            joined = units.join_next() => joined,
        };

        let Some(joined) = joined else { break };
        match joined {
            Ok((_, Ok(record))) => report.messages.push(record),
            Ok((id, Err(err))) => {
                warn!("Error fetching {id}: {err}");
                report.errors_count += 1;
            }
            Err(err) if err.is_cancelled() => {
                cut_short += 1;
                report.errors_count += 1;
            }
            Err(err) => {
                warn!("{}", FetchError::Task(err.to_string()));
                report.errors_count += 1;
            }
        }
    }

    report.fetched_count = report.messages.len();
    // A cancel that lands after every unit finished leaves the report whole
    report.cancelled = cut_short > 0 || started < total_found;

    info!(
        "Fetched {}/{} messages ({} errors{})",
        report.fetched_count,
        report.total_found,
        report.errors_count,
        if report.cancelled { ", cancelled" } else { "" }
    );

    report
}
