//! One operator-triggered run: consume the trigger, validate input, drive the
//! browser across result pages, persist what was collected, and leave a
//! status the operator can poll.
//!
//! Failures are absorbed at the narrowest scope: a bad card yields empty
//! fields, a bad page ends the run but keeps earlier pages, and only invalid
//! input prevents any output.

use std::future::Future;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use ypscrape_core::{
    AppConfig, RequestError, RequestSource, ResultSink, RunResult, RunStatus, StatusReporter,
    Trigger,
};
use ypscrape_scraper::{BrowsingSession, PaginationDriver, ScraperError, WebDriverSession};
use ypscrape_workbook::{StatusArtifact, Workbook};

/// How a run attempt ended, short of an unexpected error.
#[derive(Debug)]
pub(crate) enum RunOutcome {
    /// The `Run` flag was not set.
    NotTriggered,
    /// The flag was set but the search input was rejected; nothing scraped.
    InvalidInput(RequestError),
    /// Pagination ran; the result may be partial.
    Finished(RunResult),
}

/// Drives one run against `queue`, opening a browsing session only once the
/// request is known to be valid.
///
/// # Errors
///
/// Returns an error if the queue cannot be read or written, or the browsing
/// session cannot be opened. Page-level scrape failures are not errors; they
/// surface as a partial [`RunOutcome::Finished`].
pub(crate) async fn execute_run<Q, F, Fut, S>(
    queue: &mut Q,
    open_session: F,
    base_url: &str,
    cancel: CancellationToken,
) -> anyhow::Result<RunOutcome>
where
    Q: RequestSource + ResultSink + StatusReporter,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<S, ScraperError>>,
    S: BrowsingSession,
{
    let request = match queue.take_request().context("failed to read search request")? {
        Trigger::Idle => return Ok(RunOutcome::NotTriggered),
        Trigger::Armed(Err(e)) => {
            queue.report(RunStatus::Error)?;
            return Ok(RunOutcome::InvalidInput(e));
        }
        Trigger::Armed(Ok(request)) => request,
    };

    tracing::info!(
        search_terms = request.search_terms(),
        geo_location_terms = request.geo_location_terms(),
        start_page = request.start_page(),
        max_page = request.max_page(),
        pages = request.page_span(),
        "starting run"
    );
    queue.report(RunStatus::Running)?;

    let session = open_session()
        .await
        .context("failed to open browsing session")?;

    let result = PaginationDriver::new(session, base_url)
        .with_cancellation(cancel)
        .run(&request)
        .await;

    queue
        .replace_results(&result.records)
        .context("failed to write results")?;

    let status = if result.is_success() {
        RunStatus::Complete
    } else {
        RunStatus::Error
    };
    queue.report(status)?;

    Ok(RunOutcome::Finished(result))
}

/// The `status.txt` contents for an outcome. `None` when nothing ran.
pub(crate) fn status_artifact(outcome: &anyhow::Result<RunOutcome>) -> Option<StatusArtifact> {
    match outcome {
        Ok(RunOutcome::NotTriggered) => None,
        Ok(RunOutcome::InvalidInput(e)) => Some(StatusArtifact::Error {
            message: format!("invalid search input: {e}"),
            detail: Vec::new(),
        }),
        Ok(RunOutcome::Finished(result)) if result.is_success() => Some(StatusArtifact::Complete),
        Ok(RunOutcome::Finished(result)) => Some(StatusArtifact::Error {
            message: result.stop.to_string(),
            detail: vec![format!(
                "{} records from {} pages were saved",
                result.records.len(),
                result.pages_scraped
            )],
        }),
        Err(e) => Some(StatusArtifact::Error {
            message: format!("unexpected error: {e}"),
            detail: e
                .chain()
                .skip(1)
                .map(|cause| format!("caused by: {cause}"))
                .collect(),
        }),
    }
}

/// Runs once against the configured workbook and WebDriver server.
///
/// # Errors
///
/// Returns the unexpected error (after recording it in the workbook) when the
/// run could not be carried out.
pub(crate) async fn run_once(config: &AppConfig, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut workbook = Workbook::open(&config.workbook_dir);
    workbook
        .ensure_created()
        .context("failed to set up workbook")?;

    let outcome = execute_run(
        &mut workbook,
        || WebDriverSession::connect(&config.webdriver_url, config.headless),
        &config.base_url,
        cancel,
    )
    .await;

    if let Err(e) = &outcome {
        tracing::error!(error = %format!("{e:#}"), "run failed");
        if let Err(report_err) = workbook.report(RunStatus::Error) {
            tracing::error!(error = %report_err, "failed to mark run as errored");
        }
    }

    if let Some(artifact) = status_artifact(&outcome) {
        if let Err(e) = workbook.write_status_file(&artifact) {
            tracing::error!(error = %e, "failed to write status file");
        }
    }

    match outcome? {
        RunOutcome::NotTriggered => {}
        RunOutcome::InvalidInput(e) => tracing::warn!(error = %e, "run skipped"),
        RunOutcome::Finished(result) => tracing::info!(
            records = result.records.len(),
            pages = result.pages_scraped,
            stop = %result.stop,
            "run finished"
        ),
    }
    Ok(())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
