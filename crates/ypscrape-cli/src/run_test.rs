use std::cell::Cell;
use std::io;

use ypscrape_core::{ListingRecord, SearchRequest, StopReason};
use ypscrape_scraper::canned::{CannedElement, CannedPage, CannedSession};
use ypscrape_scraper::extract::selectors;

use super::*;

const BASE: &str = "https://directory.test";

/// In-memory queue recording every status and result write.
#[derive(Default)]
struct MemoryQueue {
    trigger: Option<Trigger>,
    statuses: Vec<RunStatus>,
    results: Option<Vec<ListingRecord>>,
    fail_results: bool,
}

impl MemoryQueue {
    fn armed(request: Result<SearchRequest, RequestError>) -> Self {
        Self {
            trigger: Some(Trigger::Armed(request)),
            ..Self::default()
        }
    }
}

impl RequestSource for MemoryQueue {
    type Error = io::Error;

    fn take_request(&mut self) -> Result<Trigger, Self::Error> {
        Ok(self.trigger.take().unwrap_or(Trigger::Idle))
    }
}

impl ResultSink for MemoryQueue {
    type Error = io::Error;

    fn replace_results(&mut self, records: &[ListingRecord]) -> Result<(), Self::Error> {
        if self.fail_results {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "sheet is locked"));
        }
        self.results = Some(records.to_vec());
        Ok(())
    }
}

impl StatusReporter for MemoryQueue {
    type Error = io::Error;

    fn report(&mut self, status: RunStatus) -> Result<(), Self::Error> {
        self.statuses.push(status);
        Ok(())
    }
}

fn request(start: u32, max: u32) -> SearchRequest {
    SearchRequest::new("plumbers", "Boston", start, max).unwrap()
}

fn page_of(names: &[&str]) -> CannedPage {
    CannedPage::Cards(
        names
            .iter()
            .map(|n| {
                CannedElement::default()
                    .with_child(selectors::BUSINESS_NAME, CannedElement::new(*n))
            })
            .collect(),
    )
}

/// Session factory that hands over a pre-built canned session.
fn serve(
    session: CannedSession,
) -> impl FnOnce() -> std::future::Ready<Result<CannedSession, ScraperError>> {
    move || std::future::ready(Ok(session))
}

fn names(records: &[ListingRecord]) -> Vec<&str> {
    records.iter().map(|r| r.business_name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// execute_run
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn idle_trigger_does_nothing() {
    let mut queue = MemoryQueue::default();
    let opened = Cell::new(false);
    let opened_ref = &opened;

    let outcome = execute_run(
        &mut queue,
        move || async move {
            opened_ref.set(true);
            Ok::<_, ScraperError>(CannedSession::new(Vec::<CannedPage>::new()))
        },
        BASE,
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, RunOutcome::NotTriggered));
    assert!(!opened.get());
    assert!(queue.statuses.is_empty());
    assert!(queue.results.is_none());
}

#[tokio::test(start_paused = true)]
async fn invalid_input_reports_error_without_opening_a_session() {
    let mut queue = MemoryQueue::armed(Err(RequestError::MissingSearchTerms));
    let opened = Cell::new(false);
    let opened_ref = &opened;

    let outcome = execute_run(
        &mut queue,
        move || async move {
            opened_ref.set(true);
            Ok::<_, ScraperError>(CannedSession::new(Vec::<CannedPage>::new()))
        },
        BASE,
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(matches!(
        outcome,
        RunOutcome::InvalidInput(RequestError::MissingSearchTerms)
    ));
    assert!(!opened.get());
    assert_eq!(queue.statuses, vec![RunStatus::Error]);
    assert!(queue.results.is_none());
}

#[tokio::test(start_paused = true)]
async fn successful_run_persists_records_and_completes() {
    let mut queue = MemoryQueue::armed(Ok(request(1, 2)));
    let session = CannedSession::new([page_of(&["a", "b"]), page_of(&["c"])]);
    let log = session.log();

    let outcome = execute_run(&mut queue, serve(session), BASE, CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Finished(ref r) if r.stop == StopReason::PageLimit));
    assert_eq!(queue.statuses, vec![RunStatus::Running, RunStatus::Complete]);
    assert_eq!(names(queue.results.as_deref().unwrap()), vec!["a", "b", "c"]);
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_run_is_complete() {
    let mut queue = MemoryQueue::armed(Ok(request(1, 5)));
    let session = CannedSession::new([page_of(&["a"]), CannedPage::Cards(Vec::new())]);

    execute_run(&mut queue, serve(session), BASE, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(queue.statuses, vec![RunStatus::Running, RunStatus::Complete]);
    assert_eq!(names(queue.results.as_deref().unwrap()), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn page_failure_persists_partial_results_and_reports_error() {
    let mut queue = MemoryQueue::armed(Ok(request(1, 5)));
    let session = CannedSession::new([
        page_of(&["a"]),
        CannedPage::NavigationFails("timeout".to_owned()),
    ]);
    let log = session.log();

    let outcome = execute_run(&mut queue, serve(session), BASE, CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        RunOutcome::Finished(ref r) if matches!(r.stop, StopReason::PageFailed { page: 2, .. })
    ));
    assert_eq!(queue.statuses, vec![RunStatus::Running, RunStatus::Error]);
    assert_eq!(names(queue.results.as_deref().unwrap()), vec!["a"]);
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn session_open_failure_is_an_error_after_running() {
    let mut queue = MemoryQueue::armed(Ok(request(1, 1)));

    let result = execute_run(
        &mut queue,
        || async {
            Err::<CannedSession, _>(ScraperError::Session {
                reason: "connection refused".to_owned(),
            })
        },
        BASE,
        CancellationToken::new(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("connection refused"), "{err:#}");
    assert_eq!(queue.statuses, vec![RunStatus::Running]);
    assert!(queue.results.is_none());
}

#[tokio::test(start_paused = true)]
async fn result_write_failure_is_an_error_and_session_still_closed() {
    let mut queue = MemoryQueue::armed(Ok(request(1, 1)));
    queue.fail_results = true;
    let session = CannedSession::new([page_of(&["a"])]);
    let log = session.log();

    let result = execute_run(&mut queue, serve(session), BASE, CancellationToken::new()).await;

    assert!(result.is_err());
    assert_eq!(log.close_count(), 1);
    assert_eq!(queue.statuses, vec![RunStatus::Running]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_run_keeps_nothing_new_and_reports_error() {
    let mut queue = MemoryQueue::armed(Ok(request(1, 3)));
    let session = CannedSession::new([page_of(&["a"])]);
    let log = session.log();
    let cancel = CancellationToken::new();
    cancel.cancel();

    execute_run(&mut queue, serve(session), BASE, cancel)
        .await
        .unwrap();

    assert!(log.navigations().is_empty());
    assert_eq!(queue.statuses, vec![RunStatus::Running, RunStatus::Error]);
    assert_eq!(queue.results.as_deref(), Some(&[][..]));
}

// ---------------------------------------------------------------------------
// status_artifact
// ---------------------------------------------------------------------------

fn finished(stop: StopReason, records: usize, pages: u32) -> anyhow::Result<RunOutcome> {
    Ok(RunOutcome::Finished(RunResult {
        records: vec![ListingRecord::default(); records],
        pages_scraped: pages,
        stop,
    }))
}

#[test]
fn no_artifact_when_not_triggered() {
    assert!(status_artifact(&Ok(RunOutcome::NotTriggered)).is_none());
}

#[test]
fn complete_artifact_for_successful_run() {
    assert_eq!(
        status_artifact(&finished(StopReason::PageLimit, 3, 1)),
        Some(StatusArtifact::Complete)
    );
}

#[test]
fn error_artifact_for_partial_run_names_the_page_and_saved_count() {
    let artifact = status_artifact(&finished(
        StopReason::PageFailed {
            page: 3,
            error: "timeout".to_owned(),
        },
        40,
        2,
    ))
    .unwrap();
    assert_eq!(
        artifact.render(),
        "Error: page 3 failed: timeout\n40 records from 2 pages were saved\n"
    );
}

#[test]
fn error_artifact_for_invalid_input() {
    let artifact = status_artifact(&Ok(RunOutcome::InvalidInput(
        RequestError::MissingGeoLocation,
    )))
    .unwrap();
    assert_eq!(
        artifact.render(),
        "Error: invalid search input: geo location terms are missing\n"
    );
}

#[test]
fn error_artifact_for_unexpected_error_lists_causes() {
    let err = anyhow::anyhow!("connection refused").context("failed to open browsing session");
    let artifact = status_artifact(&Err(err)).unwrap();
    assert_eq!(
        artifact.render(),
        "Error: unexpected error: failed to open browsing session\ncaused by: connection refused\n"
    );
}
