use std::fmt;

use crate::listing::ListingRecord;

/// Why a pagination pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `page` returned zero cards; the directory has no more results.
    Exhausted { page: u32 },
    /// The next page would have exceeded the request's `max_page`.
    PageLimit,
    /// Cancelled externally before `next_page` was fetched.
    Cancelled { next_page: u32 },
    /// Navigation or card enumeration failed on `page`.
    PageFailed { page: u32, error: String },
}

/// Records accumulated by one run, in page-then-card order, plus how the run
/// ended. Records from pages before a failure are always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub records: Vec<ListingRecord>,
    pub pages_scraped: u32,
    pub stop: StopReason,
}

impl RunResult {
    /// A run is successful when it ran out of results or hit the page limit.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(
            self.stop,
            StopReason::Exhausted { .. } | StopReason::PageLimit
        )
    }
}

/// Operator-visible run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ready,
    Running,
    Complete,
    Error,
}

impl RunStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Ready => "Ready",
            RunStatus::Running => "Running",
            RunStatus::Complete => "Complete",
            RunStatus::Error => "Error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted { page } => write!(f, "no more results on page {page}"),
            StopReason::PageLimit => f.write_str("page limit reached"),
            StopReason::Cancelled { next_page } => {
                write!(f, "cancelled before page {next_page}")
            }
            StopReason::PageFailed { page, error } => write!(f, "page {page} failed: {error}"),
        }
    }
}
