//! Collaborators a run consumes: where requests come from, where results go,
//! and where status is reported.

use crate::listing::ListingRecord;
use crate::request::{RequestError, SearchRequest};
use crate::run::RunStatus;

/// Outcome of polling a [`RequestSource`].
#[derive(Debug)]
pub enum Trigger {
    /// The run flag was not armed; nothing to do.
    Idle,
    /// The flag was armed and has already been disarmed; fields parsed.
    Armed(Result<SearchRequest, RequestError>),
}

/// Supplies the operator's search request.
///
/// Implementations must disarm the run trigger before returning
/// [`Trigger::Armed`], so a crash mid-run cannot re-trigger it.
pub trait RequestSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Consume the run trigger, if armed.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the backing store cannot be read or written.
    /// Invalid field values are reported inside [`Trigger::Armed`] instead.
    fn take_request(&mut self) -> Result<Trigger, Self::Error>;
}

/// Persists run output by wholesale replacement of previously stored rows.
pub trait ResultSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns `Self::Error` when the rows cannot be written.
    fn replace_results(&mut self, records: &[ListingRecord]) -> Result<(), Self::Error>;
}

/// Receives status transitions at run start, success and failure.
pub trait StatusReporter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns `Self::Error` when the status cannot be recorded.
    fn report(&mut self, status: RunStatus) -> Result<(), Self::Error>;
}
