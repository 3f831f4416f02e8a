//! Spreadsheet-backed work queue.
//!
//! A workbook is a directory holding two CSV sheets the operator edits with
//! any spreadsheet program, plus a `status.txt` artifact:
//!
//! - `input_sheet.csv`: one data row with the search parameters and the
//!   `Run` cell the operator sets to `Run` to trigger a scrape.
//! - `results_sheet.csv`: the listings from the most recent run, replaced
//!   wholesale on every run.
//! - `status.txt`: `Complete`, or `Error: ...` with diagnostic detail.

pub mod error;
pub mod input;
pub mod results;
mod sheet;
pub mod status_file;

use std::path::{Path, PathBuf};

pub use error::WorkbookError;
pub use status_file::StatusArtifact;

pub const INPUT_SHEET: &str = "input_sheet.csv";
pub const RESULTS_SHEET: &str = "results_sheet.csv";
pub const STATUS_FILE: &str = "status.txt";

#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    #[must_use]
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(INPUT_SHEET)
    }

    #[must_use]
    pub fn results_path(&self) -> PathBuf {
        self.dir.join(RESULTS_SHEET)
    }

    #[must_use]
    pub fn status_path(&self) -> PathBuf {
        self.dir.join(STATUS_FILE)
    }

    /// Creates the workbook directory and any missing sheet with its headers.
    /// Existing sheets are left untouched.
    ///
    /// Returns `true` if anything was created.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbookError::Io`] if the directory or a sheet cannot be written.
    pub fn ensure_created(&self) -> Result<bool, WorkbookError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| WorkbookError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut created = false;
        let input = self.input_path();
        if !input.exists() {
            input::create_input_sheet(&input)?;
            tracing::info!(path = %input.display(), "created input sheet");
            created = true;
        }
        let results = self.results_path();
        if !results.exists() {
            results::write_results(&results, &[])?;
            tracing::info!(path = %results.display(), "created results sheet");
            created = true;
        }
        Ok(created)
    }

    /// Overwrites `status.txt` with `artifact`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbookError::Io`] if the file cannot be written.
    pub fn write_status_file(&self, artifact: &StatusArtifact) -> Result<(), WorkbookError> {
        let path = self.status_path();
        std::fs::write(&path, artifact.render()).map_err(|source| WorkbookError::Io { path, source })
    }
}
