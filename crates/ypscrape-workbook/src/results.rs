//! The results sheet, rewritten in full on every run.

use std::path::Path;

use ypscrape_core::{ListingRecord, ResultSink};

use crate::error::WorkbookError;
use crate::sheet::write_replacing;
use crate::Workbook;

pub(crate) fn write_results(path: &Path, records: &[ListingRecord]) -> Result<(), WorkbookError> {
    let csv_error = |source: csv::Error| WorkbookError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Headers are written explicitly so an empty run still leaves a header row.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(ListingRecord::COLUMNS)
        .map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    let bytes = writer.into_inner().map_err(|e| WorkbookError::Io {
        path: path.to_path_buf(),
        source: e.into_error(),
    })?;
    write_replacing(path, &bytes)
}

/// Reads back the results sheet.
///
/// # Errors
///
/// Returns [`WorkbookError::Csv`] if the sheet cannot be read or a row does
/// not match the listing columns.
pub fn read_results(path: &Path) -> Result<Vec<ListingRecord>, WorkbookError> {
    let csv_error = |source: csv::Error| WorkbookError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize()
        .collect::<Result<Vec<ListingRecord>, _>>()
        .map_err(csv_error)
}

impl ResultSink for Workbook {
    type Error = WorkbookError;

    fn replace_results(&mut self, records: &[ListingRecord]) -> Result<(), Self::Error> {
        let path = self.results_path();
        write_results(&path, records)?;
        tracing::info!(rows = records.len(), path = %path.display(), "results sheet replaced");
        Ok(())
    }
}
