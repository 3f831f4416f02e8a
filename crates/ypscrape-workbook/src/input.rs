//! The input sheet: search parameters plus the `Run` trigger/status cell.

use std::path::Path;

use csv::StringRecord;
use ypscrape_core::{
    RequestError, RequestSource, RunStatus, SearchRequest, StatusReporter, Trigger,
};

use crate::error::WorkbookError;
use crate::sheet::Sheet;
use crate::Workbook;

pub const SEARCH_TERMS: &str = "Search Terms";
pub const GEO_LOCATION_TERMS: &str = "Geo Location Terms";
pub const START_PAGE: &str = "Start Page";
pub const MAX_PAGES: &str = "Max Pages";
pub const RUN: &str = "Run";

/// Value the operator puts in the `Run` cell to request a scrape.
pub const RUN_TRIGGER: &str = "Run";

pub(crate) fn create_input_sheet(path: &Path) -> Result<(), WorkbookError> {
    let sheet = Sheet {
        headers: StringRecord::from(vec![
            SEARCH_TERMS,
            GEO_LOCATION_TERMS,
            START_PAGE,
            MAX_PAGES,
            RUN,
        ]),
        rows: vec![StringRecord::from(vec![
            "",
            "",
            "",
            "",
            RunStatus::Ready.as_str(),
        ])],
    };
    sheet.write(path)
}

/// Parses a page number as spreadsheets store it: `"3"` or `"3.0"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn parse_page(field: &'static str, raw: &str) -> Result<u32, RequestError> {
    let raw = raw.trim();
    let invalid = || RequestError::InvalidPage {
        field,
        value: raw.to_owned(),
    };

    if let Ok(n) = raw.parse::<u32>() {
        return Ok(n);
    }
    let value = raw.parse::<f64>().map_err(|_| invalid())?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        return Ok(value as u32);
    }
    Err(invalid())
}

/// Reads the four parameter cells. The outer error is a sheet layout
/// problem; the inner one is operator input that failed validation.
fn parse_request(
    sheet: &Sheet,
    path: &Path,
) -> Result<Result<SearchRequest, RequestError>, WorkbookError> {
    let terms = sheet.first_row_cell(sheet.column(path, SEARCH_TERMS)?);
    let geo = sheet.first_row_cell(sheet.column(path, GEO_LOCATION_TERMS)?);
    let start = sheet.first_row_cell(sheet.column(path, START_PAGE)?);
    let max = sheet.first_row_cell(sheet.column(path, MAX_PAGES)?);

    Ok(request_from_cells(terms, geo, start, max))
}

fn request_from_cells(
    terms: &str,
    geo: &str,
    start: &str,
    max: &str,
) -> Result<SearchRequest, RequestError> {
    let start_page = parse_page("start page", start)?;
    let max_page = parse_page("max pages", max)?;
    SearchRequest::new(terms, geo, start_page, max_page)
}

impl RequestSource for Workbook {
    type Error = WorkbookError;

    /// Reads the `Run` cell. Anything other than `Run` resets it to `Ready`.
    /// When armed, the cell is cleared and saved before the fields are parsed.
    fn take_request(&mut self) -> Result<Trigger, Self::Error> {
        let path = self.input_path();
        let mut sheet = Sheet::read(&path)?;
        let run_col = sheet.column(&path, RUN)?;

        if sheet.first_row_cell(run_col).trim() != RUN_TRIGGER {
            sheet.set_first_row_cell(run_col, RunStatus::Ready.as_str());
            sheet.write(&path)?;
            tracing::info!("run flag not set; nothing to do");
            return Ok(Trigger::Idle);
        }

        sheet.set_first_row_cell(run_col, "");
        sheet.write(&path)?;

        let request = parse_request(&sheet, &path)?;
        if let Err(e) = &request {
            tracing::warn!(error = %e, "invalid search input");
        }
        Ok(Trigger::Armed(request))
    }
}

impl StatusReporter for Workbook {
    type Error = WorkbookError;

    fn report(&mut self, status: RunStatus) -> Result<(), Self::Error> {
        let path = self.input_path();
        let mut sheet = Sheet::read(&path)?;
        let run_col = sheet.column(&path, RUN)?;
        sheet.set_first_row_cell(run_col, status.as_str());
        sheet.write(&path)?;
        tracing::debug!(%status, "status updated");
        Ok(())
    }
}
