//! Whole-file CSV sheet access.

use std::path::Path;

use csv::StringRecord;

use crate::error::WorkbookError;

/// A sheet held in memory: a header row and its data rows.
#[derive(Debug, Clone)]
pub(crate) struct Sheet {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl Sheet {
    pub fn read(path: &Path) -> Result<Self, WorkbookError> {
        let csv_error = |source: csv::Error| WorkbookError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(csv_error)?;
        let headers = reader.headers().map_err(csv_error)?.clone();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;
        Ok(Self { headers, rows })
    }

    /// Index of the header named `column`, compared case-insensitively.
    pub fn column(&self, path: &Path, column: &'static str) -> Result<usize, WorkbookError> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column))
            .ok_or_else(|| WorkbookError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    }

    /// Cell of the first data row; empty when the row or cell is absent.
    pub fn first_row_cell(&self, index: usize) -> &str {
        self.rows
            .first()
            .and_then(|row| row.get(index))
            .unwrap_or("")
    }

    /// Sets a cell of the first data row, padding the row as needed.
    pub fn set_first_row_cell(&mut self, index: usize, value: &str) {
        let width = self.headers.len().max(index + 1);
        let current: Vec<String> = self
            .rows
            .first()
            .map(|row| row.iter().map(str::to_owned).collect())
            .unwrap_or_default();

        let mut cells: Vec<String> = (0..width)
            .map(|i| current.get(i).cloned().unwrap_or_default())
            .collect();
        cells[index] = value.to_owned();

        let record = StringRecord::from(cells);
        if self.rows.is_empty() {
            self.rows.push(record);
        } else {
            self.rows[0] = record;
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), WorkbookError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        let csv_error = |source: csv::Error| WorkbookError::Csv {
            path: path.to_path_buf(),
            source,
        };
        writer.write_record(&self.headers).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        let bytes = writer.into_inner().map_err(|e| WorkbookError::Io {
            path: path.to_path_buf(),
            source: e.into_error(),
        })?;
        write_replacing(path, &bytes)
    }
}

/// Writes `bytes` to a sibling temp file and renames it over `path`, so a
/// reader never observes a half-written sheet.
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), WorkbookError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    std::fs::write(&tmp, bytes).map_err(|source| WorkbookError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| WorkbookError::Io {
        path: path.to_path_buf(),
        source,
    })
}
