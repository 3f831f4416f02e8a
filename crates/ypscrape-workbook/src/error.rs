use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no \"{column}\" column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}
