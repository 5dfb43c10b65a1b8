use thiserror::Error;

/// Fixed message for a workbook without a single usable sheet.
pub const INVALID_FORMAT_MESSAGE: &str =
    "no usable sheet found: expected headers on row 3, data from row 4 and brand names in column D";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{msg}", msg = INVALID_FORMAT_MESSAGE)]
    InvalidFormat,

    #[error("failed to open workbook {file_name}: {source}")]
    Workbook {
        file_name: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
