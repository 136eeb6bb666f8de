use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests a ladder table, splits it, or writes the per-level files.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Raised when the user provides an input path that does not exist.
    #[error("Input file '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    /// Raised when the input is neither a CSV file nor an Excel workbook.
    #[error("Input file must be a .csv or .xlsx: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Raised when a table does not follow the expected layout.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the CSV reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
