use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::error::{Result, ToolError};
use crate::model::{CellValue, SourceTable};

/// Supported input layouts, detected from the file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Xlsx,
}

/// Detects the input format from the extension, ignoring case.
pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(InputFormat::Csv),
        Some("xlsx") => Ok(InputFormat::Xlsx),
        _ => Err(ToolError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Loads a ladder table from a `.csv` file or the first sheet of an `.xlsx`
/// workbook. The first row is always the header.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn read_table(path: &Path) -> Result<SourceTable> {
    let table = match detect_format(path)? {
        InputFormat::Csv => read_csv(path)?,
        InputFormat::Xlsx => read_xlsx(path)?,
    };
    debug!(
        column_count = table.columns().len(),
        row_count = table.rows().len(),
        "table loaded"
    );
    Ok(table)
}

fn read_csv(path: &Path) -> Result<SourceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from).collect());
    }

    SourceTable::new(columns, rows)
}

fn read_xlsx(path: &Path) -> Result<SourceTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::InvalidTable("workbook has no sheets".into()))?
        .map_err(ToolError::from)?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_to_value(cell).to_text())
            .collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    SourceTable::new(columns, rows)
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::from(value.as_str()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Integer(*value),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::DateTime(_) => match cell.as_datetime() {
            Some(datetime) => CellValue::Text(datetime.to_string()),
            None => CellValue::Text(cell.to_string()),
        },
        // Formula errors such as `#N/A` carry no behavior text.
        DataType::Empty | DataType::Error(_) => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}
