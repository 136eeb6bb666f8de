use std::path::Path;

use rust_xlsxwriter::{Table, Workbook};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::io::OutputFormat;
use crate::model::LevelOutput;

/// Header row of every level file.
pub const OUTPUT_HEADERS: [&str; 2] = ["Competency Area", "Competency at Level"];

const MAX_SHEET_NAME_LEN: usize = 31;

/// Writes the statements of one level to `path`, replacing any existing file.
#[instrument(
    level = "debug",
    skip(output),
    fields(level = %output.level, statements = output.statements.len())
)]
pub fn write_level(path: &Path, output: &LevelOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(path, output),
        OutputFormat::Xlsx => write_xlsx(path, output),
    }
}

fn write_csv(path: &Path, output: &LevelOutput) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // Written by hand so a level without statements still gets a header.
    writer.write_record(OUTPUT_HEADERS)?;
    for statement in &output.statements {
        writer.serialize(statement)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, output: &LevelOutput) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let sheet_name = sanitize_sheet_name(&output.level);
    debug!(%sheet_name, "writing worksheet");
    worksheet.set_name(&sheet_name)?;

    for (col_idx, header) in OUTPUT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, statement) in output.statements.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        worksheet.write_string(row, 0, &statement.competency_area)?;
        worksheet.write_string(row, 1, &statement.statement)?;
    }

    // Excel tables need at least one data row.
    if !output.statements.is_empty() {
        let mut table = Table::new();
        table.set_autofilter(true);
        let last_row = output.statements.len() as u32;
        let last_col = (OUTPUT_HEADERS.len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, last_row, last_col, &table)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Replaces characters Excel forbids in sheet names and caps the length.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        return "Sheet".to_string();
    }

    trimmed.chars().take(MAX_SHEET_NAME_LEN).collect()
}
