use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::{Result, ToolError};
use crate::io::OutputFormat;
use crate::io::level_write;
use crate::io::table_read;
use crate::model::LABEL_COLUMN;
use crate::split::{output_file_name, split_level};

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Column holding the competency area of each row.
    pub label_column: String,
    /// Format of the files written per level.
    pub format: OutputFormat,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            label_column: LABEL_COLUMN.to_string(),
            format: OutputFormat::Csv,
        }
    }
}

/// Checks that the input exists, then creates the output folder and its
/// parents. Nothing is created when the input is missing.
pub fn prepare_run(input: &Path, output_folder: &Path) -> Result<()> {
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }
    fs::create_dir_all(output_folder)?;
    Ok(())
}

/// Splits a career ladder into one statement file per job level.
///
/// Levels are written in column order and `on_saved` is called right after
/// each file lands, so a later failure leaves earlier files reported and in
/// place. Returns the written paths.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output_folder.display(), format = %options.format)
)]
pub fn split_ladder<F>(
    input: &Path,
    output_folder: &Path,
    options: &SplitOptions,
    mut on_saved: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    let table = table_read::read_table(input)?;
    let levels = table.level_columns(&options.label_column)?;
    info!(
        level_count = levels.len(),
        row_count = table.rows().len(),
        "loaded career ladder"
    );

    let mut written = Vec::with_capacity(levels.len());
    for level in levels {
        let output = split_level(&table, &options.label_column, level)?;
        let path = output_folder.join(output_file_name(level, options.format));
        level_write::write_level(&path, &output, options.format)?;
        info!(
            level = %level,
            statements = output.statements.len(),
            path = %path.display(),
            "level written"
        );
        on_saved(&path);
        written.push(path);
    }

    Ok(written)
}
