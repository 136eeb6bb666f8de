//! File adapters: loading the ladder table and writing one file per level.

pub mod level_write;
pub mod table_read;

/// Format of the per-level output files.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma separated values with a header row.
    #[default]
    Csv,
    /// Excel workbook with a single sheet.
    Xlsx,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
