use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, ToolError};

/// Default name of the column holding the competency area of each row.
pub const LABEL_COLUMN: &str = "Levels";

/// Represents a single cell of the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Plain text cell.
    Text(String),
    /// Floating point number, as stored by spreadsheets.
    Number(f64),
    /// Integer number.
    Integer(i64),
    /// Boolean cell.
    Boolean(bool),
    /// Empty or absent cell.
    Missing,
}

impl CellValue {
    /// Coerces the cell into the text that is fed to the splitter.
    ///
    /// Missing cells become the empty string so they never produce a
    /// statement. Text is returned untouched; trimming happens per fragment.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Boolean(value) => value.to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

/// The career ladder as loaded from disk: a label column followed by one
/// column per job level.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    /// Builds a table from a header and its data rows.
    ///
    /// Blank header names are replaced by `Unnamed: <index>` and repeated
    /// names get a numeric suffix, so every column can be addressed by name.
    /// Short rows are padded with [`CellValue::Missing`].
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ToolError::InvalidTable("missing header row".into()));
        }

        let columns = normalize_headers(columns);
        let width = columns.len();
        let mut padded = Vec::with_capacity(rows.len());
        for (row_idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(ToolError::InvalidTable(format!(
                    "row {} has {} cells but the header has {width}",
                    row_idx + 1,
                    row.len()
                )));
            }
            row.resize(width, CellValue::Missing);
            padded.push(row);
        }

        Ok(Self {
            columns,
            rows: padded,
        })
    }

    /// Column names in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in table order. Every row is exactly as wide as the header.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Job level columns: every column other than the label column, in
    /// table order.
    pub fn level_columns(&self, label_column: &str) -> Result<Vec<&str>> {
        let label_idx = self.column_index(label_column)?;
        Ok(self
            .columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != label_idx)
            .map(|(_, name)| name.as_str())
            .collect())
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ToolError::InvalidTable(format!("missing column '{name}'")))
    }

    /// Cell at the given row in the named column.
    pub fn cell(&self, row: usize, column: &str) -> Result<&CellValue> {
        let col_idx = self.column_index(column)?;
        self.rows
            .get(row)
            .map(|cells| &cells[col_idx])
            .ok_or_else(|| ToolError::InvalidTable(format!("row {row} is out of range")))
    }
}

fn normalize_headers(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut normalized = Vec::with_capacity(columns.len());

    for (idx, raw) in columns.into_iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw
        };

        let mut name = base.clone();
        let mut counter = 1;
        while seen.contains(&name) {
            name = format!("{base}.{counter}");
            counter += 1;
        }
        seen.insert(name.clone());
        normalized.push(name);
    }

    normalized
}

/// One discrete behavior expected at a level for a competency area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorStatement {
    #[serde(rename = "Competency Area")]
    pub competency_area: String,
    #[serde(rename = "Competency at Level")]
    pub statement: String,
}

impl BehaviorStatement {
    pub fn new(competency_area: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            competency_area: competency_area.into(),
            statement: statement.into(),
        }
    }
}

/// All statements derived from one job level column, in row then fragment
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOutput {
    pub level: String,
    pub statements: Vec<BehaviorStatement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn coercion_renders_missing_as_empty() {
        assert_eq!(CellValue::Missing.to_text(), "");
        assert_eq!(CellValue::Number(3.0).to_text(), "3");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Integer(-4).to_text(), "-4");
        assert_eq!(CellValue::Boolean(true).to_text(), "true");
        assert_eq!(text("  keep spacing ").to_text(), "  keep spacing ");
    }

    #[test]
    fn empty_field_is_missing() {
        assert_eq!(CellValue::from(""), CellValue::Missing);
        assert_eq!(CellValue::from(" "), text(" "));
    }

    #[test]
    fn headers_are_made_addressable() {
        let table = SourceTable::new(
            vec![
                "Levels".into(),
                "Senior".into(),
                "".into(),
                "Senior".into(),
                "Senior".into(),
            ],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(
            table.columns(),
            ["Levels", "Senior", "Unnamed: 2", "Senior.1", "Senior.2"]
        );
        assert_eq!(table.level_columns("Levels").unwrap().len(), 4);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_rejected() {
        let table = SourceTable::new(
            vec!["Levels".into(), "Junior".into()],
            vec![vec![text("Communication")]],
        )
        .unwrap();
        assert_eq!(table.cell(0, "Junior").unwrap(), &CellValue::Missing);

        let err = SourceTable::new(
            vec!["Levels".into()],
            vec![vec![text("a"), text("b")]],
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidTable(_)));
    }

    #[test]
    fn empty_header_is_rejected() {
        let err = SourceTable::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidTable(_)));
    }

    #[test]
    fn label_column_is_excluded_from_levels_wherever_it_sits() {
        let table = SourceTable::new(
            vec!["Junior".into(), "Area".into(), "Senior".into()],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(table.level_columns("Area").unwrap(), ["Junior", "Senior"]);
        assert!(table.level_columns("Levels").is_err());
    }

    #[test]
    fn unknown_column_is_an_error() {
        let table = SourceTable::new(vec!["Levels".into()], Vec::new()).unwrap();
        assert!(table.column_index("Junior").is_err());
    }
}
