use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::io::OutputFormat;
use crate::model::{BehaviorStatement, LevelOutput, SourceTable};

/// Suffix appended to every normalized level name.
pub const OUTPUT_SUFFIX: &str = "_Behaviors";

/// A line break, or a period followed by whitespace.
static STATEMENT_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|\.\s+").expect("valid regex"));

/// Splits a cell into trimmed, non-empty behavior fragments.
pub fn split_cell(text: &str) -> Vec<&str> {
    STATEMENT_DELIMITER
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Produces the statements of a single job level column.
///
/// Rows are visited in table order and each cell's fragments are appended in
/// the order they appear. Rows whose label is empty still contribute.
#[instrument(level = "debug", skip(table))]
pub fn split_level(table: &SourceTable, label_column: &str, level: &str) -> Result<LevelOutput> {
    let label_idx = table.column_index(label_column)?;
    let level_idx = table.column_index(level)?;

    let mut statements = Vec::new();
    for row in table.rows() {
        let competency_area = row[label_idx].to_text();
        let cell_text = row[level_idx].to_text();
        for fragment in split_cell(&cell_text) {
            statements.push(BehaviorStatement::new(competency_area.clone(), fragment));
        }
    }

    debug!(statement_count = statements.len(), "level split");
    Ok(LevelOutput {
        level: level.to_string(),
        statements,
    })
}

/// Splits every job level column, in column order, skipping the label column.
pub fn split_all(table: &SourceTable, label_column: &str) -> Result<Vec<LevelOutput>> {
    table
        .level_columns(label_column)?
        .into_iter()
        .map(|level| split_level(table, label_column, level))
        .collect()
}

/// File name for a level: spaces and slashes become underscores.
pub fn output_file_name(level: &str, format: OutputFormat) -> String {
    let normalized = level.replace([' ', '/'], "_");
    format!("{normalized}{OUTPUT_SUFFIX}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn table(columns: &[&str], rows: &[&[&str]]) -> SourceTable {
        SourceTable::new(
            columns.iter().map(|name| name.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn texts(output: &LevelOutput) -> Vec<(&str, &str)> {
        output
            .statements
            .iter()
            .map(|s| (s.competency_area.as_str(), s.statement.as_str()))
            .collect()
    }

    #[test]
    fn splits_on_line_breaks_and_sentence_ends() {
        assert_eq!(
            split_cell("Writes clear docs.\nAsks questions"),
            ["Writes clear docs", "Asks questions"]
        );
        assert_eq!(
            split_cell("Owns delivery. Mentors peers.  Reviews code."),
            ["Owns delivery", "Mentors peers", "Reviews code."]
        );
        assert_eq!(split_cell("first\r\nsecond"), ["first", "second"]);
    }

    #[test]
    fn period_without_whitespace_does_not_split() {
        assert_eq!(
            split_cell("Knows tools, e.g.system design"),
            ["Knows tools, e.g.system design"]
        );
        assert_eq!(split_cell("v1.2 released."), ["v1.2 released."]);
    }

    #[test]
    fn blank_or_delimiter_only_cells_yield_nothing() {
        assert!(split_cell("").is_empty());
        assert!(split_cell("   \t ").is_empty());
        assert!(split_cell("\n\n. \n.  ").is_empty());
    }

    #[test]
    fn preserves_row_then_fragment_order_without_dedup() {
        let table = table(
            &["Levels", "Junior"],
            &[&["Delivery", "a. b"], &["Craft", "c"], &["Craft", "c"]],
        );

        let output = split_level(&table, "Levels", "Junior").unwrap();
        assert_eq!(
            texts(&output),
            [
                ("Delivery", "a"),
                ("Delivery", "b"),
                ("Craft", "c"),
                ("Craft", "c")
            ]
        );
    }

    #[test]
    fn empty_label_still_contributes_and_missing_cells_are_skipped() {
        let table = table(&["Levels", "Junior"], &[&["", "Ships"], &["Craft", ""]]);

        let output = split_level(&table, "Levels", "Junior").unwrap();
        assert_eq!(texts(&output), [("", "Ships")]);
    }

    #[test]
    fn numeric_cells_are_coerced() {
        let table = SourceTable::new(
            vec!["Levels".into(), "Junior".into()],
            vec![vec![CellValue::Integer(7), CellValue::Number(1.5)]],
        )
        .unwrap();

        let output = split_level(&table, "Levels", "Junior").unwrap();
        assert_eq!(texts(&output), [("7", "1.5")]);
    }

    #[test]
    fn split_all_covers_every_level_column() {
        let table = table(
            &["Levels", "Junior", "Senior", "Staff"],
            &[&["Craft", "x", "", "z"]],
        );

        let outputs = split_all(&table, "Levels").unwrap();
        let levels: Vec<&str> = outputs.iter().map(|o| o.level.as_str()).collect();
        assert_eq!(levels, ["Junior", "Senior", "Staff"]);
        assert!(outputs[1].statements.is_empty());
    }

    #[test]
    fn unknown_label_column_is_rejected() {
        let table = table(&["Area", "Junior"], &[&["Craft", "x"]]);
        assert!(split_level(&table, "Levels", "Junior").is_err());
    }

    #[test]
    fn output_names_replace_spaces_and_slashes() {
        assert_eq!(
            output_file_name("Staff/Principal", OutputFormat::Csv),
            "Staff_Principal_Behaviors.csv"
        );
        assert_eq!(
            output_file_name("Senior Engineer II", OutputFormat::Xlsx),
            "Senior_Engineer_II_Behaviors.xlsx"
        );
    }
}
