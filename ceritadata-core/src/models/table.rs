//! Data table configuration and the local CSV export.

use serde::{Deserialize, Serialize};

// ============================================================================
// Table Config
// ============================================================================

/// Display configuration for a story's data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Title drawn above the table.
    #[serde(default)]
    pub title: String,
    /// Whether the download button is offered.
    #[serde(default = "default_show_download", rename = "showDownload")]
    pub show_download: bool,
}

fn default_show_download() -> bool {
    true
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            title: "Data Tabel".to_string(),
            show_download: true,
        }
    }
}

// ============================================================================
// Table Data
// ============================================================================

/// Tabular data for a story, rows of string cells.
///
/// The first row is conventionally the header row; the client does not
/// interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableData {
    /// Rows of cells.
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Renders this table as CSV text. See [`table_to_csv`].
    pub fn to_csv(&self) -> String {
        table_to_csv(&self.rows)
    }
}

/// Converts table rows to CSV: every cell quoted, cells joined with `,`,
/// rows joined with `\n`.
///
/// Cells are quoted verbatim; an embedded `"` is not escaped. This is the
/// exact output the existing download path produces, kept for
/// compatibility.
pub fn table_to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{cell}\""))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_every_cell() {
        let rows = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ];
        assert_eq!(table_to_csv(&rows), "\"A\",\"B\"\n\"1\",\"2\"");
    }

    #[test]
    fn csv_of_empty_table_is_empty() {
        assert_eq!(table_to_csv(&[]), "");
    }

    #[test]
    fn csv_keeps_commas_inside_quoted_cells() {
        let rows = vec![vec!["a,b".to_string(), "c".to_string()]];
        assert_eq!(table_to_csv(&rows), "\"a,b\",\"c\"");
    }

    #[test]
    fn table_config_defaults() {
        let config = DataTableConfig::default();
        assert_eq!(config.title, "Data Tabel");
        assert!(config.show_download);
    }

    #[test]
    fn table_config_serde_uses_camel_case_flag() {
        let json = serde_json::to_value(DataTableConfig::default()).unwrap();
        assert_eq!(json["showDownload"], true);

        let parsed: DataTableConfig =
            serde_json::from_value(serde_json::json!({ "title": "TPT" })).unwrap();
        assert!(parsed.show_download);
        assert_eq!(parsed.title, "TPT");
    }
}
