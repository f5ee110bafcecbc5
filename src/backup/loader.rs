// ABOUTME: JSON backup dump reader
// ABOUTME: Extracts table names and row counts from an exported database dump

use anyhow::{bail, Context, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Name given to table records that carry no `name` field
pub const UNKNOWN_TABLE_NAME: &str = "Unknown";

/// A table captured in the backup dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub name: String,
    pub row_count: usize,
}

impl TableSnapshot {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

#[derive(Deserialize)]
struct TableRecord {
    name: Option<String>,
    // Row contents are never inspected, only counted
    #[serde(default)]
    data: Vec<IgnoredAny>,
}

/// Read a backup dump from disk and return every table it contains
///
/// The dump is expected to be a top-level JSON array of records such as the
/// ones produced by phpMyAdmin's JSON export. Records whose `type` is not
/// `"table"` (headers, database markers) are skipped.
///
/// # Errors
///
/// Fails if the file cannot be read or does not hold a valid dump. There is
/// no partial result.
///
/// # Examples
///
/// ```no_run
/// # use migration_backup_audit::backup::load_backup;
/// # async fn example() -> anyhow::Result<()> {
/// let tables = load_backup("u715355537_bill_api-5-12-2025.json").await?;
/// println!("Found {} tables", tables.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_backup(path: impl AsRef<Path>) -> Result<Vec<TableSnapshot>> {
    let path = path.as_ref();
    tracing::info!("Reading backup dump {}", path.display());

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read backup file '{}'", path.display()))?;

    let tables = parse_backup(&contents)
        .with_context(|| format!("Failed to parse backup file '{}'", path.display()))?;

    tracing::info!("✓ Loaded {} tables from backup", tables.len());
    Ok(tables)
}

/// Parse the text of a backup dump
///
/// Table order in the result follows the order of the dump. Duplicate names
/// are kept as separate entries.
///
/// # Examples
///
/// ```
/// # use migration_backup_audit::backup::parse_backup;
/// let tables = parse_backup(
///     r#"[{"type":"header"},{"type":"table","name":"users","data":[{"id":1}]}]"#,
/// ).unwrap();
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].name, "users");
/// assert_eq!(tables[0].row_count, 1);
/// ```
pub fn parse_backup(json: &str) -> Result<Vec<TableSnapshot>> {
    let document: Value = serde_json::from_str(json).context("Backup is not valid JSON")?;

    let Value::Array(records) = document else {
        bail!("Backup must be a JSON array of records");
    };

    let mut tables = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if record.get("type").and_then(Value::as_str) != Some("table") {
            continue;
        }

        let table = TableRecord::deserialize(record)
            .with_context(|| format!("Malformed table record at index {}", index))?;

        tables.push(TableSnapshot {
            name: table
                .name
                .unwrap_or_else(|| UNKNOWN_TABLE_NAME.to_string()),
            row_count: table.data.len(),
        });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backup_counts_rows() {
        let tables = parse_backup(
            r#"[
                {"type":"table","name":"users","data":[{"id":1}]},
                {"type":"table","name":"logs","data":[]}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            tables,
            vec![
                TableSnapshot {
                    name: "users".to_string(),
                    row_count: 1
                },
                TableSnapshot {
                    name: "logs".to_string(),
                    row_count: 0
                },
            ]
        );
    }

    #[test]
    fn test_parse_backup_skips_non_table_records() {
        let tables = parse_backup(
            r#"[
                {"type":"header","version":"5.2.1","comment":"Export to JSON plugin for PHPMyAdmin"},
                {"type":"database","name":"bill_api"},
                "stray value",
                {"type":"table","name":"invoices","database":"bill_api","data":[{"id":"1"},{"id":"2"}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "invoices");
        assert_eq!(tables[0].row_count, 2);
    }

    #[test]
    fn test_parse_backup_defaults_missing_fields() {
        let tables = parse_backup(r#"[{"type":"table"}]"#).unwrap();

        assert_eq!(tables[0].name, UNKNOWN_TABLE_NAME);
        assert_eq!(tables[0].row_count, 0);
        assert!(tables[0].is_empty());
    }

    #[test]
    fn test_parse_backup_keeps_duplicates() {
        let tables = parse_backup(
            r#"[{"type":"table","name":"a","data":[1]},{"type":"table","name":"a","data":[]}]"#,
        )
        .unwrap();

        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn test_parse_backup_rejects_invalid_input() {
        assert!(parse_backup("not json").is_err());
        assert!(parse_backup(r#"{"type":"table"}"#).is_err());
        assert!(parse_backup(r#"[{"type":"table","name":"t","data":"oops"}]"#).is_err());
    }

    #[tokio::test]
    async fn test_load_backup_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_backup(dir.path().join("missing.json")).await;

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read backup file"));
    }
}
