// ABOUTME: Table classification for backup dumps
// ABOUTME: Splits backup tables into empty and populated groups

use super::loader::TableSnapshot;
use crate::utils::sanitize_identifier;
use std::collections::BTreeSet;

/// Backup tables partitioned by whether any rows were captured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupSummary {
    /// Names of tables with no rows, in dump order
    pub empty_tables: Vec<String>,
    /// Tables with at least one row and their row counts, in dump order
    pub non_empty_tables: Vec<(String, usize)>,
}

impl BackupSummary {
    pub fn total_tables(&self) -> usize {
        self.empty_tables.len() + self.non_empty_tables.len()
    }

    /// Populated tables ordered by descending row count
    ///
    /// Tables with equal counts keep their dump order.
    pub fn tables_by_row_count(&self) -> Vec<(&str, usize)> {
        let mut tables: Vec<(&str, usize)> = self
            .non_empty_tables
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        tables.sort_by(|a, b| b.1.cmp(&a.1));
        tables
    }
}

/// Partition tables into empty and non-empty groups
pub fn classify_tables(tables: &[TableSnapshot]) -> BackupSummary {
    let mut summary = BackupSummary::default();

    for table in tables {
        tracing::debug!(
            "Table '{}': {} rows",
            sanitize_identifier(&table.name),
            table.row_count
        );

        if table.is_empty() {
            summary.empty_tables.push(table.name.clone());
        } else {
            summary
                .non_empty_tables
                .push((table.name.clone(), table.row_count));
        }
    }

    summary
}

/// Distinct table names present in the backup, empty or not
pub fn backup_table_names(tables: &[TableSnapshot]) -> BTreeSet<String> {
    tables.iter().map(|table| table.name.clone()).collect()
}
