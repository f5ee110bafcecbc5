// ABOUTME: Backup versus migration reconciliation
// ABOUTME: Computes tables missing from the backup and tables no migration declares

use std::collections::BTreeSet;

/// Set differences between backup tables and migration-declared tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReconciliation {
    /// Declared by a migration but absent from the backup
    pub missing: BTreeSet<String>,
    /// Present in the backup but declared by no migration
    pub extra: BTreeSet<String>,
}

impl TableReconciliation {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare the tables in a backup with the tables migrations expect
///
/// Names are compared exactly, without case or whitespace normalization.
///
/// # Examples
///
/// ```
/// # use migration_backup_audit::reconcile::reconcile;
/// # use std::collections::BTreeSet;
/// let backup: BTreeSet<String> = ["users", "widgets"].map(String::from).into();
/// let expected: BTreeSet<String> = ["users", "posts"].map(String::from).into();
///
/// let result = reconcile(&backup, &expected);
/// assert!(result.missing.contains("posts"));
/// assert!(result.extra.contains("widgets"));
/// ```
pub fn reconcile(
    backup_tables: &BTreeSet<String>,
    expected_tables: &BTreeSet<String>,
) -> TableReconciliation {
    let missing: BTreeSet<String> = expected_tables
        .difference(backup_tables)
        .cloned()
        .collect();
    let extra: BTreeSet<String> = backup_tables
        .difference(expected_tables)
        .cloned()
        .collect();

    tracing::debug!(
        "Reconciled {} backup tables with {} expected: {} missing, {} extra",
        backup_tables.len(),
        expected_tables.len(),
        missing.len(),
        extra.len()
    );

    TableReconciliation { missing, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_reconcile_differences_are_disjoint_from_sources() {
        let backup = set(&["users", "logs", "widgets"]);
        let expected = set(&["users", "logs", "posts", "tags"]);

        let result = reconcile(&backup, &expected);

        assert_eq!(result.missing, set(&["posts", "tags"]));
        assert_eq!(result.extra, set(&["widgets"]));
        assert!(result.missing.is_disjoint(&backup));
        assert!(result.extra.is_disjoint(&expected));
        assert!(result.missing.is_disjoint(&result.extra));
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_reconcile_is_case_sensitive() {
        let result = reconcile(&set(&["Users"]), &set(&["users"]));

        assert_eq!(result.missing, set(&["users"]));
        assert_eq!(result.extra, set(&["Users"]));
    }

    #[test]
    fn test_reconcile_identical_sets() {
        let tables = set(&["a", "b"]);

        assert!(reconcile(&tables, &tables).is_consistent());
    }
}
