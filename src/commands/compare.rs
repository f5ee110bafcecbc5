// ABOUTME: Compare command implementation - Migrations versus backup
// ABOUTME: Reports migration tables missing from a backup and backup tables no migration declares

use crate::backup::{backup_table_names, load_backup};
use crate::migration::{MigrationScanner, ScanDiagnostic};
use crate::reconcile::{reconcile, TableReconciliation};
use crate::report::render_table_comparison;
use crate::utils::write_report;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Outcome of comparing a backup against its migrations
#[derive(Debug, Clone)]
pub struct Comparison {
    pub backup_tables: BTreeSet<String>,
    pub expected_tables: BTreeSet<String>,
    pub reconciliation: TableReconciliation,
    /// Migration files skipped because they could not be read
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Compare the tables in a backup with the tables declared by migrations
///
/// This command:
/// 1. Loads the set of table names present in the backup dump
/// 2. Scans the migrations directory for declared tables
/// 3. Computes missing and extra tables
/// 4. Writes the comparison report, replacing any previous one
///
/// Unreadable migration files do not fail the command. They are logged and
/// returned in [`Comparison::diagnostics`]; the report is unaffected.
///
/// # Errors
///
/// Fails if the backup cannot be loaded, the migrations directory cannot be
/// listed, or the report cannot be written.
pub async fn compare(
    backup_path: &Path,
    migrations_dir: &Path,
    migration_extension: &str,
    output_path: &Path,
) -> Result<Comparison> {
    tracing::info!("Starting migration comparison...");

    let tables = load_backup(backup_path)
        .await
        .context("Failed to load backup")?;
    let backup_tables = backup_table_names(&tables);

    let scanner = MigrationScanner::new(migration_extension)?;
    let scan = scanner
        .scan(migrations_dir)
        .await
        .context("Failed to scan migrations")?;
    let expected_tables = scan.tables;

    let reconciliation = reconcile(&backup_tables, &expected_tables);
    tracing::info!("Tables in migrations: {}", expected_tables.len());
    tracing::info!("Tables in backup: {}", backup_tables.len());
    if reconciliation.is_consistent() {
        tracing::info!("✓ Backup and migrations declare the same tables");
    } else {
        tracing::warn!(
            "⚠ {} table(s) missing from backup, {} extra table(s) in backup",
            reconciliation.missing.len(),
            reconciliation.extra.len()
        );
    }

    write_report(
        output_path,
        &render_table_comparison(&backup_tables, &expected_tables, &reconciliation),
    )?;

    println!(
        "Detailed analysis complete! Results saved to {}",
        output_path.display()
    );

    Ok(Comparison {
        backup_tables,
        expected_tables,
        reconciliation,
        diagnostics: scan.diagnostics,
    })
}
