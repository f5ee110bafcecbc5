// ABOUTME: Analyze command implementation - Empty versus populated tables
// ABOUTME: Reads a backup dump and reports which tables captured no rows

use crate::backup::{classify_tables, load_backup, BackupSummary};
use crate::report::render_backup_analysis;
use crate::utils::write_report;
use anyhow::{Context, Result};
use std::path::Path;

/// Report which backup tables are empty and which hold data
///
/// This command:
/// 1. Loads every table record from the backup dump
/// 2. Splits tables into empty and populated groups
/// 3. Writes the analysis report, replacing any previous one
///
/// # Errors
///
/// Fails if the backup cannot be read or parsed, or the report cannot be
/// written.
///
/// # Examples
///
/// ```no_run
/// # use migration_backup_audit::commands::analyze;
/// # use std::path::Path;
/// # async fn example() -> anyhow::Result<()> {
/// let summary = analyze(
///     Path::new("u715355537_bill_api-5-12-2025.json"),
///     Path::new("backup_analysis_result.txt"),
/// )
/// .await?;
/// println!("{} empty tables", summary.empty_tables.len());
/// # Ok(())
/// # }
/// ```
pub async fn analyze(backup_path: &Path, output_path: &Path) -> Result<BackupSummary> {
    tracing::info!("Starting backup analysis...");

    let tables = load_backup(backup_path)
        .await
        .context("Failed to load backup")?;

    let summary = classify_tables(&tables);
    tracing::info!(
        "Total tables: {} ({} empty, {} with data)",
        summary.total_tables(),
        summary.empty_tables.len(),
        summary.non_empty_tables.len()
    );

    write_report(output_path, &render_backup_analysis(&summary))?;

    println!(
        "Analysis complete! Results saved to {}",
        output_path.display()
    );
    Ok(summary)
}
