// ABOUTME: Backup analysis report
// ABOUTME: Lists empty tables and populated tables with their row counts

use super::ReportBuilder;
use crate::backup::BackupSummary;

/// Render the empty-versus-populated table report
pub fn render_backup_analysis(summary: &BackupSummary) -> String {
    let mut report = ReportBuilder::new();

    report
        .section("Database Backup Analysis - Table Status")
        .blank()
        .line(format!("Total tables: {}", summary.total_tables()))
        .line(format!(
            "Empty tables (no inserts): {}",
            summary.empty_tables.len()
        ))
        .line(format!(
            "Tables with data: {}",
            summary.non_empty_tables.len()
        ))
        .blank();

    if summary.empty_tables.is_empty() {
        report
            .section("RESULT: NO EMPTY TABLES FOUND! ALL TABLES HAVE DATA.")
            .blank();
    } else {
        report.section("EMPTY TABLES (No inserts):");
        for (idx, name) in summary.empty_tables.iter().enumerate() {
            report.line(format!("{}. {}", idx + 1, name));
        }
        report.blank();
    }

    report.section("TABLES WITH DATA:");
    for (name, count) in summary.tables_by_row_count() {
        report.line(format!("  - {}: {} records", name, count));
    }

    report.finish()
}
