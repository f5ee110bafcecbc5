// ABOUTME: Migration versus backup comparison report
// ABOUTME: Lists tables missing from the backup and tables no migration declares

use super::ReportBuilder;
use crate::reconcile::TableReconciliation;
use std::collections::BTreeSet;

/// Render the detailed migration/backup comparison report
///
/// All table lists are rendered in lexicographic order.
pub fn render_table_comparison(
    backup_tables: &BTreeSet<String>,
    expected_tables: &BTreeSet<String>,
    reconciliation: &TableReconciliation,
) -> String {
    let mut report = ReportBuilder::new();

    report
        .banner()
        .line("DETAILED DATABASE ANALYSIS")
        .line("Comparing Migrations vs Backup")
        .banner()
        .blank()
        .line(format!("Tables in migrations: {}", expected_tables.len()))
        .line(format!("Tables in backup: {}", backup_tables.len()))
        .line(format!(
            "Tables in migrations but NOT in backup: {}",
            reconciliation.missing.len()
        ))
        .blank();

    if reconciliation.missing.is_empty() {
        report
            .section("RESULT: ALL MIGRATION TABLES HAVE DATA IN BACKUP!")
            .blank();
    } else {
        report.section("TABLES WITH NO INSERTS (Exist in migrations but not in backup):");
        for (idx, name) in reconciliation.missing.iter().enumerate() {
            report.line(format!("{}. {}", idx + 1, name));
        }
        report.blank();
    }

    report.section("TABLES IN BACKUP:");
    for name in backup_tables {
        report.line(format!("  ✓ {}", name));
    }
    report.blank();

    if !reconciliation.extra.is_empty() {
        report.section("EXTRA TABLES (In backup but not found in migrations):");
        for name in &reconciliation.extra {
            report.line(format!("  ! {}", name));
        }
    }

    report.finish()
}
