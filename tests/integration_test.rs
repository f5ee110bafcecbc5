// ABOUTME: Integration tests for the full report workflow
// ABOUTME: Runs every command end-to-end against a fixture Laravel project

use migration_backup_audit::commands;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BACKUP: &str = r#"[
    {"type":"header","version":"5.2.1","comment":"Export to JSON plugin for PHPMyAdmin"},
    {"type":"database","name":"u715355537_bill_api"},
    {"type":"table","name":"users","database":"u715355537_bill_api","data":[{"id":"1"},{"id":"2"}]},
    {"type":"table","name":"cash_boxes","database":"u715355537_bill_api","data":[]},
    {"type":"table","name":"invoices","database":"u715355537_bill_api","data":[{"id":"1"},{"id":"2"},{"id":"3"}]},
    {"type":"table","name":"widgets","database":"u715355537_bill_api","data":[{"id":"9"}]},
    {"type":"table","name":"sessions","database":"u715355537_bill_api"}
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let migrations = dir.path().join("database/migrations");
        fs::create_dir_all(&migrations).unwrap();

        fs::write(dir.path().join("backup.json"), BACKUP).unwrap();
        write_migration(
            &migrations,
            "2014_10_12_000000_create_users_table.php",
            "users",
        );
        write_migration(
            &migrations,
            "2024_12_31_194332_create_cash_boxes_table.php",
            "cash_boxes",
        );
        write_migration(
            &migrations,
            "2025_01_10_000000_create_invoices_table.php",
            "invoices",
        );
        write_migration(
            &migrations,
            "2025_05_13_072209_create_installment_plans_table.php",
            "installment_plans",
        );
        fs::write(
            migrations.join("2025_12_10_203305_add_is_active_to_cash_boxes_table.php"),
            r#"<?php
return new class extends Migration
{
    public function up(): void
    {
        Schema::table('cash_boxes', function (Blueprint $table) {
            $table->dropColumn('legacy_code');
        });
    }
};
"#,
        )
        .unwrap();

        Self { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

fn write_migration(dir: &Path, file_name: &str, table: &str) {
    fs::write(
        dir.join(file_name),
        format!(
            "<?php\nreturn new class extends Migration\n{{\n    public function up(): void\n    {{\n        Schema::create('{table}', function (Blueprint $table) {{\n            $table->id();\n        }});\n    }}\n\n    public function down(): void\n    {{\n        Schema::dropIfExists('{table}');\n    }}\n}};\n"
        ),
    )
    .unwrap();
}

#[tokio::test]
async fn test_analyze_command_integration() {
    let fixture = Fixture::new();
    let output = fixture.path("backup_analysis_result.txt");

    let summary = commands::analyze(&fixture.path("backup.json"), &output)
        .await
        .unwrap();

    assert_eq!(summary.total_tables(), 5);
    assert_eq!(summary.empty_tables, vec!["cash_boxes", "sessions"]);

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("Total tables: 5\n"));
    assert!(report.contains("Empty tables (no inserts): 2\n"));
    assert!(report.contains("Tables with data: 3\n"));
    assert!(report.contains("1. cash_boxes\n2. sessions\n"));
    assert!(report.ends_with(
        "  - invoices: 3 records\n  - users: 2 records\n  - widgets: 1 records\n"
    ));
}

#[tokio::test]
async fn test_compare_command_integration() {
    let fixture = Fixture::new();
    let output = fixture.path("detailed_table_analysis.txt");

    let comparison = commands::compare(
        &fixture.path("backup.json"),
        &fixture.path("database/migrations"),
        "php",
        &output,
    )
    .await
    .unwrap();

    assert_eq!(
        comparison.reconciliation.missing.iter().collect::<Vec<_>>(),
        vec!["installment_plans"]
    );
    assert_eq!(
        comparison.reconciliation.extra.iter().collect::<Vec<_>>(),
        vec!["sessions", "widgets"]
    );
    assert!(comparison.diagnostics.is_empty());

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("Tables in migrations: 4\n"));
    assert!(report.contains("Tables in backup: 5\n"));
    assert!(report.contains("Tables in migrations but NOT in backup: 1\n"));
    assert!(report.contains("1. installment_plans\n"));
    assert!(report.contains("  ✓ cash_boxes\n"));
    assert!(report.ends_with("  ! sessions\n  ! widgets\n"));
}

#[tokio::test]
async fn test_audit_command_integration() {
    let fixture = Fixture::new();
    let output = fixture.path("migration_audit_report.txt");

    let audit = commands::audit(&fixture.path("database/migrations"), &output)
        .await
        .unwrap();

    assert_eq!(audit.files_scanned, 5);
    assert_eq!(audit.findings.len(), 1);

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains(
        "File: 2025_12_10_203305_add_is_active_to_cash_boxes_table.php\n  - DANGER: dropColumn('legacy_code')\n"
    ));
    // Rollbacks in down() are not destructive for production
    assert!(!report.contains("dropIfExists"));
}

#[tokio::test]
async fn test_reports_are_identical_across_runs() {
    let fixture = Fixture::new();
    let backup = fixture.path("backup.json");
    let migrations = fixture.path("database/migrations");
    let analysis = fixture.path("analysis.txt");
    let detailed = fixture.path("detailed.txt");
    let audit = fixture.path("audit.txt");

    commands::analyze(&backup, &analysis).await.unwrap();
    commands::compare(&backup, &migrations, "php", &detailed)
        .await
        .unwrap();
    commands::audit(&migrations, &audit).await.unwrap();
    let first: Vec<Vec<u8>> = [&analysis, &detailed, &audit]
        .iter()
        .map(|path| fs::read(path).unwrap())
        .collect();

    commands::analyze(&backup, &analysis).await.unwrap();
    commands::compare(&backup, &migrations, "php", &detailed)
        .await
        .unwrap();
    commands::audit(&migrations, &audit).await.unwrap();
    let second: Vec<Vec<u8>> = [&analysis, &detailed, &audit]
        .iter()
        .map(|path| fs::read(path).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_backup_is_fatal() {
    let fixture = Fixture::new();

    let result = commands::analyze(
        &fixture.path("no_such_backup.json"),
        &fixture.path("out.txt"),
    )
    .await;

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("no_such_backup.json"));
}
