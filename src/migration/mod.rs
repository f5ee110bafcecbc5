// ABOUTME: Schema migration source module
// ABOUTME: Extracts declared tables and audits destructive operations in migration files

pub mod audit;
pub mod scanner;

pub use audit::{audit_migrations, find_destructive_operations, DestructiveFinding, MigrationAudit};
pub use scanner::{MigrationScan, MigrationScanner, ScanDiagnostic, DEFAULT_MIGRATION_EXTENSION};
