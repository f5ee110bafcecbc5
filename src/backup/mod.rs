// ABOUTME: Backup dump module
// ABOUTME: Loads JSON database dumps and classifies their tables by row count

pub mod classify;
pub mod loader;

pub use classify::{backup_table_names, classify_tables, BackupSummary};
pub use loader::{load_backup, parse_backup, TableSnapshot};
