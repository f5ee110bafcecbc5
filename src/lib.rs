// ABOUTME: Library module for migration-backup-audit
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod backup;
pub mod commands;
pub mod config;
pub mod migration;
pub mod reconcile;
pub mod report;
pub mod utils;
