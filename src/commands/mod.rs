// ABOUTME: Command implementations for each report
// ABOUTME: Exports analyze, compare, and audit commands

pub mod analyze;
pub mod audit;
pub mod compare;

pub use analyze::analyze;
pub use audit::audit;
pub use compare::{compare, Comparison};
