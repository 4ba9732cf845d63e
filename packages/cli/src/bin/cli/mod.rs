// ABOUTME: Subcommand handlers for the taxify binary
// ABOUTME: One module per command group

pub mod alerts;
pub mod dashboard;
pub mod income;
pub mod report;
pub mod session;
