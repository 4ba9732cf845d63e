// ABOUTME: Report assembly and export for Taxify
// ABOUTME: Income book CSV, report summaries for the AI writer and report files

pub mod csv_export;
pub mod error;
pub mod summary;
pub mod writer;

pub use csv_export::{export_income_csv, CSV_FILENAME, CSV_HEADER};
pub use error::{ReportError, ReportResult};
pub use summary::{build_report_summary, report_filename, ReportKind};
pub use writer::write_report_file;
