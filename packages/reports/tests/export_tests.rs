// ABOUTME: Integration tests for writing exports to disk
// ABOUTME: Uses a temporary output directory

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use taxify_core::{Currency, Income, IncomeSource};
use taxify_reports::{
    export_income_csv, report_filename, write_report_file, ReportKind, CSV_FILENAME,
};

#[tokio::test]
async fn test_csv_written_to_new_directory() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("exports").join("2026");

    let incomes = vec![Income {
        id: "inc1".to_string(),
        amount: dec!(250.75),
        currency: Currency::Eur,
        date: NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
        description: "Design, logo".to_string(),
        source: IncomeSource::Manual,
        original_document_url: None,
    }];
    let csv = export_income_csv(&incomes).unwrap();

    let path = write_report_file(&out, CSV_FILENAME, &csv).await.unwrap();

    assert_eq!(path, out.join("book_of_income.csv"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "ID,Date,Amount,Currency,Description,Source\ninc1,2026-07-04,250.75,EUR,\"Design, logo\",manual\n"
    );
}

#[tokio::test]
async fn test_report_overwrites_same_day_file() {
    let temp_dir = TempDir::new().unwrap();
    let filename = report_filename(
        ReportKind::Esv,
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    );

    write_report_file(temp_dir.path(), &filename, "first").await.unwrap();
    let path = write_report_file(temp_dir.path(), &filename, "second")
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
}
