// ABOUTME: Income book export as CSV
// ABOUTME: One row per income in list order with the description always quoted

use rust_decimal::Decimal;
use taxify_core::Income;
use tracing::debug;

use crate::error::{ReportError, ReportResult};

pub const CSV_FILENAME: &str = "book_of_income.csv";
pub const CSV_HEADER: [&str; 6] = ["ID", "Date", "Amount", "Currency", "Description", "Source"];

/// Plain amount without trailing zeros, e.g. `1500.5`
fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Wraps a field in quotes with inner quotes doubled
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders the income book. The description is always quoted; the other
/// columns (ids, ISO dates, plain amounts, codes) never need quoting.
pub fn export_income_csv(incomes: &[Income]) -> ReportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for income in incomes {
        let date = income.date.format("%Y-%m-%d").to_string();
        writer.write_record([
            income.id.as_str(),
            date.as_str(),
            format_amount(income.amount).as_str(),
            income.currency.code(),
            quoted(&income.description).as_str(),
            income.source.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    debug!("Exported {} incomes to CSV", incomes.len());
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use taxify_core::{Currency, IncomeSource};

    fn income(id: &str, amount: Decimal, description: &str, source: IncomeSource) -> Income {
        Income {
            id: id.to_string(),
            amount,
            currency: Currency::Uah,
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            description: description.to_string(),
            source,
            original_document_url: None,
        }
    }

    #[test]
    fn test_empty_book_has_header_only() {
        assert_eq!(
            export_income_csv(&[]).unwrap(),
            "ID,Date,Amount,Currency,Description,Source\n"
        );
    }

    #[test]
    fn test_rows_in_list_order() {
        let incomes = vec![
            income("b2", dec!(1500.50), "Консультація", IncomeSource::AiScan),
            income("a1", dec!(100000), "Розробка", IncomeSource::Manual),
        ];
        let csv = export_income_csv(&incomes).unwrap();

        assert_eq!(
            csv,
            "ID,Date,Amount,Currency,Description,Source\n\
             b2,2026-05-01,1500.5,UAH,\"Консультація\",ai-scan\n\
             a1,2026-05-01,100000,UAH,\"Розробка\",manual\n"
        );
    }

    #[test]
    fn test_quotes_and_commas_are_escaped() {
        let incomes = vec![income(
            "q1",
            dec!(10),
            "Invoice \"A\", part 2",
            IncomeSource::Manual,
        )];
        let csv = export_income_csv(&incomes).unwrap();
        assert!(csv.contains(r#"q1,2026-05-01,10,UAH,"Invoice ""A"", part 2",manual"#));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][4], "Invoice \"A\", part 2");
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            CSV_HEADER.to_vec()
        );
    }

    #[test]
    fn test_description_is_always_quoted() {
        let incomes = vec![
            income("e1", dec!(5), "", IncomeSource::Manual),
            income("p1", dec!(5), "plain", IncomeSource::Manual),
        ];
        let csv = export_income_csv(&incomes).unwrap();
        assert!(csv.contains("e1,2026-05-01,5,UAH,\"\",manual\n"));
        assert!(csv.contains("p1,2026-05-01,5,UAH,\"plain\",manual\n"));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let descriptions: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[4].to_string())
            .collect();
        assert_eq!(descriptions, vec!["", "plain"]);
    }

    #[test]
    fn test_multiline_description_survives() {
        let incomes = vec![income("m1", dec!(1), "line one\nline two", IncomeSource::Manual)];
        let csv = export_income_csv(&incomes).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[4], "line one\nline two");
    }
}
