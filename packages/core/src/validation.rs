// ABOUTME: Validation for the income-entry flow
// ABOUTME: Turns raw form input (typed or OCR-prefilled) into an Income record

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::types::{Currency, Income, IncomeSource};
use crate::utils::generate_income_id;

pub const MAX_DESCRIPTION_LENGTH: usize = 500;
/// Amounts are money: kopecks and cents, nothing finer
pub const MAX_AMOUNT_DECIMALS: u32 = 2;
/// Upper bound for a single income; keeps amounts exact through the stored f64
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Amount is required")]
    MissingAmount,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount {0} has more than {places} decimal places", places = MAX_AMOUNT_DECIMALS)]
    TooManyDecimals(String),

    #[error("Amount {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(String),

    #[error("Date is required")]
    MissingDate,

    #[error("Invalid date: {0}. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Description is too long ({0} characters, max {max})", max = MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong(usize),
}

/// Raw values of the income form before they are saved
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeDraft {
    pub amount: String,
    pub currency: Currency,
    pub date: String,
    pub description: String,
    /// Data URI of the scanned document, when the draft came from OCR
    pub document: Option<String>,
}

impl IncomeDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            currency: Currency::Uah,
            date: date.format("%Y-%m-%d").to_string(),
            description: String::new(),
            document: None,
        }
    }

    /// Parsed amount; accepts `,` as decimal separator and ignores spaces.
    /// At most two decimal places and no more than [`MAX_AMOUNT`].
    pub fn parse_amount(&self) -> Result<Decimal, ValidationError> {
        let cleaned: String = self
            .amount
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        if cleaned.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let amount = Decimal::from_str(&cleaned)
            .map_err(|_| ValidationError::InvalidAmount(self.amount.clone()))?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        // Trailing zeros ("1250.50") do not count
        if amount.normalize().scale() > MAX_AMOUNT_DECIMALS {
            return Err(ValidationError::TooManyDecimals(self.amount.clone()));
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(self.amount.clone()));
        }
        Ok(amount)
    }

    pub fn parse_date(&self) -> Result<NaiveDate, ValidationError> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
    }

    /// Validate and build a new record with a fresh ID
    pub fn into_income(self) -> Result<Income, ValidationError> {
        let amount = self.parse_amount()?;
        let date = self.parse_date()?;

        let description = self.description.trim().to_string();
        let length = description.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong(length));
        }

        let source = if self.document.is_some() {
            IncomeSource::AiScan
        } else {
            IncomeSource::Manual
        };

        Ok(Income {
            id: generate_income_id(),
            amount,
            currency: self.currency,
            date,
            description,
            source,
            original_document_url: self.document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn draft(amount: &str, date: &str) -> IncomeDraft {
        IncomeDraft {
            amount: amount.to_string(),
            date: date.to_string(),
            ..IncomeDraft::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
        }
    }

    #[test]
    fn test_manual_income() {
        let mut d = draft("1500.25", "2026-04-02");
        d.description = "  Розробка сайту ".to_string();
        let income = d.into_income().unwrap();

        assert_eq!(income.amount, dec!(1500.25));
        assert_eq!(income.date, NaiveDate::from_ymd_opt(2026, 4, 2).unwrap());
        assert_eq!(income.description, "Розробка сайту");
        assert_eq!(income.source, IncomeSource::Manual);
        assert_eq!(income.currency, Currency::Uah);
        assert!(income.original_document_url.is_none());
        assert!(!income.id.is_empty());
    }

    #[test]
    fn test_scanned_income_keeps_document() {
        let mut d = draft("10", "2026-04-02");
        d.document = Some("data:image/png;base64,AAAA".to_string());
        let income = d.into_income().unwrap();

        assert_eq!(income.source, IncomeSource::AiScan);
        assert_eq!(
            income.original_document_url.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_amount_formats() {
        assert_eq!(draft("1 250,50", "2026-01-01").parse_amount(), Ok(dec!(1250.50)));
        assert_eq!(draft("", "2026-01-01").parse_amount(), Err(ValidationError::MissingAmount));
        assert_eq!(
            draft("abc", "2026-01-01").parse_amount(),
            Err(ValidationError::InvalidAmount("abc".to_string()))
        );
        assert_eq!(draft("0", "2026-01-01").parse_amount(), Err(ValidationError::NonPositiveAmount));
        assert_eq!(draft("-3", "2026-01-01").parse_amount(), Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_amount_precision_is_capped() {
        assert_eq!(draft("0.01", "2026-01-01").parse_amount(), Ok(dec!(0.01)));
        assert_eq!(draft("99,900", "2026-01-01").parse_amount(), Ok(dec!(99.9)));
        assert_eq!(
            draft("1500.123456789012345678", "2026-01-01").parse_amount(),
            Err(ValidationError::TooManyDecimals("1500.123456789012345678".to_string()))
        );
        assert_eq!(
            draft("0,005", "2026-01-01").parse_amount(),
            Err(ValidationError::TooManyDecimals("0,005".to_string()))
        );
    }

    #[test]
    fn test_amount_size_is_capped() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
        assert_eq!(
            draft("1000000000000", "2026-01-01").parse_amount(),
            Ok(MAX_AMOUNT)
        );
        assert_eq!(
            draft("1000000000000.01", "2026-01-01").parse_amount(),
            Err(ValidationError::AmountTooLarge("1000000000000.01".to_string()))
        );
        assert_eq!(
            draft("79228162514264337593543950335", "2026-01-01").into_income(),
            Err(ValidationError::AmountTooLarge(
                "79228162514264337593543950335".to_string()
            ))
        );
        assert_eq!(
            draft("50000000000000000000000000000", "2026-01-01").into_income(),
            Err(ValidationError::AmountTooLarge(
                "50000000000000000000000000000".to_string()
            ))
        );
    }

    #[test]
    fn test_largest_amount_survives_storage_format() {
        let income = draft("999999999999.99", "2026-01-01").into_income().unwrap();
        let json = serde_json::to_string(&income).unwrap();
        let back: Income = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, dec!(999999999999.99));
    }

    #[test]
    fn test_date_required() {
        assert_eq!(draft("1", "").into_income(), Err(ValidationError::MissingDate));
        assert_eq!(
            draft("1", "02.04.2026").into_income(),
            Err(ValidationError::InvalidDate("02.04.2026".to_string()))
        );
    }

    #[test]
    fn test_description_limit() {
        let mut d = draft("1", "2026-01-01");
        d.description = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            d.into_income(),
            Err(ValidationError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH + 1))
        );
        assert_eq!(
            ValidationError::DescriptionTooLong(501).to_string(),
            "Description is too long (501 characters, max 500)"
        );
    }
}
