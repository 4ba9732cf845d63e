// ABOUTME: Domain types for the FOP income book
// ABOUTME: User profile, FOP groups, tax rates, income records and alerts

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{TAX_RATE_3_PERCENT, TAX_RATE_5_PERCENT};

/// Simplified taxation group of an individual entrepreneur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FopGroup {
    Group1,
    Group2,
    Group3,
}

impl FopGroup {
    pub const ALL: [FopGroup; 3] = [FopGroup::Group1, FopGroup::Group2, FopGroup::Group3];

    pub fn number(&self) -> u8 {
        match self {
            FopGroup::Group1 => 1,
            FopGroup::Group2 => 2,
            FopGroup::Group3 => 3,
        }
    }

    /// Group 3 pays a percentage of income; groups 1 and 2 pay a flat monthly sum.
    pub fn is_percentage_regime(&self) -> bool {
        matches!(self, FopGroup::Group3)
    }
}

impl TryFrom<u8> for FopGroup {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FopGroup::Group1),
            2 => Ok(FopGroup::Group2),
            3 => Ok(FopGroup::Group3),
            other => Err(format!("Unknown FOP group: {}", other)),
        }
    }
}

impl From<FopGroup> for u8 {
    fn from(group: FopGroup) -> Self {
        group.number()
    }
}

impl fmt::Display for FopGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Група {}", self.number())
    }
}

/// Single tax rate for group 3: 5% without VAT, 3% for VAT payers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum TaxRate {
    Percent5,
    Percent3,
}

impl TaxRate {
    pub fn fraction(&self) -> Decimal {
        match self {
            TaxRate::Percent5 => TAX_RATE_5_PERCENT,
            TaxRate::Percent3 => TAX_RATE_3_PERCENT,
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            TaxRate::Percent5 => 5,
            TaxRate::Percent3 => 3,
        }
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if (value - 0.05).abs() < 1e-9 {
            Ok(TaxRate::Percent5)
        } else if (value - 0.03).abs() < 1e-9 {
            Ok(TaxRate::Percent3)
        } else {
            Err(format!("Unsupported tax rate: {}", value))
        }
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> Self {
        match rate {
            TaxRate::Percent5 => 0.05,
            TaxRate::Percent3 => 0.03,
        }
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default = "default_group")]
    pub group: FopGroup,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: TaxRate,
    #[serde(default)]
    pub has_employees: bool,
    #[serde(default)]
    pub is_onboarded: bool,
}

fn default_group() -> FopGroup {
    FopGroup::Group3
}

fn default_tax_rate() -> TaxRate {
    TaxRate::Percent5
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Entrepreneur".to_string(),
            email: None,
            photo_url: None,
            group: default_group(),
            tax_rate: default_tax_rate(),
            has_employees: false,
            is_onboarded: false,
        }
    }
}

impl UserProfile {
    /// A profile with an email address counts as logged in.
    pub fn is_authenticated(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Uah,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Uah, Currency::Usd, Currency::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Uah => "UAH",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Uah => "₴",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UAH" => Ok(Currency::Uah),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(format!("Unsupported currency: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeSource {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "ai-scan")]
    AiScan,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeSource::Manual => "manual",
            IncomeSource::AiScan => "ai-scan",
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: Currency,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub source: IncomeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_document_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Info,
    Warning,
    Critical,
}

/// Notification record; read-only, nothing in Taxify writes alerts yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub level: AlertLevel,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}
