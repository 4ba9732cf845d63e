// ABOUTME: Report kinds and the data summary handed to the report writer model
// ABOUTME: Figures come from the shared tax calculation, not from the model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use taxify_core::{summarize, Income, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Single-tax payer declaration
    Declaration,
    /// Social contribution report (annex 1)
    Esv,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Declaration, ReportKind::Esv];

    /// Name used in the prompt and in the output file name
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Declaration => "Декларація_ФОП",
            ReportKind::Esv => "Звіт_ЄСВ",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Declaration => "Декларація платника ЄП",
            ReportKind::Esv => "Звіт по ЄСВ (Додаток 1)",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declaration" | "декларація_фоп" => Ok(ReportKind::Declaration),
            "esv" | "звіт_єсв" => Ok(ReportKind::Esv),
            other => Err(format!("Unknown report type: {}", other)),
        }
    }
}

/// `<report name>_<YYYY-MM-DD>.txt`
pub fn report_filename(kind: ReportKind, date: NaiveDate) -> String {
    format!("{}_{}.txt", kind.name(), date.format("%Y-%m-%d"))
}

pub fn build_report_summary(kind: ReportKind, profile: &UserProfile, incomes: &[Income]) -> String {
    let summary = summarize(profile, incomes);

    let mut lines = vec![
        format!("Тип звіту: {}", kind.name()),
        format!("ПІБ ФОП: {}", profile.name),
        format!("Група: {}", summary.group.number()),
        format!("Загальний дохід: {} UAH", summary.total_income.normalize()),
        format!("Податок до сплати: {} UAH", summary.obligation.total.round_dp(2)),
        format!("ЄСВ (щомісяця): {} UAH", summary.monthly_esv),
        format!("Кількість операцій: {}", summary.income_count),
    ];

    if summary.mixed_currency() {
        let parts: Vec<String> = summary
            .totals_by_currency
            .iter()
            .map(|(currency, amount)| format!("{} {}", amount.normalize(), currency.code()))
            .collect();
        lines.push(format!("Доходи за валютами: {}", parts.join(", ")));
    }

    lines.join("\n")
}
