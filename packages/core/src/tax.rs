// ABOUTME: Tax and revenue-limit calculations for FOP groups
// ABOUTME: Pure functions over a profile and the income list; recomputed on every view

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::{
    annual_limit, LIMIT_WARNING_PERCENT, MILITARY_LEVY_FIXED, MILITARY_LEVY_RATE_GROUP_3,
    MONTHLY_ESV, TAX_FIXED_GROUP_1, TAX_FIXED_GROUP_2,
};
use crate::types::{Currency, FopGroup, Income, UserProfile};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub const LABEL_PERCENTAGE: &str = "Податок (ЄП + 1% ВЗ)";
pub const LABEL_FIXED: &str = "Щомісячний платіж (ЄП + ВЗ)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    /// Share of the year's income (group 3)
    PercentOfIncome,
    /// Flat monthly charge (groups 1 and 2)
    FlatMonthly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxObligation {
    pub kind: ObligationKind,
    pub single_tax: Decimal,
    pub military_levy: Decimal,
    pub total: Decimal,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxSummary {
    pub group: FopGroup,
    pub total_income: Decimal,
    pub limit: Decimal,
    /// Clamped to 0..=100 for display
    pub limit_used_percent: Decimal,
    /// Unclamped; negative once the limit is exceeded
    pub limit_remaining: Decimal,
    pub obligation: TaxObligation,
    pub monthly_esv: Decimal,
    pub totals_by_currency: BTreeMap<Currency, Decimal>,
    pub income_count: usize,
}

impl TaxSummary {
    /// True when amounts in more than one currency went into `total_income`.
    /// No conversion is applied, so the total is only meaningful in one currency.
    pub fn mixed_currency(&self) -> bool {
        self.totals_by_currency.len() > 1
    }

    pub fn is_over_limit(&self) -> bool {
        self.limit_remaining < Decimal::ZERO
    }

    pub fn is_near_limit(&self) -> bool {
        is_near_limit(self.total_income, self.limit)
    }
}

/// Addition that sticks at the representable bounds instead of panicking
fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Sum of every amount, currencies ignored
pub fn total_income(incomes: &[Income]) -> Decimal {
    incomes
        .iter()
        .fold(Decimal::ZERO, |total, i| saturating_add(total, i.amount))
}

pub fn totals_by_currency(incomes: &[Income]) -> BTreeMap<Currency, Decimal> {
    let mut totals = BTreeMap::new();
    for income in incomes {
        let total = totals.entry(income.currency).or_insert(Decimal::ZERO);
        *total = saturating_add(*total, income.amount);
    }
    totals
}

/// Unclamped share of the limit in percent
pub fn limit_usage_percent(total: Decimal, limit: Decimal) -> Decimal {
    if limit.is_zero() {
        return Decimal::ZERO;
    }
    total / limit * HUNDRED
}

/// Share of the limit in percent, clamped to 0..=100
pub fn limit_used_percent(total: Decimal, limit: Decimal) -> Decimal {
    limit_usage_percent(total, limit).clamp(Decimal::ZERO, HUNDRED)
}

pub fn limit_remaining(total: Decimal, limit: Decimal) -> Decimal {
    limit - total
}

pub fn is_near_limit(total: Decimal, limit: Decimal) -> bool {
    limit_usage_percent(total, limit) > LIMIT_WARNING_PERCENT
}

/// Tax currently due for display.
///
/// Group 3 pays the single tax rate plus 1% military levy on income. Groups 1
/// and 2 owe a flat monthly single tax plus a flat military levy, even with
/// zero income.
pub fn tax_obligation(profile: &UserProfile, total: Decimal) -> TaxObligation {
    match profile.group {
        FopGroup::Group3 => {
            let single_tax = total * profile.tax_rate.fraction();
            let military_levy = total * MILITARY_LEVY_RATE_GROUP_3;
            TaxObligation {
                kind: ObligationKind::PercentOfIncome,
                single_tax,
                military_levy,
                total: single_tax + military_levy,
                label: LABEL_PERCENTAGE,
            }
        }
        FopGroup::Group1 | FopGroup::Group2 => {
            let single_tax = if profile.group == FopGroup::Group1 {
                TAX_FIXED_GROUP_1
            } else {
                TAX_FIXED_GROUP_2
            };
            TaxObligation {
                kind: ObligationKind::FlatMonthly,
                single_tax,
                military_levy: MILITARY_LEVY_FIXED,
                total: single_tax + MILITARY_LEVY_FIXED,
                label: LABEL_FIXED,
            }
        }
    }
}

pub fn monthly_esv() -> Decimal {
    MONTHLY_ESV
}

/// Everything the dashboard and reports show, from one pass over the data
pub fn summarize(profile: &UserProfile, incomes: &[Income]) -> TaxSummary {
    let total = total_income(incomes);
    let limit = annual_limit(profile.group);

    TaxSummary {
        group: profile.group,
        total_income: total,
        limit,
        limit_used_percent: limit_used_percent(total, limit),
        limit_remaining: limit_remaining(total, limit),
        obligation: tax_obligation(profile, total),
        monthly_esv: monthly_esv(),
        totals_by_currency: totals_by_currency(incomes),
        income_count: incomes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LIMIT_GROUP_2, LIMIT_GROUP_3};
    use crate::types::{IncomeSource, TaxRate};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn income(amount: Decimal, currency: Currency) -> Income {
        Income {
            id: nanoid::nanoid!(),
            amount,
            currency,
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            description: String::new(),
            source: IncomeSource::Manual,
            original_document_url: None,
        }
    }

    fn profile(group: FopGroup, tax_rate: TaxRate) -> UserProfile {
        UserProfile {
            group,
            tax_rate,
            is_onboarded: true,
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_group3_scenario() {
        let p = profile(FopGroup::Group3, TaxRate::Percent5);
        let incomes = vec![income(dec!(100000), Currency::Uah)];
        let summary = summarize(&p, &incomes);

        assert_eq!(summary.total_income, dec!(100000));
        assert_eq!(summary.obligation.single_tax, dec!(5000));
        assert_eq!(summary.obligation.military_levy, dec!(1000));
        assert_eq!(summary.obligation.total, dec!(6000));
        assert_eq!(summary.obligation.kind, ObligationKind::PercentOfIncome);
        assert_eq!(summary.obligation.label, LABEL_PERCENTAGE);
        assert_eq!(summary.limit, LIMIT_GROUP_3);
        assert_eq!(summary.limit_remaining, LIMIT_GROUP_3 - dec!(100000));
    }

    #[test]
    fn test_group3_three_percent_rate() {
        let p = profile(FopGroup::Group3, TaxRate::Percent3);
        let obligation = tax_obligation(&p, dec!(250000));
        assert_eq!(obligation.total, dec!(250000) * dec!(0.03) + dec!(2500));
    }

    #[test]
    fn test_group3_linear_in_income() {
        let p = profile(FopGroup::Group3, TaxRate::Percent5);
        for total in [dec!(0), dec!(1), dec!(12345.67), dec!(9000000)] {
            let obligation = tax_obligation(&p, total);
            assert_eq!(obligation.total, total * dec!(0.05) + total * dec!(0.01));
        }
    }

    #[test]
    fn test_fixed_groups_independent_of_income() {
        for group in [FopGroup::Group1, FopGroup::Group2] {
            let p = profile(group, TaxRate::Percent5);
            let at_zero = tax_obligation(&p, Decimal::ZERO);
            for total in [dec!(1), dec!(500000), dec!(50000000)] {
                assert_eq!(tax_obligation(&p, total), at_zero);
            }
            assert_eq!(at_zero.kind, ObligationKind::FlatMonthly);
            assert_eq!(at_zero.label, LABEL_FIXED);
        }
    }

    #[test]
    fn test_empty_list_fixed_group() {
        let p = profile(FopGroup::Group2, TaxRate::Percent5);
        let summary = summarize(&p, &[]);

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.limit_used_percent, Decimal::ZERO);
        assert_eq!(summary.obligation.total, dec!(1729.40) + dec!(864.70));
        assert!(summary.obligation.total > Decimal::ZERO);
        assert_eq!(summary.limit_remaining, LIMIT_GROUP_2);
        assert_eq!(summary.income_count, 0);
    }

    #[test]
    fn test_group1_fixed_amount() {
        let p = profile(FopGroup::Group1, TaxRate::Percent5);
        assert_eq!(tax_obligation(&p, dec!(10)).total, dec!(332.80) + dec!(864.70));
    }

    #[test]
    fn test_empty_list_percentage_group() {
        let p = profile(FopGroup::Group3, TaxRate::Percent5);
        let summary = summarize(&p, &[]);
        assert_eq!(summary.obligation.total, Decimal::ZERO);
        assert_eq!(summary.limit_used_percent, Decimal::ZERO);
    }

    #[test]
    fn test_over_limit_is_clamped_but_remaining_is_not() {
        let p = profile(FopGroup::Group1, TaxRate::Percent5);
        let incomes = vec![
            income(dec!(1000000), Currency::Uah),
            income(dec!(500000), Currency::Uah),
        ];
        let summary = summarize(&p, &incomes);

        assert_eq!(summary.limit_used_percent, dec!(100));
        assert_eq!(summary.limit_remaining, dec!(1500000) - dec!(1444049));
        assert!(summary.limit_remaining < Decimal::ZERO);
        assert!(summary.is_over_limit());
        assert!(summary.is_near_limit());
    }

    #[test]
    fn test_negative_amounts_pass_through() {
        let p = profile(FopGroup::Group3, TaxRate::Percent5);
        let incomes = vec![income(dec!(-500), Currency::Uah)];
        let summary = summarize(&p, &incomes);

        assert_eq!(summary.total_income, dec!(-500));
        assert_eq!(summary.limit_used_percent, Decimal::ZERO);
        assert_eq!(summary.limit_remaining, LIMIT_GROUP_3 + dec!(500));
    }

    #[test]
    fn test_near_limit_threshold() {
        let limit = dec!(1000);
        assert!(!is_near_limit(dec!(800), limit));
        assert!(is_near_limit(dec!(800.01), limit));
        assert_eq!(limit_used_percent(dec!(250), limit), dec!(25));
    }

    #[test]
    fn test_total_ignores_currency_but_breakdown_keeps_it() {
        let p = profile(FopGroup::Group3, TaxRate::Percent5);
        let incomes = vec![
            income(dec!(100), Currency::Usd),
            income(dec!(200), Currency::Uah),
            income(dec!(50), Currency::Usd),
        ];
        let summary = summarize(&p, &incomes);

        assert_eq!(summary.total_income, dec!(350));
        assert_eq!(summary.totals_by_currency[&Currency::Usd], dec!(150));
        assert_eq!(summary.totals_by_currency[&Currency::Uah], dec!(200));
        assert!(summary.mixed_currency());
        assert_eq!(
            summary.totals_by_currency.values().copied().sum::<Decimal>(),
            summary.total_income
        );
    }

    #[test]
    fn test_esv_is_constant() {
        for group in FopGroup::ALL {
            let p = profile(group, TaxRate::Percent5);
            assert_eq!(summarize(&p, &[]).monthly_esv, dec!(1902.34));
        }
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let huge = dec!(50000000000000000000000000000);
        let incomes = vec![income(huge, Currency::Uah), income(huge, Currency::Uah)];

        assert_eq!(total_income(&incomes), Decimal::MAX);
        assert_eq!(totals_by_currency(&incomes)[&Currency::Uah], Decimal::MAX);

        let summary = summarize(&profile(FopGroup::Group3, TaxRate::Percent5), &incomes);
        assert_eq!(summary.total_income, Decimal::MAX);
        assert_eq!(summary.limit_used_percent, dec!(100));
        assert!(summary.is_over_limit());
    }
}
