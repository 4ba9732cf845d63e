// ABOUTME: Statutory FOP figures for 2026: limits, fixed payments, rates
// ABOUTME: Derived from the minimum wage and subsistence minimum as of 1 January

//! Everything is derived from the minimum wage (8 647 UAH) and the
//! subsistence minimum for able-bodied persons (3 328 UAH) as of 1 January.

use rust_decimal::Decimal;

use crate::types::FopGroup;

pub const MINIMUM_WAGE: Decimal = Decimal::from_parts(8647, 0, 0, false, 0);
pub const SUBSISTENCE_MINIMUM: Decimal = Decimal::from_parts(3328, 0, 0, false, 0);

/// Annual revenue limits: 167, 834 and 1167 minimum wages.
pub const LIMIT_GROUP_1: Decimal = Decimal::from_parts(1_444_049, 0, 0, false, 0);
pub const LIMIT_GROUP_2: Decimal = Decimal::from_parts(7_211_598, 0, 0, false, 0);
pub const LIMIT_GROUP_3: Decimal = Decimal::from_parts(10_091_049, 0, 0, false, 0);

/// Monthly single tax: 10% of the subsistence minimum.
pub const TAX_FIXED_GROUP_1: Decimal = Decimal::from_parts(33280, 0, 0, false, 2);
/// Monthly single tax: 20% of the minimum wage.
pub const TAX_FIXED_GROUP_2: Decimal = Decimal::from_parts(172940, 0, 0, false, 2);

/// Monthly military levy for groups 1 and 2: 10% of the minimum wage.
pub const MILITARY_LEVY_FIXED: Decimal = Decimal::from_parts(86470, 0, 0, false, 2);
/// Military levy for group 3, as a fraction of income.
pub const MILITARY_LEVY_RATE_GROUP_3: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Monthly social contribution: 22% of the minimum wage.
pub const MONTHLY_ESV: Decimal = Decimal::from_parts(190234, 0, 0, false, 2);

pub const TAX_RATE_5_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
pub const TAX_RATE_3_PERCENT: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Usage share (percent) above which the entrepreneur should be warned.
pub const LIMIT_WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Annual revenue limit for a group
pub fn annual_limit(group: FopGroup) -> Decimal {
    match group {
        FopGroup::Group1 => LIMIT_GROUP_1,
        FopGroup::Group2 => LIMIT_GROUP_2,
        FopGroup::Group3 => LIMIT_GROUP_3,
    }
}
