// ABOUTME: Terminal formatting helpers for money, percentages and text
// ABOUTME: Amounts use a space as thousands separator, as on Ukrainian tax forms

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use taxify_core::Currency;

/// `1234567.891` -> `1 234 567.89`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!("{}{}.{}", sign, grouped, fraction)
}

pub fn format_money(amount: Decimal, currency: Currency) -> String {
    format!("{} {}", format_amount(amount), currency.symbol())
}

pub fn format_uah(amount: Decimal) -> String {
    format_money(amount, Currency::Uah)
}

pub fn format_percent(percent: Decimal) -> String {
    format!("{:.1}%", percent.round_dp(1))
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Text progress bar for the limit gauge
pub fn limit_bar(percent: Decimal, width: usize) -> String {
    let percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (percent * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
