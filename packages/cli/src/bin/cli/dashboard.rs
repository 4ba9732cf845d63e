// ABOUTME: Dashboard command: income total, tax due, limit gauge and social contribution
// ABOUTME: Ends with the three newest incomes and a short AI status message

use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use taxify_cli::format::{format_money, format_percent, format_uah, limit_bar, truncate};
use taxify_cli::AppContext;
use taxify_core::{summarize, Income, TaxSummary, UserProfile};

const RECENT_INCOMES: usize = 3;
const LIMIT_BAR_WIDTH: usize = 30;

fn print_summary(summary: &TaxSummary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Показник", "Значення"]);
    table.add_row(vec![
        "Загальний дохід".to_string(),
        format_uah(summary.total_income),
    ]);
    table.add_row(vec![
        summary.obligation.label.to_string(),
        format_uah(summary.obligation.total),
    ]);
    table.add_row(vec!["ЄСВ (щомісяця)".to_string(), format_uah(summary.monthly_esv)]);
    table.add_row(vec![
        format!("Ліміт ({})", summary.group),
        format_uah(summary.limit),
    ]);
    table.add_row(vec![
        "Залишок ліміту".to_string(),
        format_uah(summary.limit_remaining),
    ]);

    println!("{}", table);

    let bar = limit_bar(summary.limit_used_percent, LIMIT_BAR_WIDTH);
    let gauge = format!("{} {}", bar, format_percent(summary.limit_used_percent));
    let gauge = if summary.is_over_limit() {
        gauge.red().bold()
    } else if summary.is_near_limit() {
        gauge.yellow().bold()
    } else {
        gauge.green()
    };
    println!("Використано ліміту: {}", gauge);

    if summary.is_over_limit() {
        println!(
            "{}",
            "Ліміт доходу перевищено! Потрібно перейти на іншу групу.".red().bold()
        );
    } else if summary.is_near_limit() {
        println!("{}", "Увага: використано понад 80% ліміту.".yellow());
    }

    if summary.mixed_currency() {
        let parts: Vec<String> = summary
            .totals_by_currency
            .iter()
            .map(|(currency, amount)| format_money(*amount, *currency))
            .collect();
        println!(
            "{} {}",
            "Доходи в різних валютах підсумовано без конвертації:".yellow(),
            parts.join(", ")
        );
    }
}

fn print_recent(incomes: &[Income]) {
    println!();
    println!("{}", "Останні доходи".blue().bold());

    if incomes.is_empty() {
        println!("{}", "Доходів ще немає. Додайте: taxify income add".dimmed());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Дата", "Сума", "Опис"]);

    for income in incomes.iter().take(RECENT_INCOMES) {
        table.add_row(vec![
            income.date.format("%d.%m.%Y").to_string(),
            format_money(income.amount, income.currency),
            truncate(&income.description, 40),
        ]);
    }

    println!("{}", table);
}

async fn print_advice(ctx: &AppContext, profile: &UserProfile, summary: &TaxSummary) {
    let advice = ctx
        .assistant
        .generate_tax_advice(profile, summary.total_income)
        .await;
    println!();
    println!("{} {}", "AI:".magenta().bold(), advice);
}

pub async fn show_dashboard(
    ctx: &AppContext,
    with_advice: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ctx.session().require_ready().await?;
    let incomes = ctx.db.get_incomes().await?;
    let summary = summarize(&profile, &incomes);

    println!(
        "{}",
        format!("Вітаємо, {}! {}, {}", profile.name, profile.group, profile.tax_rate)
            .blue()
            .bold()
    );
    println!();

    print_summary(&summary);
    print_recent(&incomes);

    if with_advice {
        print_advice(ctx, &profile, &summary).await;
    }

    Ok(())
}
