// ABOUTME: CLI commands for the income book: add, scan, list and delete
// ABOUTME: Scanned documents prefill the entry form; OCR failures fall back to manual entry

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::{Confirm, Select, Text};
use taxify_ai::{DataUri, MANUAL_ENTRY_FALLBACK_MESSAGE};
use taxify_cli::format::{format_money, truncate};
use taxify_cli::AppContext;
use taxify_core::{today, Currency, Income, IncomeDraft};
use tracing::warn;

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income manually
    Add {
        /// Amount, e.g. 1500.50
        #[arg(short, long)]
        amount: Option<String>,
        /// Currency code (UAH, USD, EUR)
        #[arg(short, long)]
        currency: Option<String>,
        /// Date of receipt (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// What the income was for
        #[arg(long)]
        description: Option<String>,
    },
    /// Read an income from a receipt, invoice or bank statement
    Scan {
        /// Image (JPG, PNG, GIF, WEBP) or PDF file
        file: PathBuf,
    },
    /// List all incomes
    List,
    /// Delete an income
    Delete {
        /// Income ID to delete
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_income_command(
    ctx: &AppContext,
    command: IncomeCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.session().require_ready().await?;

    match command {
        IncomeCommands::Add {
            amount,
            currency,
            date,
            description,
        } => add_income(ctx, amount, currency, date, description).await,
        IncomeCommands::Scan { file } => scan_income(ctx, &file).await,
        IncomeCommands::List => list_incomes(ctx).await,
        IncomeCommands::Delete { id, yes } => delete_income(ctx, &id, yes).await,
    }
}

/// Asks for every field, starting from the draft's values, until the draft validates
fn prompt_income(mut draft: IncomeDraft) -> Result<Income, Box<dyn std::error::Error>> {
    loop {
        draft.amount = Text::new("Сума:").with_default(&draft.amount).prompt()?;

        let cursor = Currency::ALL
            .iter()
            .position(|c| *c == draft.currency)
            .unwrap_or(0);
        draft.currency = Select::new("Валюта:", Currency::ALL.to_vec())
            .with_starting_cursor(cursor)
            .prompt()?;

        draft.date = Text::new("Дата (РРРР-ММ-ДД):")
            .with_default(&draft.date)
            .prompt()?;
        draft.description = Text::new("Опис:")
            .with_default(&draft.description)
            .prompt()?;

        match draft.clone().into_income() {
            Ok(income) => return Ok(income),
            Err(e) => eprintln!("{} {}", "✗".red().bold(), e),
        }
    }
}

async fn save_income(ctx: &AppContext, income: Income) -> Result<(), Box<dyn std::error::Error>> {
    let label = format_money(income.amount, income.currency);
    let id = income.id.clone();
    ctx.db.add_income(income).await?;
    println!(
        "{} Дохід {} збережено (ID: {})",
        "✓".green().bold(),
        label.bold(),
        id
    );
    Ok(())
}

async fn add_income(
    ctx: &AppContext,
    amount: Option<String>,
    currency: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut draft = IncomeDraft::new(today());
    if let Some(currency) = currency {
        draft.currency = currency.parse::<Currency>()?;
    }
    if let Some(date) = date {
        draft.date = date;
    }
    if let Some(description) = description {
        draft.description = description;
    }

    let income = match amount {
        // Everything needed came from flags
        Some(amount) => {
            draft.amount = amount;
            draft.into_income()?
        }
        None => {
            println!("{}", "Додати дохід".blue().bold());
            println!();
            prompt_income(draft)?
        }
    };

    save_income(ctx, income).await
}

async fn scan_income(ctx: &AppContext, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(file).await?;
    let document = DataUri::from_path_bytes(file, &bytes)?.to_string();

    println!("{}", "AI аналізує документ...".cyan());

    let draft = match ctx.assistant.extract_income_from_image(&document).await {
        Ok(extracted) => {
            println!("{} Документ розпізнано. Перевірте дані.", "✓".green().bold());
            extracted.into_draft(Some(document))
        }
        Err(e) => {
            warn!("Falling back to manual entry: {}", e);
            eprintln!("{}", MANUAL_ENTRY_FALLBACK_MESSAGE.red());
            IncomeDraft {
                document: Some(document),
                ..IncomeDraft::new(today())
            }
        }
    };
    println!();

    let income = prompt_income(draft)?;
    save_income(ctx, income).await
}

async fn list_incomes(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let incomes = ctx.db.get_incomes().await?;

    if incomes.is_empty() {
        println!("{}", "Доходів ще немає".yellow());
        println!("{}", "Додайте перший: taxify income add".dimmed());
        return Ok(());
    }

    println!("{}", "Книга доходів".blue().bold());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Дата", "Сума", "Опис", "Джерело"]);

    for income in &incomes {
        table.add_row(vec![
            income.id.clone(),
            income.date.format("%d.%m.%Y").to_string(),
            format_money(income.amount, income.currency),
            truncate(&income.description, 40),
            income.source.to_string(),
        ]);
    }

    println!("{}", table);
    println!("Всього: {} записів", incomes.len().to_string().cyan());

    Ok(())
}

async fn delete_income(
    ctx: &AppContext,
    id: &str,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        let confirmed = Confirm::new(&format!("Видалити дохід {}?", id))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Скасовано".dimmed());
            return Ok(());
        }
    }

    if ctx.db.delete_income(id).await? {
        println!("{} Дохід {} видалено", "✓".green().bold(), id);
    } else {
        println!("{}", format!("Дохід з ID '{}' не знайдено", id).yellow());
    }

    Ok(())
}
