// ABOUTME: CLI commands for AI-drafted reports and the income book CSV export
// ABOUTME: Files land in the current directory unless --out is given

use std::path::PathBuf;

use clap::Subcommand;
use colored::*;
use taxify_cli::AppContext;
use taxify_core::today;
use taxify_reports::{
    build_report_summary, export_income_csv, report_filename, write_report_file, ReportKind,
    CSV_FILENAME,
};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Single-tax payer declaration drafted by AI
    Declaration {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Social contribution (ЄСВ) report drafted by AI
    Esv {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Export the income book as CSV
    Csv {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

pub async fn handle_report_command(
    ctx: &AppContext,
    command: ReportCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ReportCommands::Declaration { out } => ai_report(ctx, ReportKind::Declaration, out).await,
        ReportCommands::Esv { out } => ai_report(ctx, ReportKind::Esv, out).await,
        ReportCommands::Csv { out } => csv_export(ctx, out).await,
    }
}

async fn ai_report(
    ctx: &AppContext,
    kind: ReportKind,
    out: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ctx.session().require_ready().await?;
    let incomes = ctx.db.get_incomes().await?;

    println!("{}", format!("{}: генерується AI...", kind.title()).cyan());

    let summary = build_report_summary(kind, &profile, &incomes);
    let content = ctx
        .assistant
        .generate_report_content(kind.name(), &summary)
        .await;

    let path = write_report_file(&out, &report_filename(kind, today()), &content).await?;

    println!("{} Збережено: {}", "✓".green().bold(), path.display());
    println!(
        "{}",
        "Звіти, згенеровані AI, є довідковими. Перевіряйте цифри перед подачею до податкової."
            .dimmed()
    );
    Ok(())
}

async fn csv_export(ctx: &AppContext, out: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    ctx.session().require_ready().await?;
    let incomes = ctx.db.get_incomes().await?;

    let csv = export_income_csv(&incomes)?;
    let path = write_report_file(&out, CSV_FILENAME, &csv).await?;

    println!(
        "{} Книгу доходів експортовано ({} записів): {}",
        "✓".green().bold(),
        incomes.len(),
        path.display()
    );
    Ok(())
}
