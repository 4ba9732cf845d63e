use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::income::IncomeCommands;
use cli::report::ReportCommands;
use taxify_cli::AppContext;

#[derive(Parser)]
#[command(name = "taxify")]
#[command(about = "Taxify - податковий помічник для ФОП")]
#[command(version)]
struct Cli {
    /// Directory with stored data (overrides TAXIFY_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with Google
    Login {
        /// Display name of the account
        #[arg(long)]
        name: Option<String>,
        /// Account email
        #[arg(long)]
        email: Option<String>,
        /// Avatar URL
        #[arg(long)]
        photo_url: Option<String>,
    },
    /// Sign out and forget the profile
    Logout,
    /// Set the FOP group, tax rate and employees
    Onboard {
        /// FOP group (1, 2 or 3)
        #[arg(long)]
        group: Option<u8>,
        /// Single-tax rate in percent for group 3 (5 or 3)
        #[arg(long)]
        rate: Option<u8>,
        /// The FOP has hired employees
        #[arg(long)]
        employees: bool,
    },
    /// Show income totals, taxes and the limit
    Dashboard {
        /// Skip the AI status message
        #[arg(long)]
        no_advice: bool,
    },
    /// Manage the income book
    #[command(subcommand)]
    Income(IncomeCommands),
    /// Generate reports and exports
    #[command(subcommand)]
    Report(ReportCommands),
    /// Show notifications
    Alerts,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match handle_command(cli).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = AppContext::load(cli.data_dir)?;

    match cli.command {
        Commands::Login {
            name,
            email,
            photo_url,
        } => cli::session::login(&ctx, name, email, photo_url).await,
        Commands::Logout => cli::session::logout(&ctx).await,
        Commands::Onboard {
            group,
            rate,
            employees,
        } => cli::session::onboard(&ctx, group, rate, employees).await,
        Commands::Dashboard { no_advice } => cli::dashboard::show_dashboard(&ctx, !no_advice).await,
        Commands::Income(income_cmd) => cli::income::handle_income_command(&ctx, income_cmd).await,
        Commands::Report(report_cmd) => cli::report::handle_report_command(&ctx, report_cmd).await,
        Commands::Alerts => cli::alerts::list_alerts(&ctx).await,
    }
}
