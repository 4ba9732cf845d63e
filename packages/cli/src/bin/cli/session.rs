// ABOUTME: CLI commands for sign-in, sign-out and onboarding
// ABOUTME: Onboarding is interactive unless the group is passed as a flag

use colored::*;
use inquire::{Confirm, Select};
use taxify_auth::{GoogleIdentity, OnboardingInput, SessionState};
use taxify_cli::AppContext;
use taxify_core::{FopGroup, TaxRate};

pub async fn login(
    ctx: &AppContext,
    name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.session();
    let defaults = GoogleIdentity::default();
    let identity = GoogleIdentity {
        name: name.unwrap_or(defaults.name),
        email: email.unwrap_or(defaults.email),
        photo_url: photo_url.or(defaults.photo_url),
    };

    println!("{}", "Вхід через Google...".cyan());
    let profile = session.login_with_google(identity).await?;

    println!(
        "{} Ви увійшли як {} <{}>",
        "✓".green().bold(),
        profile.name.bold(),
        profile.email.as_deref().unwrap_or_default()
    );

    match SessionState::of(&profile) {
        SessionState::NeedsOnboarding => {
            println!("{}", "Налаштуйте профіль: taxify onboard".dimmed());
        }
        SessionState::Ready => {
            println!("{}", "Перегляньте стан: taxify dashboard".dimmed());
        }
        SessionState::LoggedOut => {}
    }

    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.session();
    session.require_authenticated().await?;
    session.logout().await?;
    println!("{} Ви вийшли з акаунта", "✓".green().bold());
    Ok(())
}

fn rate_from_percent(percent: u8) -> Result<TaxRate, String> {
    match percent {
        5 => Ok(TaxRate::Percent5),
        3 => Ok(TaxRate::Percent3),
        other => Err(format!("Unsupported tax rate {}%. Use 5 or 3", other)),
    }
}

fn prompt_onboarding() -> Result<OnboardingInput, Box<dyn std::error::Error>> {
    let group = Select::new("Група ФОП:", FopGroup::ALL.to_vec())
        .with_starting_cursor(2)
        .prompt()?;

    let tax_rate = if group == FopGroup::Group3 {
        Some(
            Select::new(
                "Ставка єдиного податку:",
                vec![TaxRate::Percent5, TaxRate::Percent3],
            )
            .with_help_message("3% - платник ПДВ")
            .prompt()?,
        )
    } else {
        None
    };

    let has_employees = if group == FopGroup::Group1 {
        false
    } else {
        Confirm::new("Чи є наймані працівники?")
            .with_default(false)
            .prompt()?
    };

    Ok(OnboardingInput {
        group,
        tax_rate,
        has_employees,
    })
}

pub async fn onboard(
    ctx: &AppContext,
    group: Option<u8>,
    rate: Option<u8>,
    employees: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.session();
    let profile = session.require_authenticated().await?;

    println!("{}", format!("Налаштування профілю - {}", profile.name).blue().bold());
    println!();

    let input = match group {
        Some(group) => OnboardingInput {
            group: FopGroup::try_from(group)?,
            tax_rate: rate.map(rate_from_percent).transpose()?,
            has_employees: employees,
        },
        None => prompt_onboarding()?,
    };

    let profile = session.complete_onboarding(input).await?;

    println!(
        "{} {}, ставка {}, працівники: {}",
        "✓".green().bold(),
        profile.group,
        profile.tax_rate,
        if profile.has_employees { "так" } else { "ні" }
    );
    println!("{}", "Перегляньте стан: taxify dashboard".dimmed());
    Ok(())
}
