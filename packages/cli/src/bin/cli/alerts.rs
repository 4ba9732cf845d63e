// ABOUTME: CLI command listing stored notifications
// ABOUTME: Unread alerts are highlighted, newest first as stored

use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use taxify_cli::AppContext;
use taxify_core::{Alert, AlertLevel};

fn level_text(level: AlertLevel) -> ColoredString {
    match level {
        AlertLevel::Info => "інфо".cyan(),
        AlertLevel::Warning => "увага".yellow(),
        AlertLevel::Critical => "критично".red().bold(),
    }
}

fn alert_row(alert: &Alert) -> Vec<String> {
    let created = alert
        .created_at
        .as_deref()
        .unwrap_or("-")
        .to_string();
    let message = if alert.is_read {
        alert.message.clone()
    } else {
        alert.message.bold().to_string()
    };
    vec![
        level_text(alert.level).to_string(),
        message,
        created,
        if alert.is_read { "так" } else { "ні" }.to_string(),
    ]
}

pub async fn list_alerts(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    ctx.session().require_ready().await?;
    let alerts = ctx.db.get_alerts().await?;

    if alerts.is_empty() {
        println!("{}", "Сповіщень немає".green());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Рівень", "Повідомлення", "Створено", "Прочитано"]);

    for alert in &alerts {
        table.add_row(alert_row(alert));
    }

    println!("{}", table);
    let unread = alerts.iter().filter(|a| !a.is_read).count();
    println!("Непрочитаних: {}", unread.to_string().cyan());
    Ok(())
}
