//! Bot commands: list, show, embed.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatdock_core::api::WidgetApi;
use chatdock_core::selection::bot_home_path;
use chatdock_core::widget::embed_snippet;
use chatdock_infra::filesystem::write_snippet;
use chatdock_types::bot::{Bot, BotId, TrainingStatus};

use crate::state::AppState;

/// List all bots in a table.
pub async fn list_bots(state: &AppState, json: bool) -> Result<()> {
    let bots = state.api.list_bots().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bots)?);
        return Ok(());
    }

    if bots.is_empty() {
        println!();
        println!(
            "  {} No bots found. Create one with: {}",
            style("i").blue().bold(),
            style("chatdock setup").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Company").fg(Color::White),
        Cell::new("Tone").fg(Color::White),
        Cell::new("Knowledge").fg(Color::White),
        Cell::new("Colors").fg(Color::White),
    ]);

    for bot in &bots {
        table.add_row(vec![
            Cell::new(&bot.name).fg(Color::Cyan),
            Cell::new(bot.id.as_str()).fg(Color::DarkGrey),
            Cell::new(&bot.company.name),
            Cell::new(bot.tone.to_string()),
            Cell::new(bot.knowledge_items.len()),
            Cell::new(format!("{} / {}", bot.primary_color, bot.secondary_color)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} bot{}",
        style(bots.len()).bold(),
        if bots.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show one bot with its knowledge sources.
///
/// The listed bot carries no training state, so the status line comes from
/// the status endpoint. If that fetch fails the status is shown as unknown.
pub async fn show_bot(state: &AppState, id: &str, json: bool) -> Result<()> {
    let bot = state.api.get_bot(&BotId::from(id)).await?;
    let status = match state.api.bot_status(&bot.id).await {
        Ok(response) => Some(response.training_status()),
        Err(err) => {
            tracing::debug!(bot_id = %bot.id.as_str(), "status fetch failed: {err}");
            None
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&bot_report(&bot, status)?)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&bot.name).cyan().bold());
    println!("  {}", style(&bot.company.name).dim());
    println!();

    println!("  {}", style("── Details ──").dim());
    println!("  {}       {}", style("Tone:").bold(), bot.tone);
    println!(
        "  {}     {}",
        style("Status:").bold(),
        status.map_or_else(|| format!("{}", style("? unknown").dim()), format_status)
    );
    println!(
        "  {}     {} / {}",
        style("Colors:").bold(),
        bot.primary_color,
        bot.secondary_color
    );
    if let Some(logo) = &bot.logo {
        println!("  {}       {}", style("Logo:").bold(), logo);
    }
    println!(
        "  {}         {}",
        style("ID:").bold(),
        style(bot.id.as_str()).dim()
    );
    println!(
        "  {}       {}",
        style("Home:").bold(),
        bot_home_path(&bot.id)
    );
    println!();

    println!("  {}", style("── Knowledge ──").dim());
    if bot.knowledge_items.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for item in &bot.knowledge_items {
        println!(
            "  {} {:<4}  {}",
            style("•").dim(),
            item.kind.to_string(),
            truncate(&item.content, 60)
        );
    }
    println!();

    Ok(())
}

/// Print the embed snippet, optionally writing it to a file.
pub async fn embed(state: &AppState, id: &str, out: Option<PathBuf>, json: bool) -> Result<()> {
    let bot_id = BotId::from(id);
    if bot_id.is_blank() {
        anyhow::bail!("bot id must not be empty");
    }
    let snippet = embed_snippet(&state.config.backend_url, &bot_id);

    if let Some(path) = &out {
        write_snippet(path, &snippet).await?;
        tracing::info!(path = %path.display(), "embed snippet written");
    }

    if json {
        let report = serde_json::json!({
            "bot_id": bot_id.as_str(),
            "snippet": snippet,
            "written_to": out.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Paste this before </body> on your site:").bold());
    println!();
    println!("  {}", style(&snippet).yellow());
    if let Some(path) = &out {
        println!();
        println!(
            "  {} Saved to {}",
            style("✓").green().bold(),
            style(path.display()).dim()
        );
    }
    println!();

    Ok(())
}

/// JSON view of a bot with the checked training status, `null` when unknown.
fn bot_report(bot: &Bot, status: Option<TrainingStatus>) -> Result<serde_json::Value> {
    let mut report = serde_json::to_value(bot)?;
    if let Some(fields) = report.as_object_mut() {
        fields.insert("status".to_string(), serde_json::to_value(status)?);
    }
    Ok(report)
}

pub(crate) fn format_status(status: TrainingStatus) -> String {
    match status {
        TrainingStatus::Training => format!("{}", style("◌ training").yellow()),
        TrainingStatus::Ready => format!("{}", style("● ready").green()),
        TrainingStatus::Error => format!("{}", style("✗ error").red()),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}
