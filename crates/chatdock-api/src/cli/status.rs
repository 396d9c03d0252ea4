//! Training status commands: one-shot `status` and polling `watch`.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chatdock_core::api::WidgetApi;
use chatdock_core::poller::{PollSnapshot, StatusPoller};
use chatdock_core::selection::select_bot;
use chatdock_types::bot::BotId;
use chatdock_types::polling::BotStatusResponse;

use crate::cli::bot::format_status;
use crate::state::AppState;

/// Pick the bot to report on: the given id, otherwise the first bot.
pub async fn resolve_bot_id(state: &AppState, id: Option<String>) -> Result<BotId> {
    if let Some(id) = id.map(BotId::from).filter(|id| !id.is_blank()) {
        return Ok(id);
    }

    let bots = state.api.list_bots().await?;
    match select_bot(&bots, None) {
        Some(bot) => Ok(bot.id.clone()),
        None => anyhow::bail!("no bots found, create one with `chatdock setup`"),
    }
}

/// Fetch the status once and print it.
pub async fn status(state: &AppState, id: Option<String>, json: bool) -> Result<()> {
    let bot_id = resolve_bot_id(state, id).await?;
    let status = state.api.bot_status(&bot_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    print_status(&status);
    Ok(())
}

/// Poll until the bot reaches a terminal status, the fetch fails or the
/// user interrupts.
pub async fn watch(state: &AppState, id: Option<String>, json: bool, quiet: bool) -> Result<()> {
    let bot_id = resolve_bot_id(state, id).await?;
    let snapshot = watch_until_settled(state, bot_id, !(json || quiet)).await?;

    if json {
        let report = serde_json::json!({
            "bot_id": snapshot.bot_id.as_ref().map(BotId::as_str),
            "settled": snapshot.is_settled(),
            "fetch_error": snapshot.fetch_error,
            "status": snapshot.status,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(err) = &snapshot.fetch_error {
        anyhow::bail!("status check failed: {err}");
    }
    match &snapshot.status {
        Some(status) => print_status(status),
        None => println!("  {} Stopped before the first status arrived", style("i").blue().bold()),
    }
    Ok(())
}

/// Drive a [`StatusPoller`] for `bot_id` and return its final snapshot.
pub(crate) async fn watch_until_settled(
    state: &AppState,
    bot_id: BotId,
    show_spinner: bool,
) -> Result<PollSnapshot> {
    let mut poller = StatusPoller::new(state.api.clone(), state.config.poll_interval());
    let mut rx = poller.subscribe();
    poller.watch(Some(bot_id));

    let spinner = if show_spinner {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    } else {
        ProgressBar::hidden()
    };

    let snapshot = loop {
        let snapshot = rx.borrow_and_update().clone();
        spinner.set_message(progress_message(&snapshot));
        if !snapshot.is_polling {
            break snapshot;
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break poller.snapshot();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, polling cancelled");
                poller.cancel();
                break poller.snapshot();
            }
        }
    };

    spinner.finish_and_clear();
    Ok(snapshot)
}

/// One-line progress text for a snapshot.
pub(crate) fn progress_message(snapshot: &PollSnapshot) -> String {
    let Some(bot_id) = &snapshot.bot_id else {
        return "No bot selected".to_string();
    };
    match &snapshot.status {
        None => format!("Checking training status of {bot_id}..."),
        Some(status) => {
            let latest = status
                .latest()
                .map(|record| record.status.as_str())
                .unwrap_or("pending");
            format!(
                "{}: {latest} ({} update{})",
                status.bot.name,
                status.pollings.len(),
                if status.pollings.len() == 1 { "" } else { "s" }
            )
        }
    }
}

fn print_status(status: &BotStatusResponse) {
    println!();
    println!(
        "  {}  {}",
        style(&status.bot.name).cyan().bold(),
        format_status(status.training_status())
    );
    if let Some(err) = status.error() {
        println!("  {} {}", style("✗").red().bold(), err);
    }
    println!();

    for record in &status.pollings {
        println!(
            "  {} {:<10} {}",
            style("•").dim(),
            record.status,
            style(record.updated_at.format("%Y-%m-%d %H:%M:%S")).dim()
        );
    }
    if !status.pollings.is_empty() {
        println!();
    }
}
