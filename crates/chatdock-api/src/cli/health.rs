//! Backend reachability badge.

use anyhow::Result;
use console::style;

use chatdock_core::health::is_reachable;

use crate::state::AppState;

/// Probe `/health/live` and print the badge. Unreachable is not an error.
pub async fn health(state: &AppState, json: bool) -> Result<()> {
    let reachable = is_reachable(state.api.as_ref()).await;

    if json {
        let report = serde_json::json!({
            "backend": state.config.backend_url,
            "reachable": reachable,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    if reachable {
        println!(
            "  {} API reachable at {}",
            style("●").green().bold(),
            style(&state.config.backend_url).cyan()
        );
    } else {
        println!(
            "  {} API not reachable at {}",
            style("●").red().bold(),
            style(&state.config.backend_url).cyan()
        );
    }
    println!();

    Ok(())
}
