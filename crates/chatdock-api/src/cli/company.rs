//! Company branding commands: show, set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chatdock_core::api::WidgetApi;
use chatdock_core::widget::contrast_color;
use chatdock_infra::filesystem::read_logo;
use chatdock_types::company::{Company, CompanyUpsert};

use crate::state::AppState;

/// Show the configured company, or a hint when there is none yet.
pub async fn show_company(state: &AppState, json: bool) -> Result<()> {
    let company = state.api.get_company().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&company)?);
        return Ok(());
    }

    match company {
        Some(company) => print_company(&company),
        None => {
            println!();
            println!(
                "  {} No company configured yet. Run: {}",
                style("i").blue().bold(),
                style("chatdock setup").yellow()
            );
            println!();
        }
    }
    Ok(())
}

/// Create or update the company in one multipart upsert.
pub async fn set_company(
    state: &AppState,
    name: String,
    primary: Option<String>,
    secondary: Option<String>,
    logo: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let logo = match logo {
        Some(path) => Some(
            read_logo(&path)
                .await
                .with_context(|| format!("failed to read logo {}", path.display()))?,
        ),
        None => None,
    };

    let upsert = CompanyUpsert {
        name,
        primary_color: primary,
        secondary_color: secondary,
        logo,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Saving company...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.api.upsert_company(&upsert).await;
    spinner.finish_and_clear();
    let company = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&company)?);
        return Ok(());
    }

    println!();
    println!("  {} Company saved", style("✓").green().bold());
    print_company(&company);
    Ok(())
}

fn print_company(company: &Company) {
    println!();
    println!("  {}", style(&company.name).cyan().bold());
    println!();
    println!("  {}", style("── Branding ──").dim());
    println!(
        "  {}    {} (text {})",
        style("Primary:").bold(),
        company.primary_color,
        contrast_color(Some(&company.primary_color))
    );
    println!(
        "  {}  {} (text {})",
        style("Secondary:").bold(),
        company.secondary_color,
        contrast_color(Some(&company.secondary_color))
    );
    if let Some(logo) = &company.logo {
        println!("  {}       {}", style("Logo:").bold(), logo);
    }
    println!(
        "  {}         {}",
        style("ID:").bold(),
        style(&company.id).dim()
    );
    println!();
}
