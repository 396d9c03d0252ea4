//! Interactive widget setup: branding first, then knowledge sources.
//!
//! Drives a [`ConfigWizard`] with dialoguer prompts. Failed saves keep the
//! form as entered and return to the same step.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use chatdock_core::widget::color::parse_hex_rgb;
use chatdock_core::widget::embed_snippet;
use chatdock_core::wizard::session::Session;
use chatdock_core::wizard::{ConfigWizard, SetupOutcome, WizardStep};
use chatdock_infra::filesystem::read_logo;
use chatdock_types::bot::{Tone, default_bot_name};
use chatdock_types::knowledge::KnowledgeKind;

use crate::cli::status::watch_until_settled;
use crate::state::AppState;

/// Actions offered on the knowledge step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnowledgeAction {
    Add(KnowledgeKind),
    Edit,
    Remove,
    Back,
    Create,
}

const KNOWLEDGE_ACTIONS: [(KnowledgeAction, &str); 7] = [
    (KnowledgeAction::Add(KnowledgeKind::Url), "Add a website URL"),
    (KnowledgeAction::Add(KnowledgeKind::File), "Add a file"),
    (KnowledgeAction::Add(KnowledgeKind::Text), "Add text"),
    (KnowledgeAction::Edit, "Edit an item"),
    (KnowledgeAction::Remove, "Remove an item"),
    (KnowledgeAction::Back, "Back to branding"),
    (KnowledgeAction::Create, "Create bot"),
];

/// Run the two-step setup and offer to watch training afterwards.
pub async fn setup(state: &AppState, json: bool) -> Result<()> {
    let mut wizard = ConfigWizard::new(Session::new());
    if wizard.prefill(state.api.as_ref()).await {
        println!(
            "  {} Loaded existing company {}",
            style("i").blue().bold(),
            style(&wizard.basic().company_name).cyan()
        );
    }

    let outcome = loop {
        match wizard.step() {
            WizardStep::Basic => {
                print_step_header(&wizard);
                prompt_basic(&mut wizard).await?;
                let spinner = spinner("Saving company...")?;
                let saved = wizard.submit_basic(state.api.as_ref()).await;
                spinner.finish_and_clear();
                match saved {
                    Ok(company) => println!(
                        "  {} Company {} saved",
                        style("✓").green().bold(),
                        style(&company.name).cyan()
                    ),
                    Err(err) => report_failure(&err)?,
                }
            }
            WizardStep::Knowledge => {
                print_step_header(&wizard);
                match prompt_knowledge(&mut wizard)? {
                    KnowledgeAction::Back => {
                        wizard.back();
                    }
                    KnowledgeAction::Create => {
                        let spinner = spinner("Creating bot...")?;
                        let created = wizard.submit_bot(state.api.as_ref()).await;
                        spinner.finish_and_clear();
                        match created {
                            Ok(outcome) => break outcome,
                            Err(err) => report_failure(&err)?,
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    print_outcome(state, &outcome, json)?;

    if !json
        && Confirm::new()
            .with_prompt("Watch training progress now?")
            .default(true)
            .interact()?
    {
        let snapshot = watch_until_settled(state, outcome.bot.id.clone(), true).await?;
        if snapshot.is_ready() {
            println!("  {} Training finished, the widget is live", style("✓").green().bold());
        } else if let Some(err) = snapshot.error() {
            println!("  {} Training failed: {err}", style("✗").red().bold());
        } else if let Some(err) = &snapshot.fetch_error {
            println!("  {} Status check failed: {err}", style("✗").red().bold());
        }
        println!();
    }

    Ok(())
}

async fn prompt_basic(wizard: &mut ConfigWizard) -> Result<()> {
    let current = wizard.basic().clone();

    let company_name: String = Input::new()
        .with_prompt("Company name")
        .with_initial_text(current.company_name.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("company name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let bot_name: String = Input::new()
        .with_prompt(format!(
            "Bot name (blank for \"{}\")",
            default_bot_name(company_name.trim())
        ))
        .with_initial_text(current.bot_name.clone())
        .allow_empty(true)
        .interact_text()?;

    let primary_color = prompt_color("Primary color", &current.primary_color)?;
    let secondary_color = prompt_color("Secondary color", &current.secondary_color)?;

    let logo_path: String = Input::new()
        .with_prompt("Logo file (blank to skip)")
        .allow_empty(true)
        .interact_text()?;
    let logo = if logo_path.trim().is_empty() {
        current.logo.clone()
    } else {
        let path = PathBuf::from(logo_path.trim());
        match read_logo(&path).await {
            Ok(logo) => Some(logo),
            Err(err) => {
                println!(
                    "  {} Could not read {}: {err}, continuing without a logo",
                    style("!").yellow().bold(),
                    path.display()
                );
                None
            }
        }
    };

    let tone_items: Vec<String> = Tone::ALL
        .iter()
        .map(|tone| format!("{:<13} {}", tone.to_string(), style(tone.description()).dim()))
        .collect();
    let default_tone = current
        .tone
        .and_then(|tone| Tone::ALL.iter().position(|t| *t == tone))
        .unwrap_or(0);
    let tone_index = Select::new()
        .with_prompt("Tone")
        .items(&tone_items)
        .default(default_tone)
        .interact()?;

    let basic = wizard.basic_mut();
    basic.company_name = company_name;
    basic.bot_name = bot_name;
    basic.primary_color = primary_color;
    basic.secondary_color = secondary_color;
    basic.logo = logo;
    basic.tone = Tone::ALL.get(tone_index).copied();

    Ok(())
}

fn prompt_color(prompt: &str, current: &str) -> Result<String> {
    let color: String = Input::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_color(input) {
                Ok(())
            } else {
                Err("expected a hex color like #4F46E5")
            }
        })
        .interact_text()?;
    Ok(color.trim().to_string())
}

fn prompt_knowledge(wizard: &mut ConfigWizard) -> Result<KnowledgeAction> {
    print_knowledge(wizard);

    let labels: Vec<&str> = KNOWLEDGE_ACTIONS.iter().map(|(_, label)| *label).collect();
    let index = Select::new()
        .with_prompt("Knowledge sources")
        .items(&labels)
        .default(0)
        .interact()?;
    let action = KNOWLEDGE_ACTIONS
        .get(index)
        .map(|(action, _)| *action)
        .unwrap_or(KnowledgeAction::Create);

    match action {
        KnowledgeAction::Add(kind) => {
            let content: String = Input::new()
                .with_prompt(content_prompt(kind))
                .allow_empty(true)
                .interact_text()?;
            let list = wizard.knowledge_mut();
            let id = list.add(kind);
            list.update(id, content.trim());
        }
        KnowledgeAction::Edit => {
            if let Some(index) = pick_item(wizard, "Edit which item?")? {
                let item = wizard.knowledge().items()[index].clone();
                let content: String = Input::new()
                    .with_prompt(content_prompt(item.kind))
                    .with_initial_text(item.content)
                    .allow_empty(true)
                    .interact_text()?;
                wizard.knowledge_mut().update(item.id, content.trim());
            }
        }
        KnowledgeAction::Remove => {
            if let Some(index) = pick_item(wizard, "Remove which item?")? {
                let id = wizard.knowledge().items()[index].id;
                wizard.knowledge_mut().remove(id);
            }
        }
        KnowledgeAction::Back | KnowledgeAction::Create => {}
    }

    Ok(action)
}

fn pick_item(wizard: &ConfigWizard, prompt: &str) -> Result<Option<usize>> {
    let items = wizard.knowledge().items();
    if items.is_empty() {
        println!("  {} No knowledge items yet", style("i").blue().bold());
        return Ok(None);
    }
    let labels: Vec<String> = items
        .iter()
        .map(|item| format!("[{}] {}", item.kind, item.content))
        .collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(index)
}

fn content_prompt(kind: KnowledgeKind) -> &'static str {
    match kind {
        KnowledgeKind::Url => "Website URL",
        KnowledgeKind::File => "File reference",
        KnowledgeKind::Text => "Text content",
    }
}

fn is_valid_color(input: &str) -> bool {
    let input = input.trim();
    input.starts_with('#') && parse_hex_rgb(input).is_some()
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}

fn print_step_header(wizard: &ConfigWizard) {
    let step = wizard.step();
    let title = match step {
        WizardStep::Basic => "Basic Information",
        WizardStep::Knowledge => "Knowledge Base",
    };
    println!();
    println!(
        "  {} {}",
        style(format!("Step {} of 2", step.number())).dim(),
        style(title).bold()
    );
    println!();
}

fn print_knowledge(wizard: &ConfigWizard) {
    let items = wizard.knowledge().items();
    if items.is_empty() {
        println!("  {}", style("(no knowledge sources yet)").dim());
    }
    for (i, item) in items.iter().enumerate() {
        let content = if item.content.is_empty() {
            style("(empty)".to_string()).dim()
        } else {
            style(item.content.clone())
        };
        println!("  {}. [{}] {}", i + 1, item.kind, content);
    }
    println!();
}

fn report_failure(err: &dyn std::error::Error) -> Result<()> {
    println!("  {} {err}", style("✗").red().bold());
    let retry = Confirm::new()
        .with_prompt("Try again?")
        .default(true)
        .interact()?;
    if retry {
        Ok(())
    } else {
        anyhow::bail!("setup aborted")
    }
}

fn print_outcome(state: &AppState, outcome: &SetupOutcome, json: bool) -> Result<()> {
    let snippet = embed_snippet(&state.config.backend_url, &outcome.bot.id);

    if json {
        let report = serde_json::json!({
            "bot": outcome.bot,
            "redirect": outcome.redirect,
            "embed": snippet,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Bot {} created",
        style("✓").green().bold(),
        style(&outcome.bot.name).cyan()
    );
    println!(
        "  {}  {}",
        style("Home:").bold(),
        style(&outcome.redirect).dim()
    );
    println!();
    println!("  {}", style("Embed it on your site:").bold());
    println!("  {}", style(&snippet).yellow());
    println!();
    Ok(())
}
