//! chatdock CLI entry point.
//!
//! Binary name: `chatdock`
//!
//! Parses CLI arguments, loads the client configuration, then dispatches to
//! the appropriate command handler against the widget backend.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatdock_observe::tracing_setup::{filter_directive, init_tracing, shutdown_tracing};
use cli::{Cli, Commands, CompanyCommand, ListResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set.
    if let Err(e) = init_tracing(filter_directive(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatdock", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.backend.as_deref()).await?;
    let result = run(&state, cli).await;

    shutdown_tracing();
    result
}

async fn run(state: &AppState, cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Health => cli::health::health(state, cli.json).await,

        Commands::Company { action } => match action {
            CompanyCommand::Show => cli::company::show_company(state, cli.json).await,
            CompanyCommand::Set {
                name,
                primary,
                secondary,
                logo,
            } => cli::company::set_company(state, name, primary, secondary, logo, cli.json).await,
        },

        Commands::List { resource } => match resource {
            ListResource::Bots => cli::bot::list_bots(state, cli.json).await,
        },

        Commands::Show { id } => cli::bot::show_bot(state, &id, cli.json).await,

        Commands::Status { id } => cli::status::status(state, id, cli.json).await,

        Commands::Watch { id } => cli::status::watch(state, id, cli.json, cli.quiet).await,

        Commands::Setup => cli::setup::setup(state, cli.json).await,

        Commands::Embed { id, out } => cli::bot::embed(state, &id, out, cli.json).await,

        Commands::Preview {
            primary,
            secondary,
            name,
        } => cli::preview::preview(state, primary, secondary, name).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
