//! CLI command definitions and dispatch for the `chatdock` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `chatdock list bots`, `chatdock company set`).

pub mod bot;
pub mod company;
pub mod health;
pub mod preview;
pub mod setup;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Configure, train and embed your chat widget.
#[derive(Parser)]
#[command(name = "chatdock", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend origin, e.g. http://localhost:8000 (overrides config.toml).
    #[arg(long, global = true, env = "CHATDOCK_BACKEND_URL")]
    pub backend: Option<String>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the backend API is reachable.
    Health,

    /// Show or update the company branding.
    Company {
        #[command(subcommand)]
        action: CompanyCommand,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of a bot.
    Show {
        /// Bot id to display.
        id: String,
    },

    /// Fetch the training status of a bot once.
    Status {
        /// Bot id. Defaults to the first bot.
        id: Option<String>,
    },

    /// Poll the training status of a bot until it finishes.
    Watch {
        /// Bot id. Defaults to the first bot.
        id: Option<String>,
    },

    /// Interactive two-step widget setup (branding, then knowledge).
    Setup,

    /// Print the embed snippet for a bot.
    Embed {
        /// Bot id to embed.
        id: String,

        /// Also write the snippet to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render a sample chat transcript in the brand colors.
    Preview {
        /// Primary brand color (user bubbles, send button).
        #[arg(long)]
        primary: Option<String>,

        /// Secondary brand color (bot bubbles).
        #[arg(long)]
        secondary: Option<String>,

        /// Widget title shown above the transcript.
        #[arg(long)]
        name: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CompanyCommand {
    /// Show the configured company.
    Show,

    /// Create or update the company.
    Set {
        /// Company name.
        #[arg(long)]
        name: String,

        /// Primary brand color, e.g. #4F46E5.
        #[arg(long)]
        primary: Option<String>,

        /// Secondary brand color, e.g. #10B981.
        #[arg(long)]
        secondary: Option<String>,

        /// Logo image to upload.
        #[arg(long)]
        logo: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List all bots.
    Bots,
}
