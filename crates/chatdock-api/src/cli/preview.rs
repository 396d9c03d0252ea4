//! Chat preview: a sample transcript drawn in the brand colors.
//!
//! User bubbles use the primary color, bot bubbles the secondary color, and
//! the text on each picks black or white for contrast.

use anyhow::Result;
use console::style;
use crossterm::style::{Color, Stylize};

use chatdock_core::api::WidgetApi;
use chatdock_core::widget::color::{contrast_color, parse_hex_rgb};
use chatdock_types::company::{DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sender {
    Bot,
    User,
}

pub(crate) struct SampleMessage {
    pub sender: Sender,
    pub text: &'static str,
    pub time: &'static str,
}

pub(crate) const TRANSCRIPT: [SampleMessage; 3] = [
    SampleMessage {
        sender: Sender::Bot,
        text: "Hello! I'm your AI assistant. How can I help you today?",
        time: "10:00 AM",
    },
    SampleMessage {
        sender: Sender::User,
        text: "I need help setting up my chatbot configuration",
        time: "10:01 AM",
    },
    SampleMessage {
        sender: Sender::Bot,
        text: "I'd be happy to help you with that! Let me guide you through the configuration process.",
        time: "10:01 AM",
    },
];

/// Resolved colors of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Palette {
    pub primary: String,
    pub secondary: String,
}

impl Palette {
    /// Background and text color of a bubble.
    pub(crate) fn bubble(&self, sender: Sender) -> (&str, &'static str) {
        let background = match sender {
            Sender::User => self.primary.as_str(),
            Sender::Bot => self.secondary.as_str(),
        };
        (background, contrast_color(Some(background)))
    }
}

/// Render the preview. Missing colors come from the configured company,
/// then the form defaults.
pub async fn preview(
    state: &AppState,
    primary: Option<String>,
    secondary: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let company = if primary.is_none() || secondary.is_none() || name.is_none() {
        state.api.get_company().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "error fetching company, using default colors");
            None
        })
    } else {
        None
    };

    let palette = Palette {
        primary: pick_color(
            primary.or_else(|| company.as_ref().map(|c| c.primary_color.clone())),
            DEFAULT_PRIMARY_COLOR,
        ),
        secondary: pick_color(
            secondary.or_else(|| company.as_ref().map(|c| c.secondary_color.clone())),
            DEFAULT_SECONDARY_COLOR,
        ),
    };
    let title = name
        .or_else(|| company.as_ref().map(|c| c.name.clone()))
        .unwrap_or_else(|| "Chatbot Interface".to_string());

    println!();
    println!("  {}", style(title).bold());
    println!(
        "  {}",
        style(format!("primary {}  secondary {}", palette.primary, palette.secondary)).dim()
    );
    println!();

    for message in &TRANSCRIPT {
        let (background, text) = palette.bubble(message.sender);
        let bubble = format!(" {} ", message.text)
            .with(to_color(text))
            .on(to_color(background));
        let time = style(message.time).dim();
        match message.sender {
            Sender::Bot => println!("  {bubble}  {time}"),
            Sender::User => println!("      {time}  {bubble}"),
        }
        println!();
    }

    let (background, text) = palette.bubble(Sender::User);
    println!(
        "  {}  {}",
        style("Type your message...").dim(),
        " Send ".with(to_color(text)).on(to_color(background))
    );
    println!();

    Ok(())
}

/// Use `candidate` when it is a valid six-digit hex color, else `fallback`.
pub(crate) fn pick_color(candidate: Option<String>, fallback: &str) -> String {
    match candidate {
        Some(color) if parse_hex_rgb(&color).is_some() => color,
        Some(color) => {
            tracing::warn!(color = %color, "invalid color, using {fallback}");
            fallback.to_string()
        }
        None => fallback.to_string(),
    }
}

fn to_color(hex: &str) -> Color {
    match parse_hex_rgb(hex) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}
