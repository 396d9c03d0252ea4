use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::company::{CompanyRef, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
use crate::knowledge::{KnowledgeItem, NewKnowledgeItem};

/// Identifier of a bot as issued by the backend.
///
/// The backend hands out UUID strings, but the console treats the id as an
/// opaque string: an empty id is representable and means "no bot selected".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(pub String);

impl BotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id carries no usable value (empty or whitespace).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BotId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A configured chat-widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    #[serde(default)]
    pub tone: Tone,
    /// Training state. Bot payloads from the backend omit it; only the
    /// status endpoint reports training progress.
    #[serde(default = "default_listed_status")]
    pub status: TrainingStatus,
    pub company: CompanyRef,
    #[serde(default)]
    pub knowledge_items: Vec<KnowledgeItem>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default, alias = "logo_url", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

fn default_listed_status() -> TrainingStatus {
    TrainingStatus::Ready
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_secondary_color() -> String {
    DEFAULT_SECONDARY_COLOR.to_string()
}

/// Conversational tone of a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Casual,
    Technical,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Casual,
        Tone::Technical,
    ];

    /// One-line description shown next to the tone in pickers.
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Professional => "Formal and business-like",
            Tone::Friendly => "Warm and approachable",
            Tone::Casual => "Relaxed and conversational",
            Tone::Technical => "Detailed and precise",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Friendly => write!(f, "friendly"),
            Tone::Casual => write!(f, "casual"),
            Tone::Technical => write!(f, "technical"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "casual" => Ok(Tone::Casual),
            "technical" => Ok(Tone::Technical),
            other => Err(format!("invalid tone: '{other}'")),
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Professional
    }
}

/// Training lifecycle of a bot.
///
/// - Training: knowledge is being ingested
/// - Ready: terminal, the widget can answer
/// - Error: terminal, training failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingStatus {
    Training,
    Ready,
    Error,
}

impl TrainingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrainingStatus::Ready | TrainingStatus::Error)
    }
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingStatus::Training => write!(f, "training"),
            TrainingStatus::Ready => write!(f, "ready"),
            TrainingStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for TrainingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "training" => Ok(TrainingStatus::Training),
            "ready" => Ok(TrainingStatus::Ready),
            "error" => Ok(TrainingStatus::Error),
            other => Err(format!("invalid training status: '{other}'")),
        }
    }
}

/// Body of `POST /bot`.
///
/// Only `company_id` is required. A missing name makes the backend fall back
/// to "{company name} Bot".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBotRequest {
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub knowledge_items: Vec<NewKnowledgeItem>,
}

/// Name the backend assigns when a bot is created without one.
pub fn default_bot_name(company_name: &str) -> String {
    format!("{company_name} Bot")
}
