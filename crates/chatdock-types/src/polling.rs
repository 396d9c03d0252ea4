//! Training status payloads.
//!
//! `GET /bot/{id}/status` returns the bot together with every polling record
//! the training pipeline has written for it. A record whose status is
//! `ready`, `completed` or `error` (any case) is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bot::{Bot, BotId, TrainingStatus};

/// Record statuses that end a polling session.
pub const TERMINAL_STATUSES: [&str; 3] = ["ready", "completed", "error"];

/// One backend-reported snapshot of a bot's training job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingRecord {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PollingRecord {
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES
            .iter()
            .any(|s| self.status.eq_ignore_ascii_case(s))
    }

    pub fn is_ready(&self) -> bool {
        self.status.eq_ignore_ascii_case("ready") || self.status.eq_ignore_ascii_case("completed")
    }

    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }
}

/// Response of `GET /bot/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotStatusResponse {
    pub bot: Bot,
    #[serde(default)]
    pub pollings: Vec<PollingRecord>,
}

impl BotStatusResponse {
    /// Whether any record ends the polling session.
    pub fn has_terminal(&self) -> bool {
        self.pollings.iter().any(PollingRecord::is_terminal)
    }

    pub fn is_ready(&self) -> bool {
        self.pollings.iter().any(PollingRecord::is_ready)
    }

    pub fn is_error(&self) -> bool {
        self.pollings.iter().any(PollingRecord::is_failed)
    }

    /// Message of the first record with status `error`.
    pub fn error(&self) -> Option<&str> {
        self.pollings
            .iter()
            .find(|p| p.is_failed())
            .and_then(|p| p.error.as_deref())
    }

    /// Collapse the records into a single training status.
    pub fn training_status(&self) -> TrainingStatus {
        if self.is_error() {
            TrainingStatus::Error
        } else if self.is_ready() {
            TrainingStatus::Ready
        } else {
            TrainingStatus::Training
        }
    }

    /// Most recently updated record.
    pub fn latest(&self) -> Option<&PollingRecord> {
        self.pollings.iter().max_by_key(|p| p.updated_at)
    }
}

/// Flat status shape served by an earlier backend revision.
///
/// The nested [`BotStatusResponse`] is the supported contract; this type is
/// kept so stored payloads of the old shape can still be read.
#[deprecated(note = "use BotStatusResponse; the flat status shape is no longer served")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyBotStatus {
    pub id: BotId,
    pub status: TrainingStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[allow(deprecated)]
impl LegacyBotStatus {
    /// Express the flat status as a single polling record.
    pub fn into_record(self, observed_at: DateTime<Utc>) -> PollingRecord {
        let terminal = self.status.is_terminal();
        PollingRecord {
            id: 0,
            status: self.status.to_string(),
            completed: terminal,
            success: terminal.then_some(self.status == TrainingStatus::Ready),
            error: self.error,
            created_at: observed_at,
            updated_at: observed_at,
        }
    }
}
