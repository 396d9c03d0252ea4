//! The value the status poller publishes to observers.

use chatdock_types::bot::BotId;
use chatdock_types::polling::BotStatusResponse;

/// Replace-whole view of one polling session.
///
/// Observers never see a partially merged snapshot: every publication swaps
/// the whole value. `generation` identifies the session that produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PollSnapshot {
    /// Bot being polled, `None` when nothing is selected.
    pub bot_id: Option<BotId>,
    /// Latest status response for `bot_id`, `None` until the first fetch lands.
    pub status: Option<BotStatusResponse>,
    /// True only while a fetch-or-wait cycle is active.
    pub is_polling: bool,
    /// Message of the fetch failure that ended the session, if any.
    pub fetch_error: Option<String>,
    pub(crate) generation: u64,
}

impl PollSnapshot {
    pub(crate) fn idle(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub(crate) fn started(generation: u64, bot_id: BotId) -> Self {
        Self {
            bot_id: Some(bot_id),
            status: None,
            is_polling: true,
            fetch_error: None,
            generation,
        }
    }

    /// Session counter of the poller that published this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Any record reports `ready` or `completed`.
    pub fn is_ready(&self) -> bool {
        self.status.as_ref().is_some_and(BotStatusResponse::is_ready)
    }

    /// Any record reports `error`.
    pub fn is_error(&self) -> bool {
        self.status.as_ref().is_some_and(BotStatusResponse::is_error)
    }

    /// Message of the first `error` record.
    pub fn error(&self) -> Option<&str> {
        self.status.as_ref().and_then(BotStatusResponse::error)
    }

    /// The session reached a terminal record or stopped on a fetch failure.
    pub fn is_settled(&self) -> bool {
        !self.is_polling && (self.status.as_ref().is_some_and(BotStatusResponse::has_terminal) || self.fetch_error.is_some())
    }
}
