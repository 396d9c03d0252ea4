//! Bot training status poller.
//!
//! [`StatusPoller`] is a handle owning at most one background polling loop.
//! `watch(Some(id))` fetches the bot's status immediately, then every
//! `interval` until a polling record reaches a terminal status. Every fetch
//! result is published as a whole [`PollSnapshot`] on a `tokio::sync::watch`
//! channel.
//!
//! Each loop captures a generation number and a `CancellationToken`.
//! Publication re-checks the generation under the channel's write lock, so a
//! response that lands after `watch`/`cancel`/drop is dropped instead of
//! overwriting the newer session. Cancellation is cooperative: an in-flight
//! request runs to completion and only its result is discarded.

mod snapshot;

pub use snapshot::PollSnapshot;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use chatdock_types::bot::BotId;
use chatdock_types::config::DEFAULT_POLL_INTERVAL_MS;

use crate::api::WidgetApi;

/// Default delay between two fetches of the same bot.
pub const POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

struct ActiveLoop {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Handle owning the polling loop for one selected bot.
///
/// Must be driven from within a Tokio runtime: `watch` spawns a task.
/// Dropping the handle cancels the loop.
pub struct StatusPoller<A: WidgetApi + 'static> {
    api: Arc<A>,
    interval: Duration,
    state: Arc<watch::Sender<PollSnapshot>>,
    generation: u64,
    active: Option<ActiveLoop>,
}

impl<A: WidgetApi + 'static> StatusPoller<A> {
    /// Create an idle poller that waits `interval` between fetches.
    pub fn new(api: Arc<A>, interval: Duration) -> Self {
        let (state, _) = watch::channel(PollSnapshot::idle(0));
        Self {
            api,
            interval,
            state: Arc::new(state),
            generation: 0,
            active: None,
        }
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.state.subscribe()
    }

    /// Clone of the latest published snapshot.
    pub fn snapshot(&self) -> PollSnapshot {
        self.state.borrow().clone()
    }

    /// Current session generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a loop is still fetching or waiting.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    /// Start a new polling session for `bot_id`, ending the previous one.
    ///
    /// A missing or blank id clears the published status and issues no
    /// request. Returns the generation of the new session.
    pub fn watch(&mut self, bot_id: Option<BotId>) -> u64 {
        self.stop_active();
        self.generation += 1;
        let generation = self.generation;

        let Some(bot_id) = bot_id.filter(|id| !id.is_blank()) else {
            tracing::debug!(generation, "no bot selected, status cleared");
            self.state.send_replace(PollSnapshot::idle(generation));
            return generation;
        };

        self.state
            .send_replace(PollSnapshot::started(generation, bot_id.clone()));

        let cancel = CancellationToken::new();
        let session = PollSession {
            api: self.api.clone(),
            state: self.state.clone(),
            bot_id,
            generation,
            interval: self.interval,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(session.run());
        self.active = Some(ActiveLoop { cancel, handle });

        generation
    }

    /// Abandon the current session. The last status stays visible but
    /// `is_polling` turns false and nothing further is published.
    pub fn cancel(&mut self) {
        if self.stop_active() {
            self.generation += 1;
            let generation = self.generation;
            self.state.send_modify(|snapshot| {
                snapshot.generation = generation;
                snapshot.is_polling = false;
            });
        }
    }

    /// Wait until the current session stops on its own (terminal record or
    /// fetch failure) and return the final snapshot.
    pub async fn settled(&self) -> PollSnapshot {
        let generation = self.generation;
        let mut rx = self.subscribe();
        let settled = match rx
            .wait_for(|snapshot| snapshot.generation != generation || !snapshot.is_polling)
            .await
        {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Cancel the running loop, if any. Returns whether one was running.
    fn stop_active(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.cancel.cancel();
                !active.handle.is_finished()
            }
            None => false,
        }
    }
}

impl<A: WidgetApi + 'static> Drop for StatusPoller<A> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
        }
    }
}

/// State captured by one polling loop.
struct PollSession<A: WidgetApi + 'static> {
    api: Arc<A>,
    state: Arc<watch::Sender<PollSnapshot>>,
    bot_id: BotId,
    generation: u64,
    interval: Duration,
    cancel: CancellationToken,
}

impl<A: WidgetApi + 'static> PollSession<A> {
    async fn run(self) {
        tracing::debug!(bot_id = %self.bot_id, generation = self.generation, "status polling started");

        loop {
            let result = self.api.bot_status(&self.bot_id).await;

            if !self.is_live() {
                tracing::debug!(bot_id = %self.bot_id, generation = self.generation, "discarding status for abandoned session");
                return;
            }

            match result {
                Ok(response) => {
                    let terminal = response.has_terminal();
                    let published = self.publish(|snapshot| {
                        snapshot.status = Some(response);
                        if terminal {
                            snapshot.is_polling = false;
                        }
                    });
                    if !published {
                        return;
                    }
                    if terminal {
                        tracing::info!(bot_id = %self.bot_id, "bot training reached a terminal status");
                        return;
                    }
                }
                Err(err) => {
                    tracing::error!(bot_id = %self.bot_id, error = %err, "error polling bot status");
                    self.publish(|snapshot| {
                        snapshot.is_polling = false;
                        snapshot.fetch_error = Some(err.to_string());
                    });
                    return;
                }
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    fn is_live(&self) -> bool {
        !self.cancel.is_cancelled() && self.state.borrow().generation == self.generation
    }

    /// Apply `update` only if this session is still the current one.
    fn publish(&self, update: impl FnOnce(&mut PollSnapshot)) -> bool {
        self.state.send_if_modified(|snapshot| {
            if snapshot.generation != self.generation || self.cancel.is_cancelled() {
                return false;
            }
            update(snapshot);
            true
        })
    }
}
