//! The context object handed to plugins.
//!
//! Plugins receive no globals. Everything they may touch outside their own
//! state arrives through [`HubApi`] at `init`: a shared save handle and a
//! one-way event channel back to the hub. The hub drains that channel on its
//! own schedule, so a plugin can never re-enter the orchestrator.

use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use tracing::warn;

use arcadia_core::SaveSystem;

/// Events plugins post back to the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubEvent {
    /// The current game session ended with a final score.
    GameOver {
        /// Final score of the session.
        score: u64,
    },
    /// The player asked to leave the game.
    GoBack,
}

/// Capability handle given to every plugin at `init`.
///
/// Cloning is cheap; a plugin may stash it for the lifetime of its session.
/// It stays valid after the plugin is shut down, but events sent then are
/// attributed to whatever is active when the hub drains them, so plugins must
/// drop it in `shutdown`.
#[derive(Debug, Clone)]
pub struct HubApi {
    save: Arc<Mutex<SaveSystem>>,
    events: Sender<HubEvent>,
}

impl HubApi {
    pub(crate) fn new(save: Arc<Mutex<SaveSystem>>, events: Sender<HubEvent>) -> Self {
        Self { save, events }
    }

    /// Shared handle to the save system.
    #[must_use]
    pub fn save(&self) -> &Arc<Mutex<SaveSystem>> {
        &self.save
    }

    /// Reports the end of the current game session.
    pub fn show_game_over(&self, score: u64) {
        self.send(HubEvent::GameOver { score });
    }

    /// Asks the hub to return to the menu.
    pub fn go_back(&self) {
        self.send(HubEvent::GoBack);
    }

    fn send(&self, event: HubEvent) {
        if self.events.send(event).is_err() {
            warn!(?event, "hub event channel closed, event dropped");
        }
    }
}
