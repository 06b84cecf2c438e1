//! The hub orchestrator.
//!
//! Composes the registry, the active game slot, the shared save system, the
//! ad gate, and the state machine. All navigation funnels through
//! [`Hub::transition_to_state`]; transitions are serialized, never queued.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::{info, warn};

use arcadia_common::{DateIndex, GameId};
use arcadia_core::{AdsGate, MatchKind, SaveSystem};

use crate::api::{HubApi, HubEvent};
use crate::plugin::Surface;
use crate::registry::GameRegistry;
use crate::shell::{CabinetFloor, GridMenu, TrophyRoom};
use crate::slot::{Activation, GameSlot, SlotError};
use crate::state::{HubState, StateError, TransitionRecord};

/// View-model for the end-of-session overlay. Offers retry (a fresh
/// activation of the same game) and back-to-menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverOverlay {
    /// The game the session belonged to.
    pub game_id: GameId,
    /// Final score.
    pub score: u64,
    /// Whether this score set a new personal best.
    pub new_best: bool,
    /// Whether an interstitial should be shown before the overlay.
    pub show_ad: bool,
}

impl GameOverOverlay {
    /// Target state for the retry action.
    #[must_use]
    pub fn retry_state(&self) -> HubState {
        HubState::InGame {
            game_id: self.game_id.clone(),
        }
    }
}

struct HubInner {
    state: HubState,
    last_menu: HubState,
    in_flight: bool,
    history: Vec<TransitionRecord>,
}

/// The top-level orchestrator. One per session.
pub struct Hub {
    registry: Arc<GameRegistry>,
    slot: GameSlot,
    save: Arc<Mutex<SaveSystem>>,
    ads: AdsGate,
    events_tx: Sender<HubEvent>,
    events_rx: Receiver<HubEvent>,
    inner: Mutex<HubInner>,
}

impl Hub {
    /// Creates a hub starting in [`HubState::Menu3d`].
    #[must_use]
    pub fn new(registry: GameRegistry, save: SaveSystem, surface: Surface) -> Self {
        let registry = Arc::new(registry);
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        Self {
            slot: GameSlot::new(Arc::clone(&registry), surface),
            registry,
            save: Arc::new(Mutex::new(save)),
            ads: AdsGate::new(),
            events_tx,
            events_rx,
            inner: Mutex::new(HubInner {
                state: HubState::Menu3d,
                last_menu: HubState::Menu3d,
                in_flight: false,
                history: Vec::new(),
            }),
        }
    }

    /// The registry this hub serves.
    #[must_use]
    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    /// The active game slot.
    #[must_use]
    pub fn slot(&self) -> &GameSlot {
        &self.slot
    }

    /// Shared handle to the save system.
    #[must_use]
    pub fn save(&self) -> &Arc<Mutex<SaveSystem>> {
        &self.save
    }

    /// Current top-level state.
    #[must_use]
    pub fn state(&self) -> HubState {
        self.inner.lock().state.clone()
    }

    /// Completed transitions, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<TransitionRecord> {
        self.inner.lock().history.clone()
    }

    /// Capability handle for plugins.
    #[must_use]
    pub fn api(&self) -> HubApi {
        HubApi::new(Arc::clone(&self.save), self.events_tx.clone())
    }

    /// Transitions to a new top-level state.
    ///
    /// Leaving a game awaits the plugin's shutdown before the new state
    /// applies. Menu-to-menu toggling never touches the slot. An activation
    /// superseded mid-flight leaves the state to whichever transition
    /// superseded it.
    ///
    /// # Errors
    ///
    /// - [`StateError::TransitionInFlight`] while another transition runs
    /// - [`StateError::UnknownGame`] for an unregistered `InGame` target
    pub async fn transition_to_state(&self, target: HubState) -> Result<(), StateError> {
        let from = {
            let mut inner = self.inner.lock();
            if inner.in_flight {
                return Err(StateError::TransitionInFlight);
            }
            if let HubState::InGame { game_id } = &target {
                if !self.registry.contains(game_id) {
                    return Err(StateError::UnknownGame(game_id.clone()));
                }
            }
            inner.in_flight = true;
            inner.state.clone()
        };

        info!(from = from.name(), to = target.name(), "state transition");

        if from.is_in_game() && !target.is_in_game() {
            self.slot.deactivate();
        }

        let applied = if let HubState::InGame { game_id } = &target {
            match self.slot.activate(game_id, self.api()).await {
                Ok(Activation::Loaded) => true,
                Ok(Activation::Fallback { cause }) => {
                    warn!(game = %game_id, error = %cause, "game entered on placeholder");
                    true
                }
                // A newer transition owns the state now.
                Err(SlotError::Stale) => false,
                Err(SlotError::UnknownGame(id)) => {
                    self.inner.lock().in_flight = false;
                    return Err(StateError::UnknownGame(id));
                }
                // Fallback outcomes come back through Ok; the slot never
                // returns these as errors.
                Err(SlotError::ModuleLoad(_) | SlotError::Init(_)) => false,
            }
        } else {
            true
        };

        let mut inner = self.inner.lock();
        inner.in_flight = false;
        if applied {
            if target.is_menu() {
                inner.last_menu = target.clone();
            }
            inner.history.push(TransitionRecord {
                from,
                to: target.clone(),
            });
            inner.state = target;
        }
        Ok(())
    }

    /// Returns to the last-used menu mode. No-op while already in a menu.
    ///
    /// # Errors
    ///
    /// [`StateError::TransitionInFlight`] while another transition runs.
    pub async fn go_back(&self) -> Result<(), StateError> {
        let target = {
            let inner = self.inner.lock();
            if inner.state.is_menu() {
                return Ok(());
            }
            inner.last_menu.clone()
        };
        self.transition_to_state(target).await
    }

    /// Drains plugin events, handling game-overs and back requests.
    ///
    /// Returns the overlay models produced, in arrival order.
    pub async fn pump_events(&self, date: DateIndex) -> Vec<GameOverOverlay> {
        let mut overlays = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                HubEvent::GameOver { score } => {
                    if let Some(overlay) = self.handle_game_over(date, score) {
                        overlays.push(overlay);
                    }
                }
                HubEvent::GoBack => {
                    if let Err(e) = self.go_back().await {
                        warn!(error = %e, "back request rejected");
                    }
                }
            }
        }
        overlays
    }

    /// Processes the end of the current game session: records the score,
    /// routes quest progress, evaluates the ad gate, and builds the overlay.
    ///
    /// Returns `None` when no game is active; a game-over from a plugin that
    /// already lost the slot is dropped.
    pub fn handle_game_over(&self, date: DateIndex, score: u64) -> Option<GameOverOverlay> {
        let HubState::InGame { game_id } = self.state() else {
            warn!(score, "game over received outside a game, dropped");
            return None;
        };

        let daily = self.daily_challenge(date);

        let mut save = self.save.lock();
        // Make sure progress lands on today's quest list.
        save.daily_quests(date);

        let new_best = save.set_high_score(game_id.clone(), score);
        save.increment_quest_progress(MatchKind::GamesPlayed, 1);
        save.increment_quest_progress(
            MatchKind::ScoreEarned,
            u32::try_from(score).unwrap_or(u32::MAX),
        );
        if daily.as_ref() == Some(&game_id) {
            save.increment_quest_progress(MatchKind::DailyChallenge, 1);
        }

        let show_ad = self.ads.should_show_interstitial(&mut save);
        info!(game = %game_id, score, new_best, show_ad, "game over handled");

        Some(GameOverOverlay {
            game_id,
            score,
            new_best,
            show_ad,
        })
    }

    /// The game-of-the-day, selected once per date and cached in the save.
    #[must_use]
    pub fn daily_challenge(&self, date: DateIndex) -> Option<GameId> {
        self.save
            .lock()
            .daily_challenge_for(date, self.registry.snapshot())
    }

    /// Builds the grid menu view-model for a date.
    #[must_use]
    pub fn grid_menu(&self, date: DateIndex) -> GridMenu {
        let daily = self.daily_challenge(date);
        let save = self.save.lock();
        GridMenu::build(&self.registry, &save, daily.as_ref())
    }

    /// Builds the cabinet floor view-model for a date.
    #[must_use]
    pub fn cabinet_floor(&self, date: DateIndex) -> CabinetFloor {
        let daily = self.daily_challenge(date);
        CabinetFloor::build(&self.registry, daily.as_ref())
    }

    /// Builds the trophy room view-model.
    #[must_use]
    pub fn trophy_room(&self) -> TrophyRoom {
        TrophyRoom::build(&self.registry, &self.save.lock())
    }
}
