//! The active game slot.
//!
//! At most one plugin instance is ever alive. Activation is async (module
//! loading) and may be superseded mid-flight by a newer request; a generation
//! counter decides which request owns the slot. A superseded activation shuts
//! down whatever it produced and installs nothing.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use arcadia_common::GameId;

use crate::api::HubApi;
use crate::plugin::{GamePlugin, ModuleLoadError, Placeholder, PluginError, Surface};
use crate::registry::GameRegistry;

/// Errors from slot activation.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The requested game is not in the registry. Slot state is unchanged.
    #[error("unknown game: {0}")]
    UnknownGame(GameId),

    /// The module factory failed. A placeholder was installed instead.
    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),

    /// The loaded plugin failed to initialize. A placeholder was installed
    /// instead.
    #[error(transparent)]
    Init(#[from] PluginError),

    /// A newer activation superseded this one. Nothing was installed and any
    /// partially created instance was shut down.
    #[error("activation superseded by a newer request")]
    Stale,
}

/// How an activation concluded.
#[derive(Debug)]
pub enum Activation {
    /// The requested plugin loaded and initialized.
    Loaded,
    /// A placeholder was installed after a load or init failure. Non-fatal.
    Fallback {
        /// The failure that forced the fallback.
        cause: SlotError,
    },
}

struct ActiveGame {
    game_id: GameId,
    plugin: Box<dyn GamePlugin>,
}

#[derive(Default)]
struct SlotState {
    generation: u64,
    active: Option<ActiveGame>,
}

/// Owns the single live plugin and the generation counter guarding it.
pub struct GameSlot {
    registry: Arc<GameRegistry>,
    surface: Surface,
    state: Mutex<SlotState>,
}

impl GameSlot {
    /// Creates an empty slot over the given registry and surface.
    #[must_use]
    pub fn new(registry: Arc<GameRegistry>, surface: Surface) -> Self {
        Self {
            registry,
            surface,
            state: Mutex::new(SlotState::default()),
        }
    }

    /// The game currently occupying the slot, if any. A placeholder counts as
    /// the game it stood in for.
    #[must_use]
    pub fn active_game(&self) -> Option<GameId> {
        self.state.lock().active.as_ref().map(|a| a.game_id.clone())
    }

    /// Activates a game.
    ///
    /// Shuts down the current occupant, loads the module, initializes it, and
    /// installs it. Load or init failures install a [`Placeholder`] and
    /// report [`Activation::Fallback`]. If a newer activation starts while
    /// this one is loading or initializing, this one shuts down whatever it
    /// built and returns [`SlotError::Stale`].
    pub async fn activate(&self, game_id: &GameId, hub: HubApi) -> Result<Activation, SlotError> {
        let descriptor = self
            .registry
            .get(game_id)
            .ok_or_else(|| SlotError::UnknownGame(game_id.clone()))?;

        // Claim a generation. Anything that bumps the counter after this
        // point supersedes us.
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.generation
        };
        debug!(game = %game_id, generation, "activation started");

        // The previous occupant is shut down to completion before any
        // loading begins, so its resources are gone before the next
        // instance acquires its own.
        self.shutdown_current();

        let mut cause = None;
        let mut plugin: Box<dyn GamePlugin> = match descriptor.load_module().await {
            Ok(plugin) => plugin,
            Err(e) => {
                warn!(game = %game_id, error = %e, "module load failed, using placeholder");
                cause = Some(SlotError::ModuleLoad(e.clone()));
                Box::new(Placeholder::new(e.to_string()))
            }
        };

        if self.superseded(generation) {
            plugin.shutdown();
            debug!(game = %game_id, generation, "activation abandoned after load");
            return Err(SlotError::Stale);
        }

        if let Err(e) = plugin.init(&self.surface, hub.clone()).await {
            plugin.shutdown();
            warn!(game = %game_id, error = %e, "plugin init failed, using placeholder");
            cause = Some(SlotError::Init(e.clone()));
            plugin = Box::new(Placeholder::new(e.to_string()));
            if let Err(e) = plugin.init(&self.surface, hub).await {
                warn!(game = %game_id, error = %e, "placeholder init reported an error");
            }
        }

        {
            let mut state = self.state.lock();
            if state.generation != generation {
                drop(state);
                plugin.shutdown();
                debug!(game = %game_id, generation, "activation abandoned after init");
                return Err(SlotError::Stale);
            }
            state.active = Some(ActiveGame {
                game_id: game_id.clone(),
                plugin,
            });
        }

        info!(game = %game_id, fallback = cause.is_some(), "game activated");
        match cause {
            None => Ok(Activation::Loaded),
            Some(cause) => Ok(Activation::Fallback { cause }),
        }
    }

    /// Shuts down and removes the current occupant. Also supersedes any
    /// in-flight activation. Idempotent.
    pub fn deactivate(&self) {
        let taken = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.active.take()
        };
        if let Some(mut active) = taken {
            info!(game = %active.game_id, "game deactivated");
            active.plugin.shutdown();
        }
    }

    fn shutdown_current(&self) {
        let taken = self.state.lock().active.take();
        if let Some(mut active) = taken {
            active.plugin.shutdown();
        }
    }

    fn superseded(&self, generation: u64) -> bool {
        self.state.lock().generation != generation
    }
}
