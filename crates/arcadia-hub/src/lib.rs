//! # Arcadia Hub
//!
//! The orchestrator for the mini-game hub:
//! - [`GameRegistry`]: the immutable catalog of games and their module
//!   factories
//! - [`GamePlugin`]: the opaque `{init, shutdown}` contract games implement,
//!   with [`Placeholder`] as the non-fatal fallback
//! - [`GameSlot`]: the generation-counted slot holding the single live plugin
//! - [`Hub`]: the serialized state machine over the four top-level states,
//!   the game-over flow, and the ad gate
//! - [`HubApi`]: the capability handle plugins get at `init`
//! - `shell`: pure view-models for the 3D floor, the 2D grid, and the trophy
//!   room
//!
//! Execution is single-threaded cooperative: module loading and `init` are
//! futures the host drives; nothing here spawns threads.

pub mod api;
pub mod hub;
pub mod plugin;
pub mod registry;
pub mod shell;
pub mod slot;
pub mod state;

pub use api::{HubApi, HubEvent};
pub use hub::{GameOverOverlay, Hub};
pub use plugin::{GamePlugin, ModuleLoadError, Placeholder, PluginError, PluginFactory, Surface};
pub use registry::{GameDescriptor, GameRegistry, GameRegistryBuilder};
pub use shell::{Cabinet, CabinetFloor, GridEntry, GridMenu, GridSection, ScoreRow, TrophyRoom};
pub use slot::{Activation, GameSlot, SlotError};
pub use state::{HubState, StateError, TransitionRecord};
