//! # Arcadia Core
//!
//! The persistence and economy core of the Arcadia hub:
//! - `SaveData`: the single versioned persisted aggregate
//! - `SaveSystem`: the only owner of that aggregate, with currency, item,
//!   achievement, quest, and settings operations
//! - Forward-only schema migration over raw JSON
//! - A reversible (non-cryptographic) text codec for manual backup/transfer
//! - Deterministic daily quest generation and daily challenge selection
//! - The counter-based interstitial ad gate
//!
//! Everything here is pure local state: there is no network and no server
//! validation. Persistence correctness is a client-local guarantee.

pub mod ads;
pub mod codec;
pub mod daily;
pub mod data;
pub mod error;
pub mod quest;
pub mod store;
pub mod system;
pub mod version;

pub use ads::AdsGate;
pub use daily::select_daily_challenge;
pub use data::{DailyChallenge, DailyQuests, SaveData, Settings};
pub use error::{SaveError, SaveResult};
pub use quest::{MatchKind, Quest};
pub use store::{FileStore, MemoryStore, SaveStore};
pub use system::SaveSystem;
pub use version::CURRENT_SAVE_VERSION;
