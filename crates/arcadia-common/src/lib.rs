//! # Arcadia Common
//!
//! Common types shared across all Arcadia subsystems:
//! - ID newtypes (games, items, achievements, quests)
//! - Category enums for descriptors and cosmetic slots
//! - The local calendar date index used for daily content rotation

pub mod date;
pub mod ids;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::date::*;
    pub use crate::ids::*;
}

pub use prelude::*;
