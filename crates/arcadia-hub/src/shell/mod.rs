//! Presentation shells.
//!
//! Pure view-models over the registry and the save: they compute what a
//! frontend would draw and which `GameId` a pick maps to, and nothing else.
//! Loading and persistence stay in the orchestrator. Every string pulled from
//! the save is carried as plain data; no shell interprets markup.

mod floor;
mod grid;
mod trophy;

pub use floor::{Cabinet, CabinetFloor, FLOOR_RADIUS};
pub use grid::{GridEntry, GridMenu, GridSection};
pub use trophy::{ScoreRow, TrophyRoom};
