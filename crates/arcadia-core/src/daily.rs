//! Daily challenge selection.
//!
//! A pure, deterministic pick over the registry snapshot: the same date and
//! candidate set always yield the same game, with no hidden mutable state, so
//! rotation needs no server coordination and tests need no clock mocking.

use arcadia_common::{DateIndex, GameCategory, GameId};

/// Selects the game-of-the-day from a registry snapshot.
///
/// Descriptors with `GameCategory::System` (meta-screens) are never eligible.
/// Candidates are sorted by ID before the seeded pick so the caller's
/// iteration order cannot influence the result. Returns `None` when no
/// eligible candidate exists.
#[must_use]
pub fn select_daily_challenge(
    date: DateIndex,
    candidates: impl IntoIterator<Item = (GameId, GameCategory)>,
) -> Option<GameId> {
    let mut eligible: Vec<GameId> = candidates
        .into_iter()
        .filter(|(_, category)| !category.is_system())
        .map(|(id, _)| id)
        .collect();

    if eligible.is_empty() {
        return None;
    }

    eligible.sort();
    eligible.dedup();

    let mut rng = fastrand::Rng::with_seed(date.seed());
    let index = rng.usize(..eligible.len());
    Some(eligible.swap_remove(index))
}
