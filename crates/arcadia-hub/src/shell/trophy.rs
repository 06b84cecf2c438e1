//! Trophy room meta-screen.

use arcadia_common::AchievementId;
use arcadia_core::SaveSystem;

use crate::registry::GameRegistry;

/// One row of the high-score table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    /// Display name of the game, or the raw ID when it left the registry.
    pub display_name: String,
    /// Personal best.
    pub score: u64,
}

/// The trophy room view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrophyRoom {
    /// Earned achievements, in ID order.
    pub achievements: Vec<AchievementId>,
    /// High scores, best first.
    pub score_table: Vec<ScoreRow>,
}

impl TrophyRoom {
    /// Builds the trophy room from the save.
    #[must_use]
    pub fn build(registry: &GameRegistry, save: &SaveSystem) -> Self {
        let achievements: Vec<AchievementId> =
            save.data().achievements.iter().cloned().collect();

        let mut score_table: Vec<ScoreRow> = save
            .data()
            .high_scores
            .iter()
            .map(|(game_id, &score)| ScoreRow {
                display_name: registry
                    .get(game_id)
                    .map_or_else(|| game_id.to_string(), |d| d.display_name().to_string()),
                score,
            })
            .collect();
        score_table.sort_by(|a, b| b.score.cmp(&a.score));

        Self {
            achievements,
            score_table,
        }
    }
}
