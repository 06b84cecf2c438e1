//! 2D categorized grid menu.

use arcadia_common::{GameCategory, GameId};
use arcadia_core::SaveSystem;

use crate::registry::GameRegistry;

/// One tile in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEntry {
    /// Game this tile launches.
    pub game_id: GameId,
    /// Tile label.
    pub display_name: String,
    /// Personal best badge, if any score was ever recorded.
    pub high_score: Option<u64>,
    /// Whether this tile carries the daily-challenge highlight.
    pub is_daily_challenge: bool,
}

/// One category section of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSection {
    /// Category of every entry in this section.
    pub category: GameCategory,
    /// Section heading.
    pub title: String,
    /// Tiles, in ID order.
    pub entries: Vec<GridEntry>,
}

/// The grid menu view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMenu {
    /// Non-empty sections, in display order. `System` entries never appear.
    pub sections: Vec<GridSection>,
}

impl GridMenu {
    /// Builds the grid from the registry and save state.
    #[must_use]
    pub fn build(registry: &GameRegistry, save: &SaveSystem, daily: Option<&GameId>) -> Self {
        let sections = GameCategory::ALL
            .iter()
            .filter(|category| !category.is_system())
            .filter_map(|&category| {
                let entries: Vec<GridEntry> = registry
                    .iter()
                    .filter(|d| d.category() == category)
                    .map(|d| GridEntry {
                        game_id: d.id().clone(),
                        display_name: d.display_name().to_string(),
                        high_score: save.high_score(d.id()),
                        is_daily_challenge: daily == Some(d.id()),
                    })
                    .collect();
                if entries.is_empty() {
                    None
                } else {
                    Some(GridSection {
                        category,
                        title: category.display_name().to_string(),
                        entries,
                    })
                }
            })
            .collect();
        Self { sections }
    }

    /// The game a tile pick maps to, if the tile exists.
    #[must_use]
    pub fn select(&self, game_id: &GameId) -> Option<GameId> {
        self.sections
            .iter()
            .flat_map(|s| &s.entries)
            .find(|e| &e.game_id == game_id)
            .map(|e| e.game_id.clone())
    }
}
