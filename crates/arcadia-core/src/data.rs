//! The persisted save aggregate.
//!
//! `SaveData` is the single source of truth for everything the hub persists.
//! It is constructed with defaults on first run, migrated forward on load,
//! mutated only through [`crate::system::SaveSystem`], and written back after
//! every mutation. It is never destroyed, only reset.

use arcadia_common::{AchievementId, DateIndex, GameId, ItemId, SlotCategory};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::quest::Quest;
use crate::version::CURRENT_SAVE_VERSION;

/// User-facing toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether interstitial ads may be shown.
    pub ads_enabled: bool,
    /// Whether all audio is muted.
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ads_enabled: true,
            muted: false,
        }
    }
}

/// The daily quest list together with the date it was generated for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyQuests {
    /// Local date index the quests were generated for.
    pub date: DateIndex,
    /// Quests for that date.
    pub quests: Vec<Quest>,
}

/// The cached daily challenge pick for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    /// Local date index the pick was made for.
    pub date: DateIndex,
    /// The selected game.
    pub game_id: GameId,
}

/// Single persisted aggregate for the whole hub.
///
/// Field invariants (enforced by `SaveSystem`, revalidated on import):
/// - `total_currency` never goes negative (unsigned by construction)
/// - every value in `equipped_items` is a member of `unlocked_items`
/// - `achievements` is append-only
/// - `daily_quests.date` and `daily_challenge` are recomputed at most once
///   per local calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    /// Monotonic schema version; drives migration on load.
    pub version: u32,
    /// Coin balance.
    pub total_currency: u64,
    /// Purchased/unlocked cosmetic items.
    pub unlocked_items: BTreeSet<ItemId>,
    /// Currently equipped item per cosmetic slot.
    pub equipped_items: BTreeMap<SlotCategory, ItemId>,
    /// Earned achievements.
    pub achievements: BTreeSet<AchievementId>,
    /// Per-game best scores.
    pub high_scores: BTreeMap<GameId, u64>,
    /// Daily quest list, keyed by generation date.
    pub daily_quests: DailyQuests,
    /// Cached game-of-the-day pick.
    pub daily_challenge: Option<DailyChallenge>,
    /// User toggles.
    pub settings: Settings,
    /// Game-over counter driving interstitial cadence. Increments on every
    /// game-over evaluation regardless of whether an ad is shown.
    pub ad_gate_counter: u64,
    /// Opaque per-plugin persisted blobs. Plugins are untrusted black boxes;
    /// this is their only persistence channel.
    pub game_configs: BTreeMap<GameId, serde_json::Value>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: CURRENT_SAVE_VERSION,
            total_currency: 0,
            unlocked_items: BTreeSet::new(),
            equipped_items: BTreeMap::new(),
            achievements: BTreeSet::new(),
            high_scores: BTreeMap::new(),
            daily_quests: DailyQuests::default(),
            daily_challenge: None,
            settings: Settings::default(),
            ad_gate_counter: 0,
            game_configs: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let data = SaveData::default();
        assert_eq!(data.version, CURRENT_SAVE_VERSION);
        assert_eq!(data.total_currency, 0);
        assert!(data.settings.ads_enabled);
        assert!(!data.settings.muted);
        assert!(data.daily_challenge.is_none());
        assert_eq!(data.ad_gate_counter, 0);
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        // Older or partial blobs deserialize with defaults for new fields.
        let data: SaveData = serde_json::from_str(r#"{"total_currency": 40}"#)
            .expect("partial blob should deserialize");
        assert_eq!(data.total_currency, 40);
        assert!(data.settings.ads_enabled);
    }
}
