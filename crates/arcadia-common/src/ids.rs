//! ID types for games, items, achievements, and quests.
//!
//! Unlike numeric entity IDs, hub identifiers are human-readable slugs
//! (`"pong"`, `"theme-neon-blue"`) defined by content authors, so the
//! newtypes carry strings. All of them order lexicographically, which keeps
//! `BTreeMap`/`BTreeSet` iteration stable for deterministic selection and
//! serialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID from a slug.
            #[must_use]
            pub fn new(slug: impl Into<String>) -> Self {
                Self(slug.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(slug: &str) -> Self {
                Self::new(slug)
            }
        }
    };
}

string_id! {
    /// Unique identifier for a game in the registry.
    GameId
}

string_id! {
    /// Unique identifier for an unlockable cosmetic item.
    ItemId
}

string_id! {
    /// Unique identifier for an achievement.
    AchievementId
}

string_id! {
    /// Unique identifier for a daily quest instance.
    QuestId
}

/// Error returned when parsing a category from a string fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Cosmetic slot a purchased item can be equipped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    /// Hub color theme.
    Theme,
    /// Player avatar.
    Avatar,
    /// Arcade cabinet skin.
    Cabinet,
}

impl SlotCategory {
    /// All cosmetic slots.
    pub const ALL: [Self; 3] = [Self::Theme, Self::Avatar, Self::Cabinet];

    /// Returns the display name for this slot.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::Avatar => "Avatar",
            Self::Cabinet => "Cabinet",
        }
    }
}

impl FromStr for SlotCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "theme" => Ok(Self::Theme),
            "avatar" => Ok(Self::Avatar),
            "cabinet" => Ok(Self::Cabinet),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Category a game descriptor belongs to.
///
/// `System` entries are meta-screens (trophy room and friends) that appear in
/// the registry for navigation but are never eligible as daily challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameCategory {
    /// Classic arcade staples.
    ArcadeClassics,
    /// Short-session minigames.
    QuickMinigames,
    /// Puzzle, logic, and turn-based games.
    RpgLogic,
    /// Heavyweight 3D experiences.
    Immersive3d,
    /// Meta-screens that live in the registry but are not games.
    System,
}

impl GameCategory {
    /// All categories, in menu display order.
    pub const ALL: [Self; 5] = [
        Self::ArcadeClassics,
        Self::QuickMinigames,
        Self::RpgLogic,
        Self::Immersive3d,
        Self::System,
    ];

    /// Returns whether this category marks a meta-screen rather than a game.
    #[must_use]
    pub const fn is_system(self) -> bool {
        matches!(self, Self::System)
    }

    /// Returns the display name for this category.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ArcadeClassics => "Arcade Classics",
            Self::QuickMinigames => "Quick Minigames",
            Self::RpgLogic => "RPG & Logic",
            Self::Immersive3d => "3D Immersive",
            Self::System => "System",
        }
    }
}
