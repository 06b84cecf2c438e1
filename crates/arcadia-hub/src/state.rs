//! Top-level application states.

use thiserror::Error;

use arcadia_common::GameId;

/// The four top-level states of the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubState {
    /// 3D arcade floor menu.
    Menu3d,
    /// 2D categorized grid menu.
    MenuGrid,
    /// A game occupies the slot.
    InGame {
        /// The game being played.
        game_id: GameId,
    },
    /// Achievements and high-score meta-screen.
    TrophyRoom,
}

impl HubState {
    /// Whether this is one of the two menu modes.
    #[must_use]
    pub const fn is_menu(&self) -> bool {
        matches!(self, Self::Menu3d | Self::MenuGrid)
    }

    /// Whether a game session is active.
    #[must_use]
    pub const fn is_in_game(&self) -> bool {
        matches!(self, Self::InGame { .. })
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Menu3d => "menu_3d",
            Self::MenuGrid => "menu_grid",
            Self::InGame { .. } => "in_game",
            Self::TrophyRoom => "trophy_room",
        }
    }
}

/// Errors from state transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The target game is not registered. State is unchanged.
    #[error("unknown game: {0}")]
    UnknownGame(GameId),

    /// Another transition is still in flight. Transitions are serialized,
    /// never queued; the caller may retry once the current one settles.
    #[error("a state transition is already in flight")]
    TransitionInFlight,
}

/// One completed transition, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// State before the transition.
    pub from: HubState,
    /// State after the transition.
    pub to: HubState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(HubState::Menu3d.is_menu());
        assert!(HubState::MenuGrid.is_menu());
        assert!(!HubState::TrophyRoom.is_menu());

        let in_game = HubState::InGame {
            game_id: GameId::new("pong"),
        };
        assert!(in_game.is_in_game());
        assert!(!in_game.is_menu());
        assert_eq!(in_game.name(), "in_game");
    }
}
