//! 3D arcade floor menu.
//!
//! Cabinets stand in a ring around the player spawn, evenly spaced and facing
//! the center. The view-model computes the layout and resolves picks; camera,
//! meshes, and input stay in the frontend.

use std::f32::consts::{PI, TAU};

use arcadia_common::GameId;

use crate::registry::GameRegistry;

/// Ring radius the cabinets stand on, in world units.
pub const FLOOR_RADIUS: f32 = 8.0;

/// How close a pick must land to a cabinet to count, in world units.
const PICK_RADIUS: f32 = 1.5;

/// One cabinet on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Cabinet {
    /// Game this cabinet launches.
    pub game_id: GameId,
    /// Marquee label.
    pub display_name: String,
    /// Position on the ring, radians counter-clockwise from +X.
    pub angle: f32,
    /// World position (x, z) on the floor plane.
    pub position: (f32, f32),
    /// Yaw so the screen faces the ring center.
    pub facing: f32,
    /// Whether this cabinet carries the daily-challenge marquee.
    pub is_daily_challenge: bool,
}

/// The cabinet floor view-model.
#[derive(Debug, Clone, PartialEq)]
pub struct CabinetFloor {
    /// Cabinets in ring order. `System` entries never get a cabinet.
    pub cabinets: Vec<Cabinet>,
    paused: bool,
}

impl CabinetFloor {
    /// Builds the ring layout from the registry.
    #[must_use]
    pub fn build(registry: &GameRegistry, daily: Option<&GameId>) -> Self {
        let games: Vec<_> = registry.iter().filter(|d| !d.category().is_system()).collect();
        let count = games.len();

        let cabinets = games
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                let angle = (i as f32) * TAU / (count as f32);
                Cabinet {
                    game_id: d.id().clone(),
                    display_name: d.display_name().to_string(),
                    angle,
                    position: (FLOOR_RADIUS * angle.cos(), FLOOR_RADIUS * angle.sin()),
                    facing: angle + PI,
                    is_daily_challenge: daily == Some(d.id()),
                }
            })
            .collect();

        Self {
            cabinets,
            paused: false,
        }
    }

    /// Resolves a floor pick to the nearest cabinet within reach.
    #[must_use]
    pub fn hit_test(&self, x: f32, z: f32) -> Option<&GameId> {
        self.cabinets
            .iter()
            .map(|c| {
                let dx = c.position.0 - x;
                let dz = c.position.1 - z;
                (c, dx * dx + dz * dz)
            })
            .filter(|&(_, d2)| d2 <= PICK_RADIUS * PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| &c.game_id)
    }

    /// Freezes floor animation while a transition or overlay is up.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes floor animation.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the floor is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arcadia_common::GameCategory;

    use crate::plugin::{ModuleLoadError, PluginFactory};
    use crate::registry::GameDescriptor;

    fn factory() -> PluginFactory {
        Arc::new(|| Box::pin(async { Err(ModuleLoadError::new("not playable in tests")) }))
    }

    fn registry(ids: &[&str]) -> GameRegistry {
        let mut builder = GameRegistry::builder();
        for id in ids {
            builder = builder.register(GameDescriptor::new(
                GameId::new(*id),
                id.to_uppercase(),
                GameCategory::ArcadeClassics,
                factory(),
            ));
        }
        builder
            .register(GameDescriptor::new(
                GameId::new("trophy-room"),
                "Trophy Room",
                GameCategory::System,
                factory(),
            ))
            .build()
    }

    #[test]
    fn test_ring_is_evenly_spaced_on_the_radius() {
        let floor = CabinetFloor::build(&registry(&["a", "b", "c", "d"]), None);
        assert_eq!(floor.cabinets.len(), 4);

        for (i, cabinet) in floor.cabinets.iter().enumerate() {
            let expected = (i as f32) * TAU / 4.0;
            assert!((cabinet.angle - expected).abs() < 1e-6);
            let (x, z) = cabinet.position;
            let r = (x * x + z * z).sqrt();
            assert!((r - FLOOR_RADIUS).abs() < 1e-4);
            // Screens face the center.
            assert!((cabinet.facing - (cabinet.angle + PI)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_system_entries_get_no_cabinet() {
        let floor = CabinetFloor::build(&registry(&["a"]), None);
        assert_eq!(floor.cabinets.len(), 1);
        assert_eq!(floor.cabinets[0].game_id.as_str(), "a");
    }

    #[test]
    fn test_hit_test_picks_nearest_cabinet() {
        let floor = CabinetFloor::build(&registry(&["a", "b"]), None);
        let (x, z) = floor.cabinets[0].position;

        // Dead-on and slightly off both land on the cabinet.
        assert_eq!(floor.hit_test(x, z), Some(&floor.cabinets[0].game_id));
        assert_eq!(floor.hit_test(x + 0.5, z), Some(&floor.cabinets[0].game_id));

        // The ring center is out of reach of every cabinet.
        assert_eq!(floor.hit_test(0.0, 0.0), None);
    }

    #[test]
    fn test_pause_resume() {
        let mut floor = CabinetFloor::build(&registry(&["a"]), None);
        assert!(!floor.is_paused());
        floor.pause();
        assert!(floor.is_paused());
        floor.resume();
        assert!(!floor.is_paused());
    }
}
