//! The game registry.
//!
//! Built once at startup and immutable afterwards, so every lookup during a
//! session sees the same catalog and the daily selector can treat a snapshot
//! of it as stable for the whole day.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use arcadia_common::{GameCategory, GameId};
use futures::future::BoxFuture;

use crate::plugin::{GamePlugin, ModuleLoadError, PluginFactory};

/// Registry entry for one game.
pub struct GameDescriptor {
    id: GameId,
    display_name: String,
    category: GameCategory,
    factory: PluginFactory,
}

impl fmt::Debug for GameDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameDescriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl GameDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        id: GameId,
        display_name: impl Into<String>,
        category: GameCategory,
        factory: PluginFactory,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            category,
            factory,
        }
    }

    /// The game's registry ID.
    #[must_use]
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Human-readable name for menus.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Menu category.
    #[must_use]
    pub fn category(&self) -> GameCategory {
        self.category
    }

    /// Produces a fresh module instance via the registered factory.
    pub fn load_module(&self) -> BoxFuture<'static, Result<Box<dyn GamePlugin>, ModuleLoadError>> {
        (self.factory)()
    }
}

/// Immutable catalog of every registered game.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: BTreeMap<GameId, GameDescriptor>,
}

impl GameRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> GameRegistryBuilder {
        GameRegistryBuilder::default()
    }

    /// Looks up a descriptor by ID.
    #[must_use]
    pub fn get(&self, id: &GameId) -> Option<&GameDescriptor> {
        self.games.get(id)
    }

    /// Whether a game is registered.
    #[must_use]
    pub fn contains(&self, id: &GameId) -> bool {
        self.games.contains_key(id)
    }

    /// Iterates descriptors in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &GameDescriptor> {
        self.games.values()
    }

    /// Number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// ID/category pairs for the daily selector.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(GameId, GameCategory)> {
        self.games
            .values()
            .map(|d| (d.id.clone(), d.category))
            .collect()
    }
}

/// Builder for [`GameRegistry`]. Duplicate IDs keep the last registration.
#[derive(Debug, Default)]
pub struct GameRegistryBuilder {
    games: BTreeMap<GameId, GameDescriptor>,
}

impl GameRegistryBuilder {
    /// Registers a game descriptor.
    #[must_use]
    pub fn register(mut self, descriptor: GameDescriptor) -> Self {
        if self.games.contains_key(&descriptor.id) {
            warn!(game = %descriptor.id, "duplicate registration, replacing");
        }
        self.games.insert(descriptor.id.clone(), descriptor);
        self
    }

    /// Finalizes the registry.
    #[must_use]
    pub fn build(self) -> GameRegistry {
        GameRegistry { games: self.games }
    }
}
