//! Headless demo host.
//!
//! Builds a registry with two demo games, restores the save from disk, and
//! drives one scripted session through the hub: grid menu, daily challenge,
//! game over, trophy room, back to the menu.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use futures::future::BoxFuture;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arcadia_common::{DateIndex, GameCategory, GameId};
use arcadia_core::{FileStore, SaveSystem};
use arcadia_hub::{
    GameDescriptor, GamePlugin, GameRegistry, Hub, HubApi, HubState, ModuleLoadError,
    PluginError, PluginFactory, Surface,
};

/// Minimal plugin: greets on init and counts its plays through the opaque
/// per-game config channel.
struct DemoGame {
    id: GameId,
    hub: Option<HubApi>,
}

impl GamePlugin for DemoGame {
    fn init<'a>(
        &'a mut self,
        surface: &'a Surface,
        hub: HubApi,
    ) -> BoxFuture<'a, Result<(), PluginError>> {
        Box::pin(async move {
            info!(
                game = %self.id,
                width = surface.width,
                height = surface.height,
                "demo game ready"
            );
            {
                let mut save = hub.save().lock();
                let plays = save
                    .game_config(&self.id)
                    .and_then(|config| config["plays"].as_u64())
                    .unwrap_or(0);
                save.set_game_config(self.id.clone(), serde_json::json!({ "plays": plays + 1 }));
            }
            self.hub = Some(hub);
            Ok(())
        })
    }

    fn shutdown(&mut self) {
        info!(game = %self.id, "demo game shut down");
        self.hub = None;
    }
}

fn demo_factory(id: &str) -> PluginFactory {
    let id = GameId::new(id);
    Arc::new(move || {
        let id = id.clone();
        Box::pin(async move { Ok(Box::new(DemoGame { id, hub: None }) as Box<dyn GamePlugin>) })
    })
}

fn broken_factory() -> PluginFactory {
    Arc::new(|| Box::pin(async { Err(ModuleLoadError::new("demo module refuses to load")) }))
}

fn build_registry() -> GameRegistry {
    GameRegistry::builder()
        .register(GameDescriptor::new(
            GameId::new("pong"),
            "Pong",
            GameCategory::ArcadeClassics,
            demo_factory("pong"),
        ))
        .register(GameDescriptor::new(
            GameId::new("snake"),
            "Snake",
            GameCategory::ArcadeClassics,
            demo_factory("snake"),
        ))
        .register(GameDescriptor::new(
            GameId::new("haunted-cartridge"),
            "Haunted Cartridge",
            GameCategory::QuickMinigames,
            broken_factory(),
        ))
        .build()
}

async fn run_session(hub: &Hub, today: DateIndex) -> Result<()> {
    let grid = hub.grid_menu(today);
    info!(sections = grid.sections.len(), "grid menu built");
    hub.transition_to_state(HubState::MenuGrid).await?;

    let daily = hub
        .daily_challenge(today)
        .context("no daily challenge candidates registered")?;
    info!(game = %daily, "today's challenge");
    hub.transition_to_state(HubState::InGame { game_id: daily }).await?;

    hub.api().show_game_over(420);
    for overlay in hub.pump_events(today).await {
        info!(
            game = %overlay.game_id,
            score = overlay.score,
            new_best = overlay.new_best,
            show_ad = overlay.show_ad,
            "game over"
        );
    }

    hub.api().go_back();
    hub.pump_events(today).await;

    hub.transition_to_state(HubState::TrophyRoom).await?;
    let room = hub.trophy_room();
    for row in &room.score_table {
        info!(game = %row.display_name, score = row.score, "personal best");
    }

    hub.go_back().await?;
    info!(state = hub.state().name(), "session finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let save = SaveSystem::new(Box::new(FileStore::new("arcadia.save")));
    let hub = Hub::new(build_registry(), save, Surface::default());
    let today = DateIndex::today_local();

    pollster::block_on(run_session(&hub, today))
}
