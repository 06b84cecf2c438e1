//! The plugin contract.
//!
//! Games are opaque to the hub: the whole interface is `init` and `shutdown`.
//! A plugin owns every resource it acquires; the orchestrator cannot release
//! anything on its behalf, so `shutdown` must be total. `init` is async
//! because real modules arrive over a loader; test and demo plugins resolve
//! immediately.

use futures::future::BoxFuture;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::api::HubApi;

/// Logical render target handed to the active plugin.
///
/// Rendering backends live outside this crate; the surface carries only the
/// dimensions plugins lay out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl Surface {
    /// Creates a surface with the given logical size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// A game module could not be produced by its factory.
#[derive(Debug, Clone, Error)]
#[error("module load failed: {reason}")]
pub struct ModuleLoadError {
    /// Human-readable cause.
    pub reason: String,
}

impl ModuleLoadError {
    /// Creates a load error with the given cause.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A plugin failed to initialize on its surface.
#[derive(Debug, Clone, Error)]
#[error("plugin init failed: {reason}")]
pub struct PluginError {
    /// Human-readable cause.
    pub reason: String,
}

impl PluginError {
    /// Creates an init error with the given cause.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A playable game module.
///
/// The hub holds at most one initialized plugin at a time and always runs
/// `shutdown` to completion before initializing the next one.
pub trait GamePlugin: Send {
    /// Starts the game on the given surface with the hub's capability handle.
    fn init<'a>(
        &'a mut self,
        surface: &'a Surface,
        hub: HubApi,
    ) -> BoxFuture<'a, Result<(), PluginError>>;

    /// Releases everything the plugin acquired. Must be safe to call on an
    /// instance whose `init` never ran or failed.
    fn shutdown(&mut self);
}

/// Produces a fresh plugin instance. Async because real modules are fetched
/// and linked on demand.
pub type PluginFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Box<dyn GamePlugin>, ModuleLoadError>> + Send + Sync>;

/// Fallback plugin installed when a real module fails to load or init.
///
/// Shows a non-fatal error screen. Its own `init` never fails, so a failing
/// game degrades the session instead of ending it.
#[derive(Debug, Default)]
pub struct Placeholder {
    message: String,
}

impl Placeholder {
    /// Creates a placeholder carrying the failure message to display.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message shown to the player.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl GamePlugin for Placeholder {
    fn init<'a>(
        &'a mut self,
        _surface: &'a Surface,
        _hub: HubApi,
    ) -> BoxFuture<'a, Result<(), PluginError>> {
        info!(message = %self.message, "placeholder screen shown");
        Box::pin(async { Ok(()) })
    }

    fn shutdown(&mut self) {}
}
