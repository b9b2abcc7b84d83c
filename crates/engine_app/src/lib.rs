//! # engine_app
//!
//! Owns the world state and drives it. The [`World`] is the single explicit
//! ECS context: component types and instances, entities, systems, resources
//! and the deferred command queue. The [`TickLoop`] runs it frame by frame
//! against a [`Platform`].
//!
//! ## Startup sequence
//!
//! 1. Load an [`EngineConfig`] (or use the defaults).
//! 2. Create the world with [`World::with_config`] and install the
//!    [`Viewport`](engine_math::Viewport) and [`Camera`](engine_math::Camera)
//!    resources from [`WindowConfig`].
//! 3. Register component types, systems and entities.
//! 4. [`TickLoop::run`] until the tick limit or window close; the world is
//!    shut down when the loop returns.

pub mod config;
pub mod registry;
pub mod scheduler;
pub mod tick;
pub mod time;
pub mod world;

pub use config::{ConfigError, EngineConfig, WindowConfig};
pub use registry::{SystemEntry, SystemRegistry};
pub use scheduler::DispatchStats;
pub use tick::{Platform, StopReason, TickConfig, TickLoop};
pub use time::FrameTime;
pub use world::{BUILTIN_SYSTEM, World};

/// Install the window-derived resources ([`Viewport`](engine_math::Viewport)
/// and [`Camera`](engine_math::Camera)) on a world.
pub fn install_window(world: &mut World, window: &WindowConfig) {
    world.insert_resource(window.viewport());
    world.insert_resource(window.camera());
}
