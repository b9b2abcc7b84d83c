//! Component types shared by the demo binaries.
//!
//! [`register`] constructs all of them on the built-in system.

use engine_app::{FrameTime, World};
use engine_component::{Component, ComponentTypeId, Context, EcsError};
use engine_math::Quat;
use engine_ui::{VisualRef, Visuals};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Despawns its entity after a fixed number of updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    /// Updates left before the entity is despawned.
    pub ticks: u32,
}

impl Lifetime {
    pub const NAME: &'static str = "lifetime";
}

impl Default for Lifetime {
    fn default() -> Self {
        Self { ticks: 60 }
    }
}

impl Component for Lifetime {
    fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            debug!(entity = %cx.entity(), "lifetime expired");
            cx.despawn_entity();
        }
        Ok(())
    }
}

/// Spins a visual node around the z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spinner {
    /// Radians per second.
    pub speed: f32,
    #[serde(skip)]
    pub visual: Option<VisualRef>,
}

impl Spinner {
    pub const NAME: &'static str = "spinner";
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            speed: std::f32::consts::PI,
            visual: None,
        }
    }
}

impl Component for Spinner {
    fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let Some(visual) = self.visual else {
            return Ok(());
        };
        let dt = cx.resource::<FrameTime>().map_or(0.0, FrameTime::scaled_delta);
        if let Some(transform) = cx
            .resource_mut::<Visuals>()
            .and_then(|visuals| visuals.transform_mut(visual))
        {
            transform.rotation = Quat::from_rotation_z(self.speed * dt) * transform.rotation;
        }
        Ok(())
    }
}

/// Logs when its entity's components start and stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcer {
    pub message: String,
}

impl Announcer {
    pub const NAME: &'static str = "announcer";
}

impl Component for Announcer {
    fn start(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let name = cx.entities().name(cx.entity()).unwrap_or("<unnamed>");
        info!(entity = %cx.entity(), name, "{}", self.message);
        Ok(())
    }

    fn destroy(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        info!(entity = %cx.entity(), "announcer removed");
        Ok(())
    }
}

/// Register every demo component type on the built-in system.
///
/// # Errors
///
/// Fails if any of the names is already taken.
pub fn register(world: &mut World) -> Result<Vec<ComponentTypeId>, EcsError> {
    Ok(vec![
        world.construct_type(Lifetime::NAME, Lifetime::default())?,
        world.construct_type(Spinner::NAME, Spinner::default())?,
        world.construct_type(Announcer::NAME, Announcer::default())?,
    ])
}
