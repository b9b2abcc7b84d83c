//! Frame loop.
//!
//! Each frame:
//!
//! 1. Draw ([`Platform::draw`]). Failure ends the loop.
//! 2. Pump the window and input ([`Platform::update_window`]). Failure ends
//!    the loop.
//! 3. Bring the camera aspect ratio in line with the viewport, so a resize
//!    applies to the tick of the same frame.
//! 4. Run one ECS tick.
//! 5. Finish the frame ([`Platform::end_frame`]) and update [`FrameTime`].
//!
//! When the loop ends for any reason the world is shut down.

use std::time::{Duration, Instant};

use engine_math::{Camera, Viewport};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::time::FrameTime;
use crate::world::World;

/// Configuration for the frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target ticks per second. Zero or negative disables pacing.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// The window, graphics and input collaborators of the frame loop.
pub trait Platform {
    /// Render the current frame.
    ///
    /// # Errors
    ///
    /// Any error ends the loop.
    fn draw(&mut self, world: &mut World) -> anyhow::Result<()>;

    /// Process window and input events. May update the
    /// [`Viewport`] and input resources.
    ///
    /// # Errors
    ///
    /// Any error ends the loop.
    fn update_window(&mut self, world: &mut World) -> anyhow::Result<()>;

    /// Per-frame housekeeping after the tick (input edge reset, audio).
    fn end_frame(&mut self, world: &mut World) -> anyhow::Result<()> {
        let _ = world;
        Ok(())
    }

    /// Returns `true` when the window was closed.
    fn should_close(&self) -> bool {
        false
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_ticks` was reached.
    TickLimit,
    /// The platform reported the window closed.
    Closed,
    /// Drawing or window update failed.
    PlatformError,
}

/// Drives a [`World`] frame by frame.
#[derive(Debug)]
pub struct TickLoop {
    /// Current tick counter.
    tick_id: u64,
    config: TickConfig,
    world: World,
    /// Viewport size seen on the previous frame.
    last_viewport: Option<Viewport>,
}

impl TickLoop {
    /// Wrap `world` in a frame loop. Installs [`FrameTime`] if missing.
    #[must_use]
    pub fn new(config: TickConfig, mut world: World) -> Self {
        if world.resource::<FrameTime>().is_none() {
            world.insert_resource(FrameTime::default());
        }
        let last_viewport = world.resource::<Viewport>().copied();
        Self {
            tick_id: 0,
            config,
            world,
            last_viewport,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Consume the loop, returning the world.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    /// Sync the camera, then run one ECS tick and its bookkeeping.
    pub fn tick(&mut self, dt: Duration) {
        self.tick_id += 1;
        self.sync_camera();
        let stats = self.world.tick();
        if let Some(time) = self.world.resource_mut::<FrameTime>() {
            time.advance(dt);
        }
        debug!(
            tick_id = self.tick_id,
            dt = dt.as_secs_f64(),
            systems = stats.systems,
            started = stats.started,
            "tick complete"
        );
    }

    /// Update the camera aspect ratio if the viewport changed size.
    fn sync_camera(&mut self) {
        let Some(viewport) = self.world.resource::<Viewport>().copied() else {
            return;
        };
        if self.last_viewport == Some(viewport) {
            return;
        }
        self.last_viewport = Some(viewport);
        if let Some(camera) = self.world.resource_mut::<Camera>() {
            camera.ratio = viewport.ratio();
            debug!(
                width = viewport.width,
                height = viewport.height,
                ratio = camera.ratio,
                "viewport resized"
            );
        }
    }

    /// Run frames until the tick limit, window close or a platform failure,
    /// then shut the world down.
    pub fn run(&mut self, platform: &mut dyn Platform) -> StopReason {
        let tick_duration = if self.config.tick_rate > 0.0 {
            Some(Duration::from_secs_f64(1.0 / self.config.tick_rate))
        } else {
            None
        };

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        let mut last = Instant::now();
        let reason = loop {
            let start = Instant::now();

            if let Err(err) = platform.draw(&mut self.world) {
                error!(tick_id = self.tick_id, error = format!("{err:#}"), "failed to draw");
                break StopReason::PlatformError;
            }
            if let Err(err) = platform.update_window(&mut self.world) {
                error!(tick_id = self.tick_id, error = format!("{err:#}"), "window update failed");
                break StopReason::PlatformError;
            }

            let now = Instant::now();
            self.tick(now - last);
            last = now;

            if let Err(err) = platform.end_frame(&mut self.world) {
                warn!(tick_id = self.tick_id, error = format!("{err:#}"), "end of frame failed");
            }

            if self.config.max_ticks > 0 && self.tick_id >= self.config.max_ticks {
                break StopReason::TickLimit;
            }
            if platform.should_close() {
                break StopReason::Closed;
            }

            if let Some(budget) = tick_duration {
                let elapsed = start.elapsed();
                if elapsed < budget {
                    std::thread::sleep(budget - elapsed);
                } else {
                    warn!(
                        tick_id = self.tick_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = budget.as_millis() as u64,
                        "tick exceeded time budget"
                    );
                }
            }
        };

        info!(ticks = self.tick_id, ?reason, "tick loop complete");
        self.world.shutdown();
        reason
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use engine_component::{Component, Context};

    use super::*;

    /// Records the camera ratio it sees on every update.
    #[derive(Debug, Clone, Default)]
    struct RatioWatch(Rc<RefCell<Vec<f32>>>);

    impl Component for RatioWatch {
        fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
            if let Some(camera) = cx.resource::<Camera>() {
                self.0.borrow_mut().push(camera.ratio);
            }
            Ok(())
        }
    }

    /// Headless platform that resizes the window on a given frame and fails
    /// drawing on another.
    #[derive(Default)]
    struct Scripted {
        frame: u64,
        resize_on: Option<u64>,
        fail_on: Option<u64>,
        close_on: Option<u64>,
        ended: u64,
    }

    impl Platform for Scripted {
        fn draw(&mut self, _world: &mut World) -> anyhow::Result<()> {
            self.frame += 1;
            if self.fail_on == Some(self.frame) {
                anyhow::bail!("device lost");
            }
            Ok(())
        }

        fn update_window(&mut self, world: &mut World) -> anyhow::Result<()> {
            if self.resize_on == Some(self.frame) {
                world.insert_resource(Viewport::new(400, 800));
            }
            Ok(())
        }

        fn end_frame(&mut self, _world: &mut World) -> anyhow::Result<()> {
            self.ended += 1;
            Ok(())
        }

        fn should_close(&self) -> bool {
            self.close_on == Some(self.frame)
        }
    }

    fn fast(max_ticks: u64) -> TickConfig {
        TickConfig {
            tick_rate: 0.0,
            max_ticks,
        }
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut tick_loop = TickLoop::new(TickConfig::default(), World::new());
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick(Duration::from_millis(16));
        tick_loop.tick(Duration::from_millis(16));
        assert_eq!(tick_loop.tick_id(), 2);
        assert_eq!(tick_loop.world().tick_count(), 2);
        assert_eq!(tick_loop.world().resource::<FrameTime>().unwrap().frames, 2);
    }

    #[test]
    fn test_run_limited_ticks() {
        let mut tick_loop = TickLoop::new(fast(5), World::new());
        let mut platform = Scripted::default();
        assert_eq!(tick_loop.run(&mut platform), StopReason::TickLimit);
        assert_eq!(tick_loop.tick_id(), 5);
        assert_eq!(platform.ended, 5);
        assert!(tick_loop.world().is_shut_down());
    }

    #[test]
    fn test_draw_failure_stops_loop() {
        let mut tick_loop = TickLoop::new(fast(0), World::new());
        let mut platform = Scripted {
            fail_on: Some(3),
            ..Scripted::default()
        };
        assert_eq!(tick_loop.run(&mut platform), StopReason::PlatformError);
        assert_eq!(tick_loop.tick_id(), 2);
        assert!(tick_loop.world().is_shut_down());
    }

    #[test]
    fn test_close_stops_loop() {
        let mut tick_loop = TickLoop::new(fast(0), World::new());
        let mut platform = Scripted {
            close_on: Some(4),
            ..Scripted::default()
        };
        assert_eq!(tick_loop.run(&mut platform), StopReason::Closed);
        assert_eq!(tick_loop.tick_id(), 4);
    }

    #[test]
    fn test_resize_updates_camera_ratio() {
        let mut world = World::new();
        world.insert_resource(Viewport::new(800, 400));
        world.insert_resource(Camera::new(Viewport::new(800, 400), 90.0));
        let mut tick_loop = TickLoop::new(fast(3), world);
        let mut platform = Scripted {
            resize_on: Some(2),
            ..Scripted::default()
        };
        tick_loop.run(&mut platform);
        let camera = tick_loop.world().resource::<Camera>().unwrap();
        assert_eq!(camera.ratio, 0.5);
    }

    #[test]
    fn test_resize_applies_to_same_frame_tick() {
        let mut world = World::new();
        world.insert_resource(Viewport::new(800, 400));
        world.insert_resource(Camera::new(Viewport::new(800, 400), 90.0));
        let seen = RatioWatch::default();
        world.construct_type("ratio_watch", seen.clone()).unwrap();
        let entity = world.new_entity(None).unwrap();
        world.attach_named(entity, "ratio_watch").unwrap();

        let mut tick_loop = TickLoop::new(fast(3), world);
        let mut platform = Scripted {
            resize_on: Some(2),
            ..Scripted::default()
        };
        tick_loop.run(&mut platform);
        assert_eq!(*seen.0.borrow(), [2.0, 0.5, 0.5]);
    }
}
