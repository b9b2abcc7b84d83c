//! Headless platform that plays the board with synthetic clicks.

use std::collections::VecDeque;

use engine_app::{Platform, World};
use engine_math::{Camera, Vec2, Viewport};
use engine_ui::{Pointer, Space, aspect_scale};
use tracing::{debug, trace};

use crate::board::{Board, cell_rect};

/// Presses the pointer over one queued cell every `interval` frames and
/// closes once the queue is empty.
#[derive(Debug)]
pub struct Clicker {
    queue: VecDeque<(usize, usize)>,
    interval: u64,
    frame: u64,
    clicked: usize,
}

impl Clicker {
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = (usize, usize)>, interval: u64) -> Self {
        Self {
            queue: cells.into_iter().collect(),
            interval: interval.max(1),
            frame: 0,
            clicked: 0,
        }
    }

    /// Clicks delivered so far.
    #[must_use]
    pub fn clicked(&self) -> usize {
        self.clicked
    }
}

/// Window pixel at the centre of a cell.
fn cell_centre(world: &World, row: usize, col: usize) -> Option<Vec2> {
    let viewport = *world.resource::<Viewport>()?;
    let ratio = world.resource::<Camera>().map_or(1.0, |camera| camera.ratio);
    let rect = cell_rect(row, col);
    Some(rect.ui_to_pointer(
        Vec2::new(rect.x, rect.y),
        viewport,
        aspect_scale(ratio, Space::Camera),
    ))
}

impl Platform for Clicker {
    fn draw(&mut self, world: &mut World) -> anyhow::Result<()> {
        self.frame += 1;
        if let Some(board) = world.resource::<Board>() {
            trace!(frame = self.frame, filled = board.filled(), "draw");
        }
        Ok(())
    }

    fn update_window(&mut self, world: &mut World) -> anyhow::Result<()> {
        if self.frame % self.interval != 0 {
            return Ok(());
        }
        let Some((row, col)) = self.queue.pop_front() else {
            return Ok(());
        };
        let Some(pixels) = cell_centre(world, row, col) else {
            anyhow::bail!("no viewport installed");
        };
        let pointer = world
            .resource_mut::<Pointer>()
            .ok_or_else(|| anyhow::anyhow!("no pointer installed"))?;
        pointer.press(pixels);
        self.clicked += 1;
        debug!(row, col, x = pixels.x, y = pixels.y, "synthetic click");
        Ok(())
    }

    fn end_frame(&mut self, world: &mut World) -> anyhow::Result<()> {
        if let Some(pointer) = world.resource_mut::<Pointer>() {
            pointer.release();
        }
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.queue.is_empty()
    }
}
