//! The sudoku board: a 9×9 grid of clickable UI cells.
//!
//! Each cell is an entity carrying a UI element. Clicking an editable cell
//! cycles its digit through `1..=9` and back to empty. Given cells have no
//! click handler, so clicks on them fall through.

use std::collections::HashMap;
use std::fmt;

use anyhow::{Context as _, bail};
use components::Announcer;
use engine_app::World;
use engine_component::Entity;
use engine_ui::{ClickHandler, MeshRef, Rect};
use tracing::{debug, info};

/// A well-known puzzle, `.` for empty cells.
pub const PUZZLE: &str = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

/// Mesh every cell is drawn with.
pub const CELL_MESH: MeshRef = MeshRef(1);

const SIZE: usize = 9;
/// Distance between cell centres in UI units.
const PITCH: f32 = 0.2;
/// Half-extent of a cell; slightly under half the pitch to leave a gap.
const HALF: f32 = 0.095;

/// Cell digits and the entity each cell is drawn by.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// `0` is empty.
    digits: [[u8; SIZE]; SIZE],
    given: [[bool; SIZE]; SIZE],
    cells: HashMap<Entity, (usize, usize)>,
}

impl Board {
    /// Parse 81 cells in row-major order. Digits are givens; `.` or `0` is
    /// empty. Whitespace is ignored.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut board = Self::default();
        let mut count = 0;
        for ch in text.chars().filter(|c| !c.is_whitespace()) {
            if count == SIZE * SIZE {
                bail!("puzzle has more than {} cells", SIZE * SIZE);
            }
            let digit = match ch {
                '.' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                other => bail!("invalid puzzle character {other:?}"),
            };
            let (row, col) = (count / SIZE, count % SIZE);
            board.digits[row][col] = digit;
            board.given[row][col] = digit != 0;
            count += 1;
        }
        if count != SIZE * SIZE {
            bail!("puzzle has {count} cells, expected {}", SIZE * SIZE);
        }
        Ok(board)
    }

    #[must_use]
    pub fn digit(&self, row: usize, col: usize) -> u8 {
        self.digits[row][col]
    }

    #[must_use]
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.given[row][col]
    }

    /// The cell drawn by `entity`.
    #[must_use]
    pub fn cell_of(&self, entity: Entity) -> Option<(usize, usize)> {
        self.cells.get(&entity).copied()
    }

    /// Advance the digit of the cell drawn by `entity`. Returns the new digit,
    /// or `None` for unknown entities and given cells.
    pub fn cycle(&mut self, entity: Entity) -> Option<u8> {
        let (row, col) = self.cell_of(entity)?;
        if self.given[row][col] {
            return None;
        }
        let digit = &mut self.digits[row][col];
        *digit = (*digit + 1) % 10;
        Some(*digit)
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.digits.iter().flatten().filter(|&&d| d != 0).count()
    }

    /// Number of rows, columns and boxes that contain a repeated digit.
    #[must_use]
    pub fn conflicts(&self) -> usize {
        let row = |i: usize| (0..SIZE).map(move |c| (i, c));
        let col = |i: usize| (0..SIZE).map(move |r| (r, i));
        let block = |i: usize| (0..SIZE).map(move |k| ((i / 3) * 3 + k / 3, (i % 3) * 3 + k % 3));

        (0..SIZE)
            .map(|i| {
                usize::from(self.repeats(row(i)))
                    + usize::from(self.repeats(col(i)))
                    + usize::from(self.repeats(block(i)))
            })
            .sum()
    }

    fn repeats(&self, cells: impl Iterator<Item = (usize, usize)>) -> bool {
        let mut seen = [false; SIZE + 1];
        for (r, c) in cells {
            let d = usize::from(self.digits[r][c]);
            if d != 0 && std::mem::replace(&mut seen[d], true) {
                return true;
            }
        }
        false
    }

    /// Returns `true` once every cell is filled without conflicts.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.filled() == SIZE * SIZE && self.conflicts() == 0
    }

    /// Editable cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE * SIZE)
            .map(|i| (i / SIZE, i % SIZE))
            .filter(|&(r, c)| !self.given[r][c])
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            if r > 0 && r % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for c in 0..SIZE {
                if c > 0 && c % 3 == 0 {
                    f.write_str("| ")?;
                }
                match self.digit(r, c) {
                    0 => f.write_str(". ")?,
                    d => write!(f, "{d} ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Rect of a cell, row 0 at the top.
#[must_use]
pub fn cell_rect(row: usize, col: usize) -> Rect {
    let centre = (SIZE / 2) as f32;
    Rect::new(
        (col as f32 - centre) * PITCH,
        (centre - row as f32) * PITCH,
        HALF,
        HALF,
    )
}

fn on_click() -> ClickHandler {
    ClickHandler::new(|_element, cx, point| {
        let entity = cx.entity();
        let board = cx
            .resource_mut::<Board>()
            .context("board resource missing")?;
        if let Some(digit) = board.cycle(entity) {
            let (row, col) = board.cell_of(entity).unwrap_or_default();
            debug!(row, col, digit, x = point.x, y = point.y, "cell clicked");
        }
        Ok(())
    })
}

/// Create one entity per cell and install `board` as a resource.
///
/// # Errors
///
/// Fails if the `"ui"` component type is not registered or the entity table
/// is too small.
pub fn build(world: &mut World, mut board: Board) -> anyhow::Result<()> {
    let root = world.new_entity(Some("board"))?;
    let announcer = world.attach_named(root, Announcer::NAME)?;
    if let Some(announcer) = world.get_mut::<Announcer>(announcer) {
        announcer.message = "sudoku board ready".to_string();
    }

    for row in 0..SIZE {
        for col in 0..SIZE {
            let entity = world.new_entity(Some(&format!("cell {row},{col}")))?;
            let click = (!board.is_given(row, col)).then(on_click);
            engine_ui::attach_element(world, entity, CELL_MESH, cell_rect(row, col), click)?;
            board.cells.insert(entity, (row, col));
        }
    }

    info!(
        cells = board.cells.len(),
        given = board.filled(),
        "board built"
    );
    world.insert_resource(board);
    Ok(())
}
