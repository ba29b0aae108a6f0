//! Render projection - the read-only view a renderer consumes
//!
//! The projection is derived from committed state on every call and never
//! stored back into the game, so logical and visual state cannot drift.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::game_state::{ActivePiece, GameState};
use crate::types::{PieceKind, RenderCell, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

/// Display grid, row-major, top row first.
pub type RenderGrid = [[RenderCell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Projection {
    pub cells: RenderGrid,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub next: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    pub hold: Option<PieceKind>,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            cells: [[RenderCell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            score: 0,
            level: 0,
            lines: 0,
            running: false,
            paused: false,
            game_over: false,
            next: ArrayVec::new(),
            hold: None,
        }
    }
}

impl Projection {
    /// Cell at (x, y), if on the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<RenderCell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Whether commands that move pieces would currently be accepted
    pub fn playable(&self) -> bool {
        self.running && !self.paused && !self.game_over
    }
}

/// Overlay the ghost and the active piece on the committed board.
///
/// Ghost cells only land on empty board cells; the active piece always wins.
pub fn render_cells(board: &Board, active: Option<&ActivePiece>, ghost_y: Option<i8>) -> RenderGrid {
    let mut grid = [[RenderCell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for (y, row) in board.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                grid[y][x] = RenderCell::Solid(*kind);
            }
        }
    }

    let Some(active) = active else {
        return grid;
    };

    if let Some(ghost_y) = ghost_y {
        let ghost = ActivePiece {
            y: ghost_y,
            ..*active
        };
        for (x, y) in ghost.cells() {
            if let Some(slot) = slot_mut(&mut grid, x, y) {
                if slot.is_empty() {
                    *slot = RenderCell::Ghost(active.kind);
                }
            }
        }
    }

    for (x, y) in active.cells() {
        if let Some(slot) = slot_mut(&mut grid, x, y) {
            *slot = RenderCell::Solid(active.kind);
        }
    }

    grid
}

fn slot_mut(grid: &mut RenderGrid, x: i8, y: i8) -> Option<&mut RenderCell> {
    if x < 0 || y < 0 {
        return None;
    }
    grid.get_mut(y as usize)?.get_mut(x as usize)
}

impl GameState {
    /// Build a fresh projection from the current state.
    pub fn projection(&self) -> Projection {
        let active = self.active();
        let mut next = ArrayVec::new();
        next.extend(self.next_queue().iter().copied().take(NEXT_QUEUE_LEN));

        Projection {
            cells: render_cells(self.board(), active.as_ref(), self.ghost_y()),
            score: self.score(),
            level: self.level(),
            lines: self.lines(),
            running: self.running(),
            paused: self.paused(),
            game_over: self.game_over(),
            next,
            hold: self.hold_piece(),
        }
    }
}
