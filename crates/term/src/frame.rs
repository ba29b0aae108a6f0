//! Text frame built from a projection.

use crate::core::Projection;
use crate::types::{PieceKind, RenderCell, BOARD_WIDTH};

const EMPTY: &str = " .";
const GHOST: &str = "::";

/// Two-character glyph for one board cell.
pub fn cell_glyph(cell: RenderCell) -> &'static str {
    match cell {
        RenderCell::Empty => EMPTY,
        RenderCell::Ghost(_) => GHOST,
        RenderCell::Solid(kind) => solid_glyph(kind),
    }
}

fn solid_glyph(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "II",
        PieceKind::J => "JJ",
        PieceKind::L => "LL",
        PieceKind::O => "OO",
        PieceKind::S => "SS",
        PieceKind::T => "TT",
        PieceKind::Z => "ZZ",
    }
}

fn kind_label(kind: Option<PieceKind>) -> &'static str {
    match kind {
        Some(PieceKind::I) => "I",
        Some(PieceKind::J) => "J",
        Some(PieceKind::L) => "L",
        Some(PieceKind::O) => "O",
        Some(PieceKind::S) => "S",
        Some(PieceKind::T) => "T",
        Some(PieceKind::Z) => "Z",
        None => "-",
    }
}

fn status_line(view: &Projection) -> &'static str {
    if view.game_over {
        "GAME OVER  r: restart"
    } else if view.paused {
        "PAUSED  p: resume"
    } else if !view.running {
        "Enter: start"
    } else {
        ""
    }
}

/// One screen worth of text rows, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// Board with a border on the left, side panel on the right, status below.
    pub fn from_projection(view: &Projection) -> Self {
        let next: Vec<&str> = view.next.iter().map(|k| kind_label(Some(*k))).collect();
        let panel = [
            format!("Score  {}", view.score),
            format!("Level  {}", view.level),
            format!("Lines  {}", view.lines),
            String::new(),
            format!("Next   {}", next.join(" ")),
            format!("Hold   {}", kind_label(view.hold)),
        ];

        let mut lines = Vec::with_capacity(view.cells.len() + 2);
        for (y, row) in view.cells.iter().enumerate() {
            let mut line = String::with_capacity(BOARD_WIDTH as usize * 2 + 24);
            line.push('|');
            for cell in row {
                line.push_str(cell_glyph(*cell));
            }
            line.push('|');
            if let Some(side) = panel.get(y) {
                if !side.is_empty() {
                    line.push_str("  ");
                    line.push_str(side);
                }
            }
            lines.push(line);
        }

        let mut floor = String::with_capacity(BOARD_WIDTH as usize * 2 + 2);
        floor.push('+');
        floor.push_str(&"-".repeat(BOARD_WIDTH as usize * 2));
        floor.push('+');
        lines.push(floor);
        lines.push(status_line(view).to_string());

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, y: usize) -> Option<&str> {
        self.lines.get(y).map(String::as_str)
    }
}
