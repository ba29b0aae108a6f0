//! Pieces module - piece catalog and occupancy matrices
//!
//! Each piece kind owns an ordered list of precomputed rotation states. A
//! state is a small rectangular 0/1 matrix; rotation indices wrap modulo the
//! number of states, so O has a single state and I/S/Z alternate between two.

use crate::types::PieceKind;

/// Largest side of any occupancy matrix in the catalog.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Static occupancy matrix as written in the catalog tables.
pub type Matrix = &'static [&'static [u8]];

/// Catalog entry for one piece kind.
#[derive(Debug)]
pub struct PieceDefinition {
    pub kind: PieceKind,
    pub states: &'static [Matrix],
    /// Display color as a `#rrggbb` hex string.
    pub color: &'static str,
}

const I_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::I,
    states: &[
        &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
        &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
    ],
    color: "#22d3ee",
};

const J_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::J,
    states: &[
        &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
        &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
        &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
        &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
    ],
    color: "#60a5fa",
};

const L_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::L,
    states: &[
        &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
        &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
        &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
        &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
    ],
    color: "#f59e0b",
};

const O_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::O,
    states: &[&[&[1, 1], &[1, 1]]],
    color: "#fbbf24",
};

const S_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::S,
    states: &[
        &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
        &[&[0, 1, 0], &[0, 1, 1], &[0, 0, 1]],
    ],
    color: "#34d399",
};

const T_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::T,
    states: &[
        &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
        &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
        &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
        &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
    ],
    color: "#a78bfa",
};

const Z_DEF: PieceDefinition = PieceDefinition {
    kind: PieceKind::Z,
    states: &[
        &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
        &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]],
    ],
    color: "#f87171",
};

/// Catalog indexed by [`PieceKind::index`].
static CATALOG: [PieceDefinition; 7] = [I_DEF, J_DEF, L_DEF, O_DEF, S_DEF, T_DEF, Z_DEF];

/// Get the catalog entry for a piece kind
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    &CATALOG[kind.index()]
}

/// Number of distinct rotation states for a piece kind
pub fn rotation_count(kind: PieceKind) -> usize {
    let count = definition(kind).states.len();
    assert!(count > 0, "catalog entry {:?} has no rotation states", kind);
    count
}

/// Display color for a piece kind
pub fn color(kind: PieceKind) -> &'static str {
    definition(kind).color
}

/// Get the shape for a piece kind and rotation index.
///
/// The rotation index wraps modulo the number of defined states.
pub fn get_shape(kind: PieceKind, rotation: usize) -> Shape {
    let states = definition(kind).states;
    let index = rotation % rotation_count(kind);
    Shape::from_matrix(states[index])
}

/// Get the spawn-orientation shape (rotation 0)
pub fn get_spawn_shape(kind: PieceKind) -> Shape {
    get_shape(kind, 0)
}

/// Rectangular occupancy matrix of at most 4x4 cells.
///
/// `Copy` so active pieces can be replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from a catalog matrix.
    ///
    /// Panics on an empty, ragged, or oversized matrix; those are catalog bugs.
    pub fn from_matrix(matrix: &[&[u8]]) -> Self {
        let rows = matrix.len();
        assert!(
            (1..=MAX_SHAPE_SIDE).contains(&rows),
            "shape must have 1..=4 rows, got {}",
            rows
        );
        let cols = matrix[0].len();
        assert!(
            (1..=MAX_SHAPE_SIDE).contains(&cols),
            "shape must have 1..=4 columns, got {}",
            cols
        );

        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in matrix.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape row {}", r);
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }

        Self {
            rows: rows as u8,
            cols: cols as u8,
            bits,
        }
    }

    /// Number of matrix rows
    pub fn height(&self) -> usize {
        self.rows as usize
    }

    /// Number of matrix columns
    pub fn width(&self) -> usize {
        self.cols as usize
    }

    /// Whether `(row, col)` is occupied. Out-of-range positions are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.bits[row][col]
    }

    /// Occupied cells as `(row, col)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height()).flat_map(move |r| {
            (0..self.width())
                .filter(move |&c| self.is_filled(r, c))
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Count of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Number of all-empty rows above the first occupied row.
    pub fn top_padding(&self) -> usize {
        (0..self.height())
            .take_while(|&r| !(0..self.width()).any(|c| self.is_filled(r, c)))
            .count()
    }

    /// Rotate clockwise: an R x C matrix becomes C x R with
    /// `out[c][R - 1 - r] = in[r][c]`.
    pub fn rotate_cw(&self) -> Self {
        let rows = self.height();
        let cols = self.width();
        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for r in 0..rows {
            for c in 0..cols {
                bits[c][rows - 1 - r] = self.is_filled(r, c);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        assert_eq!(rotation_count(PieceKind::I), 2);
        assert_eq!(rotation_count(PieceKind::O), 1);
        assert_eq!(rotation_count(PieceKind::S), 2);
        assert_eq!(rotation_count(PieceKind::Z), 2);
        assert_eq!(rotation_count(PieceKind::J), 4);
        assert_eq!(rotation_count(PieceKind::L), 4);
        assert_eq!(rotation_count(PieceKind::T), 4);
    }

    #[test]
    fn test_catalog_is_indexed_by_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(definition(kind).kind, kind);
        }
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
        assert_eq!(get_shape(PieceKind::S, 2), get_shape(PieceKind::S, 0));
        assert_eq!(get_shape(PieceKind::T, 5), get_shape(PieceKind::T, 1));
    }

    #[test]
    fn test_top_padding() {
        assert_eq!(get_spawn_shape(PieceKind::I).top_padding(), 1);
        assert_eq!(get_spawn_shape(PieceKind::T).top_padding(), 0);
        assert_eq!(get_shape(PieceKind::J, 2).top_padding(), 1);
    }

    #[test]
    fn test_is_filled_bounds() {
        let t = get_spawn_shape(PieceKind::T);
        assert!(t.is_filled(0, 1));
        assert!(!t.is_filled(0, 0));
        assert!(!t.is_filled(0, 3));
        assert!(!t.is_filled(3, 1));
    }

    #[test]
    fn test_rotate_cw_non_square() {
        let bar = Shape::from_matrix(&[&[1, 1, 1], &[1, 0, 0]]);
        let rotated = bar.rotate_cw();
        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated, Shape::from_matrix(&[&[1, 1], &[0, 1], &[0, 1]]));
    }

    #[test]
    #[should_panic]
    fn test_ragged_matrix_panics() {
        Shape::from_matrix(&[&[1, 1], &[1]]);
    }
}
