//! Piece catalog tests - shapes, rotation states and spawn geometry

use tetris_rules::core::pieces::{color, definition, rotation_count};
use tetris_rules::core::{get_shape, get_spawn_shape, ActivePiece, Shape};
use tetris_rules::types::PieceKind;

fn cells(shape: Shape) -> Vec<(i8, i8)> {
    shape.cells().collect()
}

#[test]
fn test_every_state_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in 0..rotation_count(kind) {
            let shape = get_shape(kind, rotation);
            assert_eq!(shape.cell_count(), 4, "{:?} state {}", kind, rotation);
        }
    }
}

#[test]
fn test_i_piece_shapes() {
    let flat = get_shape(PieceKind::I, 0);
    assert_eq!((flat.height(), flat.width()), (4, 4));
    assert_eq!(cells(flat), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);

    let upright = get_shape(PieceKind::I, 1);
    assert_eq!(cells(upright), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_o_piece_single_state() {
    let o = get_spawn_shape(PieceKind::O);
    assert_eq!((o.height(), o.width()), (2, 2));
    assert_eq!(rotation_count(PieceKind::O), 1);
    assert_eq!(get_shape(PieceKind::O, 1), o);
}

#[test]
fn test_t_piece_states() {
    assert_eq!(cells(get_shape(PieceKind::T, 0)), vec![(0, 1), (1, 0), (1, 1), (1, 2)]);
    assert_eq!(cells(get_shape(PieceKind::T, 1)), vec![(0, 1), (1, 1), (1, 2), (2, 1)]);
    assert_eq!(cells(get_shape(PieceKind::T, 2)), vec![(1, 0), (1, 1), (1, 2), (2, 1)]);
    assert_eq!(cells(get_shape(PieceKind::T, 3)), vec![(0, 1), (1, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_rotate_cw_matches_catalog_for_t() {
    let spawn = get_spawn_shape(PieceKind::T);
    assert_eq!(spawn.rotate_cw(), get_shape(PieceKind::T, 1));
    assert_eq!(spawn.rotate_cw().rotate_cw(), get_shape(PieceKind::T, 2));
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = get_spawn_shape(kind);
        assert_eq!(shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), shape);
    }
}

#[test]
fn test_spawn_positions() {
    let i = ActivePiece::spawn(PieceKind::I);
    assert_eq!((i.x, i.y), (3, -1));

    let o = ActivePiece::spawn(PieceKind::O);
    assert_eq!((o.x, o.y), (4, 0));

    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        let piece = ActivePiece::spawn(kind);
        assert_eq!((piece.x, piece.y), (3, 0), "{:?}", kind);
        assert_eq!(piece.rotation, 0);
    }
}

#[test]
fn test_colors() {
    assert_eq!(color(PieceKind::I), "#22d3ee");
    assert_eq!(color(PieceKind::Z), "#f87171");
    for kind in PieceKind::ALL {
        let hex = definition(kind).color;
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
    }
}
