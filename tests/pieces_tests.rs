//! Piece shape, rotation and collision tests

use blockfall::core::pieces::{spawn_x, KICK_OFFSETS};
use blockfall::core::{base_shape, check_collision, place_piece, ActivePiece, Board, GameSession};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn cells_of(piece: &ActivePiece) -> Vec<(i8, i8)> {
    let mut cells: Vec<_> = piece.cells().collect();
    cells.sort();
    cells
}

#[test]
fn test_every_base_shape_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(base_shape(kind).filled_cells().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_shape_sizes() {
    assert_eq!(base_shape(PieceKind::I).size(), 4);
    assert_eq!(base_shape(PieceKind::O).size(), 2);
    for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(base_shape(kind).size(), 3);
    }
}

#[test]
fn test_four_rotations_return_to_base() {
    for kind in PieceKind::ALL {
        let base = base_shape(kind);
        let mut shape = base;
        for _ in 0..4 {
            shape = shape.rotated_cw();
        }
        assert_eq!(shape, base, "{:?}", kind);
    }
}

#[test]
fn test_rotation_is_clockwise() {
    // I lies on row 1; one clockwise turn stands it on column 2.
    let vertical = base_shape(PieceKind::I).rotated_cw();
    let cells: Vec<_> = vertical.filled_cells().collect();
    assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);

    // T points up; a clockwise turn points it right.
    let t = base_shape(PieceKind::T).rotated_cw();
    assert!(t.is_filled(0, 1));
    assert!(t.is_filled(1, 1));
    assert!(t.is_filled(1, 2));
    assert!(t.is_filled(2, 1));
    assert!(!t.is_filled(1, 0));
}

#[test]
fn test_rotation_does_not_touch_base_table() {
    let before = base_shape(PieceKind::L);
    let _ = before.rotated_cw().rotated_cw();
    assert_eq!(base_shape(PieceKind::L), before);
}

#[test]
fn test_spawn_position_is_centred() {
    assert_eq!(spawn_x(4), 3);
    assert_eq!(spawn_x(3), 4);
    assert_eq!(spawn_x(2), 4);

    for kind in PieceKind::ALL {
        let piece = ActivePiece::spawn(kind);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.x, spawn_x(piece.shape.size()));
    }
}

#[test]
fn test_kick_order() {
    assert_eq!(KICK_OFFSETS, [0, -1, 1, -2, 2]);
}

#[test]
fn test_collision_with_walls_and_floor() {
    let board = Board::new();
    let o = base_shape(PieceKind::O);

    assert!(!check_collision(&board, 0, 0, &o));
    assert!(check_collision(&board, -1, 0, &o));
    assert!(check_collision(&board, BOARD_WIDTH as i8 - 1, 0, &o));
    assert!(check_collision(&board, 0, BOARD_HEIGHT as i8 - 1, &o));
    assert!(!check_collision(&board, 0, BOARD_HEIGHT as i8 - 2, &o));
}

#[test]
fn test_rows_above_board_are_free() {
    let board = Board::new();
    let o = base_shape(PieceKind::O);
    assert!(!check_collision(&board, 4, -2, &o));
    assert!(!check_collision(&board, 4, -1, &o));
}

#[test]
fn test_collision_with_locked_cells() {
    let mut board = Board::new();
    board.set(5, 10, Some(PieceKind::Z));
    let o = base_shape(PieceKind::O);

    assert!(check_collision(&board, 4, 9, &o));
    assert!(check_collision(&board, 5, 10, &o));
    assert!(!check_collision(&board, 6, 9, &o));
}

#[test]
fn test_placement_writes_only_inside_board() {
    let mut board = Board::new();
    let piece = ActivePiece {
        y: -1,
        ..ActivePiece::spawn(PieceKind::T)
    };
    assert!(!check_collision(&board, piece.x, piece.y, &piece.shape));

    place_piece(&mut board, &piece);

    // Top cell of the T is above the board and is skipped.
    assert_eq!(board.filled_count(), 3);
    for (x, y) in cells_of(&piece).into_iter().filter(|&(_, y)| y >= 0) {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::T)));
    }
}

#[test]
fn test_placement_of_every_collision_free_position_stays_in_bounds() {
    for kind in PieceKind::ALL {
        let mut shape = base_shape(kind);
        for _ in 0..4 {
            for y in -3..BOARD_HEIGHT as i8 {
                for x in -3..BOARD_WIDTH as i8 {
                    let board = Board::new();
                    if check_collision(&board, x, y, &shape) {
                        continue;
                    }
                    let mut placed = board.clone();
                    let piece = ActivePiece { kind, shape, x, y };
                    place_piece(&mut placed, &piece);
                    let expected = piece.cells().filter(|&(_, cy)| cy >= 0).count();
                    assert_eq!(placed.filled_count(), expected);
                }
            }
            shape = shape.rotated_cw();
        }
    }
}

#[test]
fn test_rotation_kicks_off_left_wall() {
    // T at x = 0 pointing up. Blocks under its stem stop the rotation in place
    // and at x - 1; x + 1 is the first free offset.
    let mut board = Board::new();
    board.set(0, 12, Some(PieceKind::S));
    board.set(1, 12, Some(PieceKind::S));

    let mut session = GameSession::with_board(board, 3);
    let piece = ActivePiece {
        kind: PieceKind::T,
        shape: base_shape(PieceKind::T),
        x: 0,
        y: 10,
    };
    session.set_active(piece);

    assert!(session.try_rotate());
    let rotated = session.active().unwrap();
    assert_eq!(rotated.x, 1);
    assert_eq!(rotated.y, 10);
    assert_eq!(rotated.shape, base_shape(PieceKind::T).rotated_cw());
}

#[test]
fn test_rotation_fails_when_every_kick_collides() {
    let mut board = Board::new();
    for y in 10..14 {
        board.fill_row_except(y, PieceKind::Z, &[4, 5]);
    }
    let mut session = GameSession::with_board(board, 3);
    let piece = ActivePiece {
        x: 3,
        y: 10,
        ..ActivePiece::spawn(PieceKind::I)
    };
    // Vertical I in column 5 of a two-wide well.
    let vertical = ActivePiece {
        shape: piece.shape.rotated_cw(),
        ..piece
    };
    session.set_active(vertical);

    assert!(!session.try_rotate());
    assert_eq!(session.active(), Some(vertical));
}
