//! Collision and placement - pure piece-vs-board checks.

use crate::board::Board;
use crate::pieces::{ActivePiece, Shape};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Would `shape` collide if its top-left corner sat at (x, y)?
///
/// A cell collides when its column is outside the board, when it is below the
/// floor, or when it lands on an occupied board cell. Cells above the top row
/// never collide, so pieces can sit partially above the visible grid.
pub fn check_collision(board: &Board, x: i8, y: i8, shape: &Shape) -> bool {
    shape.filled_cells().any(|(dx, dy)| {
        let bx = x + dx;
        let by = y + dy;
        if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return true;
        }
        by >= 0 && board.is_occupied(bx, by)
    })
}

/// Write the piece's kind into every board cell it covers.
///
/// Cells above the top row are dropped. No collision check happens here: call
/// it only once a downward move has just been found blocked.
pub fn place_piece(board: &mut Board, piece: &ActivePiece) {
    for (x, y) in piece.cells() {
        if y >= 0 {
            board.set(x, y, Some(piece.kind));
        }
    }
}
