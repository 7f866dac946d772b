//! Pieces module - tetromino shape matrices and rotation
//!
//! Each kind has an immutable square base matrix (I is 4x4, O is 2x2, the rest
//! 3x3). Rotation always produces a fresh matrix from the current one; the base
//! table is never touched.

use crate::types::{PieceKind, BOARD_WIDTH, MAX_SHAPE_SIZE};

/// Horizontal offsets tried, in order, when placing a rotated shape.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Square occupancy matrix of side `size` (2..=4), stored in a fixed 4x4 array.
///
/// Cells outside `size` are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from row strings where `#` marks an occupied cell.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square of side 2 to 4.
    pub const fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(size >= 2 && size <= MAX_SHAPE_SIZE, "shape side must be 2..=4");
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < size {
            let bytes = rows[r].as_bytes();
            assert!(bytes.len() == size, "shape rows must be square");
            let mut c = 0;
            while c < size {
                cells[r][c] = bytes[c] == b'#';
                c += 1;
            }
            r += 1;
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether (row, col) is occupied. Out-of-range coordinates are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.cells[row][col]
    }

    /// Occupied cells as `(col, row)` offsets from the top-left corner.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |r| {
            (0..n)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// 90° clockwise rotation: rotated (i, j) = source (n-1-j, i).
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Shape {
            size: self.size,
            cells,
        }
    }
}

const I_SHAPE: Shape = Shape::from_rows(&["....", "####", "....", "...."]);
const O_SHAPE: Shape = Shape::from_rows(&["##", "##"]);
const T_SHAPE: Shape = Shape::from_rows(&[".#.", "###", "..."]);
const S_SHAPE: Shape = Shape::from_rows(&[".##", "##.", "..."]);
const Z_SHAPE: Shape = Shape::from_rows(&["##.", ".##", "..."]);
const J_SHAPE: Shape = Shape::from_rows(&["#..", "###", "..."]);
const L_SHAPE: Shape = Shape::from_rows(&["..#", "###", "..."]);

/// Immutable base shape for a piece kind.
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Column where a shape of the given side spawns: centred, rounded down.
pub fn spawn_x(size: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (size / 2) as i8
}

/// The falling piece: kind, current (possibly rotated) shape and top-left offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A fresh piece at the spawn position (horizontally centred, y = 0).
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.size()),
            y: 0,
        }
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece shifted by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Try to rotate a piece clockwise with horizontal wall kicks.
///
/// `collides(x, y, shape)` reports whether the shape would collide at that
/// offset. Returns the rotated piece at the first free kick offset, or `None`
/// if every offset collides.
pub fn try_rotate(
    piece: &ActivePiece,
    collides: impl Fn(i8, i8, &Shape) -> bool,
) -> Option<ActivePiece> {
    let rotated = piece.shape.rotated_cw();

    KICK_OFFSETS.iter().find_map(|&dx| {
        let x = piece.x + dx;
        if collides(x, piece.y, &rotated) {
            None
        } else {
            Some(ActivePiece {
                shape: rotated,
                x,
                ..*piece
            })
        }
    })
}
