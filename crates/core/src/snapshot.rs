use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::pieces::{ActivePiece, Shape};
use crate::types::{Cell, PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates of every occupied cell (may include rows above the board).
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Immutable copy of everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub state: RunState,
}

impl GameSnapshot {
    /// Stable hash of the visible state, used to skip redundant redraws.
    pub fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: 0,
            state: RunState::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameSession;

    #[test]
    fn fingerprint_tracks_visible_changes() {
        let mut session = GameSession::new(3);
        let before = session.snapshot();
        assert_eq!(before.fingerprint(), session.snapshot().fingerprint());

        session.try_move(0, 1);
        let after = session.snapshot();
        assert_ne!(before.fingerprint(), after.fingerprint());
    }

    #[test]
    fn snapshot_copies_board_rows() {
        let mut session = GameSession::new(3);
        session.hard_drop();
        let snap = session.snapshot();
        let filled = snap.board.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, session.board().filled_count());
    }
}
