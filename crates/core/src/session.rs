//! Game session - owns all mutable state of one game
//!
//! Ties together the board, the active piece, the piece source and the score
//! counters. Every command completes atomically: a move, rotation, lock, line
//! clear or spawn never leaves the session half-updated.
//!
//! Timing lives outside: the loop driver calls [`GameSession::step_down`] when
//! its [`crate::clock::DropClock`] says a descent is due.

use crate::board::Board;
use crate::collision::{check_collision, place_piece};
use crate::pieces::{try_rotate, ActivePiece};
use crate::rng::PieceSource;
use crate::scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind, RunState, SessionEvent, Totals, BOARD_HEIGHT};

/// Result of one automatic descent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece was blocked, so it locked.
    Locked(LockOutcome),
    /// Nothing to do (no active piece or not running).
    Idle,
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    pub points: u32,
    /// Whether the follow-up spawn collided and ended the game.
    pub game_over: bool,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    source: PieceSource,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    state: RunState,
    /// Transitions not yet consumed by an observer, with the counters as they
    /// stood when each one happened.
    events: Vec<(SessionEvent, Totals)>,
}

impl GameSession {
    /// Create a new game on an empty board and spawn the first piece
    pub fn new(seed: u64) -> Self {
        Self::with_board(Board::new(), seed)
    }

    /// Create a game on a pre-filled board.
    ///
    /// The first piece spawns immediately, so a board that blocks the spawn
    /// area starts in [`RunState::GameOver`].
    pub fn with_board(board: Board, seed: u64) -> Self {
        let mut session = Self {
            board,
            active: None,
            source: PieceSource::new(seed),
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            state: RunState::Running,
            events: Vec::new(),
        };
        session.spawn_piece();
        session
    }

    /// Discard everything and start over with a fresh board.
    ///
    /// Keeps drawing from the same piece source, so a restart is a new game rather
    /// than a replay of the previous one.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = drop_interval_ms(1);
        self.state = RunState::Running;
        self.emit(SessionEvent::Restarted);
        self.spawn_piece();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == RunState::GameOver
    }

    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// Spawn a random piece.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.source.draw();
        self.spawn(kind)
    }

    /// Spawn a specific piece kind at the centred spawn position.
    ///
    /// If the spawn position collides the session enters game over, the active
    /// piece is cleared and false is returned.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.game_over() {
            return false;
        }

        let piece = ActivePiece::spawn(kind);
        if check_collision(&self.board, piece.x, piece.y, &piece.shape) {
            self.active = None;
            self.state = RunState::GameOver;
            self.emit(SessionEvent::GameOver);
            return false;
        }

        self.active = Some(piece);
        self.emit(SessionEvent::Spawned { kind });
        true
    }

    /// Replace the active piece (puzzle setups and tests).
    ///
    /// Ignored once the game is over.
    pub fn set_active(&mut self, piece: ActivePiece) {
        if !self.game_over() {
            self.active = Some(piece);
        }
    }

    /// Move the active piece by (dx, dy) if the target is free.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if check_collision(&self.board, moved.x, moved.y, &moved.shape) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Rotate the active piece clockwise, trying wall kicks.
    ///
    /// On failure the piece keeps its shape and position.
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&active, |x, y, shape| check_collision(board, x, y, shape)) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// One row down, +1 point if it moved.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.add_score(drop_score(1, false));
        }
        moved
    }

    /// Drop to the floor (at most one board height), +2 per row, then lock.
    ///
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        let mut steps: u32 = 0;
        while steps < BOARD_HEIGHT as u32 && self.try_move(0, 1) {
            steps += 1;
        }

        self.add_score(drop_score(steps, true));
        self.lock_piece();
        steps
    }

    /// Automatic descent: move down one row, or lock if blocked.
    pub fn step_down(&mut self) -> StepOutcome {
        if self.state != RunState::Running || self.active.is_none() {
            return StepOutcome::Idle;
        }

        if self.try_move(0, 1) {
            StepOutcome::Moved
        } else {
            StepOutcome::Locked(self.lock_piece())
        }
    }

    /// Lock the active piece, clear full rows, score them and spawn the next piece.
    pub fn lock_piece(&mut self) -> LockOutcome {
        let Some(active) = self.active.take() else {
            return LockOutcome {
                lines_cleared: 0,
                points: 0,
                game_over: self.game_over(),
            };
        };

        place_piece(&mut self.board, &active);
        self.emit(SessionEvent::Locked { kind: active.kind });

        let (lines_cleared, points) = self.clear_lines();
        let game_over = !self.spawn_piece();

        LockOutcome {
            lines_cleared,
            points,
            game_over,
        }
    }

    /// Remove full rows and update lines, score, level and drop interval.
    fn clear_lines(&mut self) -> (u32, u32) {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return (0, 0);
        }

        let points = line_clear_score(cleared, self.level);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.add_score(points);
        self.emit(SessionEvent::LinesCleared {
            count: cleared as u32,
            points,
        });

        let new_level = level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = drop_interval_ms(new_level);
            self.emit(SessionEvent::LevelUp { level: new_level });
        }

        (cleared as u32, points)
    }

    pub fn totals(&self) -> Totals {
        Totals {
            score: self.score,
            lines: self.lines,
            level: self.level,
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        let totals = self.totals();
        self.events.push((event, totals));
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Flip Running <-> Paused. No effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Running => {
                self.state = RunState::Paused;
                self.emit(SessionEvent::Paused);
                true
            }
            RunState::Paused => {
                self.state = RunState::Running;
                self.emit(SessionEvent::Resumed);
                true
            }
            RunState::GameOver => false,
        }
    }

    /// Apply a game action
    ///
    /// Everything except `Restart` is a no-op after game over. `Restart` is only
    /// honoured from game over or pause, so a stray key cannot throw away a
    /// running game. Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over() && action != GameAction::Restart {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                if self.state == RunState::Running {
                    return false;
                }
                self.restart();
                true
            }
        }
    }

    /// Take the events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<(SessionEvent, Totals)> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
