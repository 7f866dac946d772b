//! Game loop tests against an in-memory render target

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::Result;

use blockfall::core::{base_shape, ActivePiece, Board, GameSession, GameSnapshot, StepOutcome};
use blockfall::engine::{EventLog, GameConfig, GameLoop, RenderTarget, SurfaceSize};
use blockfall::types::{GameAction, PieceKind, RunState};

const REQUIRED: SurfaceSize = SurfaceSize::new(44, 22);

/// Records every presented snapshot.
struct RecordingTarget {
    size: Option<SurfaceSize>,
    frames: Vec<GameSnapshot>,
}

impl RecordingTarget {
    fn new() -> Self {
        Self::with_size(Some(SurfaceSize::new(80, 24)))
    }

    fn with_size(size: Option<SurfaceSize>) -> Self {
        Self {
            size,
            frames: Vec::new(),
        }
    }
}

impl RenderTarget for RecordingTarget {
    fn surface_size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn required_size(&self) -> SurfaceSize {
        REQUIRED
    }

    fn present(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.frames.push(*snap);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn start(session: GameSession) -> GameLoop<RecordingTarget> {
    GameLoop::new(
        session,
        RecordingTarget::new(),
        EventLog::disabled(),
        &GameConfig::default(),
        0,
    )
    .unwrap()
}

fn active_y(game: &GameLoop<RecordingTarget>) -> i8 {
    game.session().active().unwrap().y
}

#[test]
fn test_setup_fails_without_surface() {
    let result = GameLoop::new(
        GameSession::new(1),
        RecordingTarget::with_size(None),
        EventLog::disabled(),
        &GameConfig::default(),
        0,
    );
    let err = result.err().expect("setup should fail");
    assert!(err.to_string().contains("no drawing surface"));
}

#[test]
fn test_setup_fails_on_small_surface() {
    let result = GameLoop::new(
        GameSession::new(1),
        RecordingTarget::with_size(Some(SurfaceSize::new(30, 22))),
        EventLog::disabled(),
        &GameConfig::default(),
        0,
    );
    let err = result.err().expect("setup should fail");
    assert!(err.to_string().contains("need at least 44x22"));
}

#[test]
fn test_descent_waits_for_strictly_more_than_interval() {
    let mut game = start(GameSession::new(2));
    let y = active_y(&game);

    let report = game.frame(1000).unwrap();
    assert_eq!(report.descent, None);
    assert_eq!(active_y(&game), y);

    let report = game.frame(1001).unwrap();
    assert_eq!(report.descent, Some(StepOutcome::Moved));
    assert_eq!(active_y(&game), y + 1);

    // Timer restarted at 1001.
    assert_eq!(game.frame(2001).unwrap().descent, None);
    assert_eq!(game.frame(2002).unwrap().descent, Some(StepOutcome::Moved));
}

#[test]
fn test_blocked_descent_locks_piece() {
    let mut session = GameSession::new(2);
    session.set_active(ActivePiece {
        y: 18,
        ..ActivePiece::spawn(PieceKind::O)
    });
    let mut game = start(session);

    let report = game.frame(1001).unwrap();
    assert!(matches!(report.descent, Some(StepOutcome::Locked(_))));
    assert_eq!(game.session().board().filled_count(), 4);
}

#[test]
fn test_latest_submitted_intent_wins() {
    let mut game = start(GameSession::new(3));
    let x = game.session().active().unwrap().x;

    game.submit(GameAction::MoveLeft);
    game.submit(GameAction::MoveRight);
    assert_eq!(game.pending(), Some(GameAction::MoveRight));

    let report = game.frame(10).unwrap();
    assert_eq!(report.applied, Some(GameAction::MoveRight));
    assert_eq!(game.session().active().unwrap().x, x + 1);
    assert_eq!(game.pending(), None);

    // Slot is empty now.
    assert_eq!(game.frame(20).unwrap().applied, None);
}

#[test]
fn test_pause_carries_elapsed_time_forward() {
    let mut game = start(GameSession::new(4));
    let y = active_y(&game);

    game.frame(600).unwrap();
    assert!(game.dispatch(GameAction::Pause, 600).unwrap());
    assert_eq!(game.state(), RunState::Paused);

    // A long pause causes no drop.
    assert_eq!(game.frame(5000).unwrap().descent, None);
    assert_eq!(active_y(&game), y);

    assert!(game.dispatch(GameAction::Pause, 5000).unwrap());
    assert_eq!(game.state(), RunState::Running);

    // 600ms already accumulated: 400 more is not enough, 401 is.
    assert_eq!(game.frame(5400).unwrap().descent, None);
    assert_eq!(game.frame(5401).unwrap().descent, Some(StepOutcome::Moved));
    assert_eq!(active_y(&game), y + 1);
}

#[test]
fn test_game_over_freezes_until_restart() {
    let mut board = Board::new();
    board.fill_row_except(0, PieceKind::Z, &[]);
    board.fill_row_except(1, PieceKind::Z, &[]);
    let mut game = start(GameSession::with_board(board, 5));
    assert_eq!(game.state(), RunState::GameOver);

    game.submit(GameAction::HardDrop);
    let report = game.frame(5000).unwrap();
    assert_eq!(report.descent, None);
    assert_eq!(game.state(), RunState::GameOver);

    // Still rendering so the overlay shows.
    let last = game.target().frames.last().copied().unwrap();
    assert_eq!(last.state, RunState::GameOver);

    assert!(game.dispatch(GameAction::Restart, 6000).unwrap());
    assert_eq!(game.state(), RunState::Running);
    assert_eq!(game.session().board().filled_count(), 0);

    // Clock was reset at 6000.
    assert_eq!(game.frame(7000).unwrap().descent, None);
    assert_eq!(game.frame(7001).unwrap().descent, Some(StepOutcome::Moved));
}

#[test]
fn test_unchanged_frames_are_throttled() {
    let mut game = start(GameSession::new(6));

    assert!(game.frame(1).unwrap().rendered);
    assert!(!game.frame(17).unwrap().rendered);
    assert!(!game.frame(200).unwrap().rendered);
    assert!(game.frame(251).unwrap().rendered);

    // A state change renders right away.
    game.submit(GameAction::MoveLeft);
    assert!(game.frame(260).unwrap().rendered);

    game.invalidate();
    assert!(game.frame(270).unwrap().rendered);
}

#[test]
fn test_rendered_frames_are_consistent() {
    let mut game = start(GameSession::new(8));
    for t in 0..200u64 {
        if t % 5 == 0 {
            game.submit(GameAction::HardDrop);
        }
        game.frame(t * 100).unwrap();
    }

    for snap in &game.target().frames {
        let Some(active) = snap.active else {
            continue;
        };
        for (x, y) in active.cells() {
            if y >= 0 {
                assert_eq!(snap.board[y as usize][x as usize], None);
            }
        }
    }
}

#[test]
fn test_events_are_logged_as_json_lines() {
    let buf = SharedBuf::default();
    let mut game = GameLoop::new(
        GameSession::new(9),
        RecordingTarget::new(),
        EventLog::from_writer(buf.clone()),
        &GameConfig::default(),
        0,
    )
    .unwrap();

    game.dispatch(GameAction::HardDrop, 100).unwrap();
    game.dispatch(GameAction::Pause, 200).unwrap();
    game.finish().unwrap();

    let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
    let events: Vec<String> = text
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["event"].as_str().unwrap().to_string()
        })
        .collect();

    assert_eq!(events, vec!["spawn", "lock", "spawn", "pause"]);

    let lock: serde_json::Value = serde_json::from_str(text.lines().nth(1).unwrap()).unwrap();
    assert_eq!(lock["t_ms"], 100);
    assert!(lock["score"].as_u64().unwrap() > 0);
}

#[test]
fn test_logged_totals_are_taken_when_each_event_happens() {
    let mut board = Board::new();
    board.fill_row_except(18, PieceKind::L, &[0]);
    board.fill_row_except(19, PieceKind::J, &[0]);
    let mut session = GameSession::with_board(board, 10);
    session.set_active(ActivePiece {
        kind: PieceKind::I,
        shape: base_shape(PieceKind::I).rotated_cw(),
        x: -2,
        y: 16,
    });

    let buf = SharedBuf::default();
    let mut game = GameLoop::new(
        session,
        RecordingTarget::new(),
        EventLog::from_writer(buf.clone()),
        &GameConfig::default(),
        0,
    )
    .unwrap();
    game.dispatch(GameAction::HardDrop, 50).unwrap();
    game.finish().unwrap();

    let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let find = |name: &str| {
        records
            .iter()
            .find(|r| r["event"] == name)
            .cloned()
            .unwrap()
    };

    let lock = find("lock");
    assert_eq!(lock["score"], 0);
    assert_eq!(lock["lines"], 0);
    assert_eq!(lock["level"], 1);

    let cleared = find("lines_cleared");
    assert_eq!(cleared["points"], 300);
    assert_eq!(cleared["score"], 300);
    assert_eq!(cleared["lines"], 2);
    assert_eq!(cleared["level"], 1);
}

#[test]
fn test_restart_from_pause_resets_clock() {
    let mut game = start(GameSession::new(12));
    game.submit(GameAction::HardDrop);
    game.frame(100).unwrap();

    // Ignored while running.
    assert!(!game.dispatch(GameAction::Restart, 200).unwrap());
    assert!(game.session().score() > 0);

    game.dispatch(GameAction::Pause, 300).unwrap();
    assert!(game.dispatch(GameAction::Restart, 400).unwrap());
    assert_eq!(game.state(), RunState::Running);
    assert_eq!(game.session().score(), 0);

    assert_eq!(game.frame(1400).unwrap().descent, None);
    assert_eq!(game.frame(1401).unwrap().descent, Some(StepOutcome::Moved));
}
