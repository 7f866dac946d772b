//! Terminal block-stacking game (default binary).
//!
//! crossterm provides input and raw-mode output; frames are painted through a
//! framebuffer-based renderer. The scheduler itself lives in `blockfall::engine`.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::engine::{EventLog, GameConfig, GameLoop, RenderTarget, SurfaceSize};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Terminal-backed render target.
///
/// Leaves raw mode when dropped, so every exit path restores the terminal.
struct TerminalSurface {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalSurface {
    fn enter() -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
        })
    }

    fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.renderer.exit();
    }
}

impl RenderTarget for TerminalSurface {
    fn surface_size(&self) -> Option<SurfaceSize> {
        crossterm::terminal::size()
            .ok()
            .filter(|&(w, h)| w > 0 && h > 0)
            .map(|(w, h)| SurfaceSize::new(w, h))
    }

    fn required_size(&self) -> SurfaceSize {
        let vp = self.view.required_viewport();
        SurfaceSize::new(vp.width, vp.height)
    }

    fn present(&mut self, snap: &GameSnapshot) -> Result<()> {
        let size = self.surface_size().unwrap_or_else(|| self.required_size());
        self.view
            .render_into(snap, Viewport::new(size.width, size.height), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let seed = config.seed.unwrap_or_else(clock_seed);
    let log = EventLog::open(config.event_log_path.as_deref())?;

    let epoch = Instant::now();
    let surface = TerminalSurface::enter()?;
    let mut game = match GameLoop::new(GameSession::new(seed), surface, log, &config, 0) {
        Ok(game) => game,
        Err(err) => {
            // The surface was dropped with the failed loop, so the terminal is restored.
            eprintln!("[blockfall] cannot start: {err:#}");
            return Err(err);
        }
    };

    let result = run(&mut game, &config, epoch);

    let finished = game.finish();
    game.target_mut().exit()?;
    result?;
    finished?;

    let session = game.session();
    println!(
        "[blockfall] final score {}, lines {}, level {} (seed {})",
        session.score(),
        session.lines(),
        session.level(),
        session.seed()
    );
    Ok(())
}

fn run(game: &mut GameLoop<TerminalSurface>, config: &GameConfig, epoch: Instant) -> Result<()> {
    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut next_frame = Instant::now();

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.submit(action);
                    }
                }
                Event::Resize(_, _) => {
                    game.target_mut().renderer.invalidate();
                    game.invalidate();
                }
                _ => {}
            }
        }

        if Instant::now() >= next_frame {
            let now_ms = epoch.elapsed().as_millis() as u64;
            game.frame(now_ms)?;
            next_frame += frame;
            // Don't try to catch up after a long stall.
            if next_frame < Instant::now() {
                next_frame = Instant::now() + frame;
            }
        }
    }
}

/// Seed from wall-clock time when none is configured.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
