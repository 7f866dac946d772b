//! Single-threaded frame scheduler.
//!
//! Each [`GameLoop::frame`] call drains at most one pending intent, performs at
//! most one timed-descent check, and then presents the frame. Input can also be
//! applied synchronously between frames with [`GameLoop::dispatch`]. Every state
//! change finishes before the renderer sees the session, so a frame is never
//! painted mid-update.

use anyhow::{bail, ensure, Result};

use crate::config::GameConfig;
use crate::core::{DropClock, GameSession, StepOutcome};
use crate::event_log::EventLog;
use crate::render_throttle::RenderThrottle;
use crate::target::RenderTarget;
use crate::types::{GameAction, RunState};

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Intent drained from the pending slot, if any.
    pub applied: Option<GameAction>,
    /// Outcome of the timed descent, if one was due.
    pub descent: Option<StepOutcome>,
    pub rendered: bool,
}

pub struct GameLoop<R: RenderTarget> {
    session: GameSession,
    clock: DropClock,
    target: R,
    log: EventLog,
    throttle: RenderThrottle,
    /// Single-slot intent buffer; a newer submission replaces an older one.
    pending: Option<GameAction>,
    started_ms: u64,
}

impl<R: RenderTarget> GameLoop<R> {
    /// Set up the loop around a session and a drawing surface.
    ///
    /// Fails without touching the session when the target has no surface or the
    /// surface cannot show the whole board.
    pub fn new(
        session: GameSession,
        target: R,
        log: EventLog,
        config: &GameConfig,
        now_ms: u64,
    ) -> Result<Self> {
        let Some(size) = target.surface_size() else {
            bail!("no drawing surface attached");
        };
        let required = target.required_size();
        ensure!(
            size.fits(required),
            "drawing surface is {}x{}, need at least {}x{}",
            size.width,
            size.height,
            required.width,
            required.height
        );

        let mut game = Self {
            session,
            clock: DropClock::new(now_ms),
            target,
            log,
            throttle: RenderThrottle::new(config.static_redraw_ms),
            pending: None,
            started_ms: now_ms,
        };
        if game.session.paused() {
            game.clock.pause(now_ms);
        }
        game.flush_events(now_ms)?;
        Ok(game)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut R {
        &mut self.target
    }

    pub fn clock(&self) -> &DropClock {
        &self.clock
    }

    pub fn state(&self) -> RunState {
        self.session.state()
    }

    /// Queue an intent for the next frame. Replaces any intent not yet drained.
    pub fn submit(&mut self, action: GameAction) {
        self.pending = Some(action);
    }

    pub fn pending(&self) -> Option<GameAction> {
        self.pending
    }

    /// Force the next frame to be presented (e.g. after a surface resize).
    pub fn invalidate(&mut self) {
        self.throttle.invalidate();
    }

    /// Apply an action right away and present the result.
    ///
    /// Returns whether the action changed the session.
    pub fn dispatch(&mut self, action: GameAction, now_ms: u64) -> Result<bool> {
        let changed = self.apply(action, now_ms);
        self.flush_events(now_ms)?;
        self.render(now_ms)?;
        Ok(changed)
    }

    /// Run one scheduler frame at `now_ms`.
    pub fn frame(&mut self, now_ms: u64) -> Result<FrameReport> {
        let mut report = FrameReport::default();

        if let Some(action) = self.pending.take() {
            self.apply(action, now_ms);
            report.applied = Some(action);
        }

        if self.session.state() == RunState::Running
            && self.clock.is_due(now_ms, self.session.drop_interval_ms())
        {
            report.descent = Some(self.session.step_down());
            self.clock.mark_drop(now_ms);
        }

        self.flush_events(now_ms)?;
        report.rendered = self.render(now_ms)?;
        Ok(report)
    }

    /// Flush buffered log output.
    pub fn finish(&mut self) -> Result<()> {
        self.log.flush()
    }

    fn apply(&mut self, action: GameAction, now_ms: u64) -> bool {
        let changed = self.session.apply_action(action);
        if changed {
            match action {
                GameAction::Pause if self.session.paused() => self.clock.pause(now_ms),
                GameAction::Pause => self.clock.resume(now_ms),
                GameAction::Restart => self.clock.reset(now_ms),
                _ => {}
            }
        }
        changed
    }

    fn flush_events(&mut self, now_ms: u64) -> Result<()> {
        let events = self.session.take_events();
        if events.is_empty() || !self.log.is_enabled() {
            return Ok(());
        }

        let t_ms = now_ms.saturating_sub(self.started_ms);
        for (event, totals) in &events {
            self.log.record(event, t_ms, *totals)?;
        }
        Ok(())
    }

    fn render(&mut self, now_ms: u64) -> Result<bool> {
        let snap = self.session.snapshot();
        if !self.throttle.should_render(now_ms, snap.fingerprint()) {
            return Ok(false);
        }
        self.target.present(&snap)?;
        Ok(true)
    }
}
