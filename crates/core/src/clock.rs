//! Drop clock - decides when the next automatic descent is due.
//!
//! Timestamps are caller-supplied milliseconds from any monotonic origin.
//! Pausing freezes the time already accumulated since the last drop, and
//! resuming re-bases the last-drop timestamp so exactly that much time is
//! carried forward.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropClock {
    last_drop_ms: u64,
    /// Elapsed-since-drop captured at pause time; `Some` while paused.
    frozen_elapsed_ms: Option<u64>,
}

impl DropClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_drop_ms: now_ms,
            frozen_elapsed_ms: None,
        }
    }

    /// Restart timing from `now_ms` (new game).
    pub fn reset(&mut self, now_ms: u64) {
        *self = Self::new(now_ms);
    }

    /// Time accumulated towards the next drop.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.frozen_elapsed_ms {
            Some(frozen) => frozen,
            None => now_ms.saturating_sub(self.last_drop_ms),
        }
    }

    /// True once strictly more than `interval_ms` has passed since the last drop.
    ///
    /// Never due while paused.
    pub fn is_due(&self, now_ms: u64, interval_ms: u32) -> bool {
        self.frozen_elapsed_ms.is_none() && self.elapsed_ms(now_ms) > interval_ms as u64
    }

    /// Record that a descent step happened at `now_ms`.
    pub fn mark_drop(&mut self, now_ms: u64) {
        self.last_drop_ms = now_ms;
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.frozen_elapsed_ms.is_none() {
            self.frozen_elapsed_ms = Some(now_ms.saturating_sub(self.last_drop_ms));
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if let Some(elapsed) = self.frozen_elapsed_ms.take() {
            self.last_drop_ms = now_ms.saturating_sub(elapsed);
        }
    }
}
