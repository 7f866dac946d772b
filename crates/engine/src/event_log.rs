//! JSON-lines session event log.
//!
//! One record per line, written as events are drained from the session. When no
//! path is configured every call is a no-op.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{SessionEvent, Totals};

/// One serialized log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub event: &'static str,
    pub t_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_cleared: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

impl EventRecord {
    pub fn new(event: &SessionEvent, t_ms: u64, totals: Totals) -> Self {
        let mut record = Self {
            event: event.name(),
            t_ms,
            piece: None,
            lines_cleared: None,
            points: None,
            score: totals.score,
            lines: totals.lines,
            level: totals.level,
        };
        match *event {
            SessionEvent::Spawned { kind } | SessionEvent::Locked { kind } => {
                record.piece = Some(kind.as_str());
            }
            SessionEvent::LinesCleared { count, points } => {
                record.lines_cleared = Some(count);
                record.points = Some(points);
            }
            SessionEvent::LevelUp { .. }
            | SessionEvent::Paused
            | SessionEvent::Resumed
            | SessionEvent::GameOver
            | SessionEvent::Restarted => {}
        }
        record
    }
}

/// Optional JSON-lines sink.
pub struct EventLog {
    writer: Option<Box<dyn Write>>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// Open (append) the log at `path`, or a disabled log when `path` is `None`.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {path}"))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// Log into an arbitrary writer.
    pub fn from_writer(writer: impl Write + 'static) -> Self {
        Self {
            writer: Some(Box::new(writer)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn record(&mut self, event: &SessionEvent, t_ms: u64, totals: Totals) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let line = serde_json::to_string(&EventRecord::new(event, t_ms, totals))?;
        writeln!(writer, "{line}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}
