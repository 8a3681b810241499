//! Optional JSONL session log.
//!
//! Each record is one JSON object per line with a `type` tag. Write failures never reach
//! the game: the first one disables the log and is kept for [`SessionLog::take_error`].

use std::fs::{File, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{GameState, LockEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionRecord {
    SessionStart {
        seed: u32,
        ts_ms: u64,
    },
    Lock {
        piece: String,
        lines_cleared: u32,
        points: u32,
        score: u32,
        lines: u32,
        level: u32,
    },
    LevelUp {
        level: u32,
        drop_interval_ms: u32,
    },
    Pause {
        paused: bool,
    },
    Restart {
        score: u32,
        lines: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
    },
}

impl SessionRecord {
    /// Lock record for `event`, with totals taken from `state` after the lock.
    pub fn lock(event: &LockEvent, state: &GameState) -> Self {
        SessionRecord::Lock {
            piece: event.kind.as_str().to_string(),
            lines_cleared: event.lines_cleared,
            points: event.points,
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
        }
    }

    pub fn game_over(state: &GameState) -> Self {
        SessionRecord::GameOver {
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
        }
    }
}

pub struct SessionLog<W: Write = File> {
    out: Option<W>,
    buf: Vec<u8>,
    error: Option<anyhow::Error>,
}

impl SessionLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open session log {}", path))?;
        Ok(Self::with_writer(file))
    }

    /// A log that discards every record.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            error: None,
        }
    }
}

impl<W: Write> SessionLog<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn writer(&self) -> Option<&W> {
        self.out.as_ref()
    }

    pub fn record(&mut self, record: &SessionRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let written = serde_json::to_writer(&mut self.buf, record)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                self.buf.push(b'\n');
                out.write_all(&self.buf)?;
                out.flush()?;
                Ok(())
            });

        if let Err(err) = written {
            self.out = None;
            self.error = Some(err.context("session log disabled"));
        }
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }
}

/// Milliseconds since the Unix epoch, for `sessionStart`.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
