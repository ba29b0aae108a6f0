//! JSON-lines session event log
//!
//! Records are pushed through an unbounded channel so the session task never
//! waits on disk. A writer task drains the channel into an append-only file,
//! one JSON object per line.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tetris_rules_core::{GameState, LockEvent};

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Started {
        seed: Option<u32>,
    },
    Reset,
    Locked {
        piece: &'static str,
        y: i8,
        lines_cleared: u32,
        points: u32,
        score: u32,
        level: u32,
        lines: u32,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        score: u32,
        level: u32,
        lines: u32,
    },
}

impl EventRecord {
    /// Records produced by one lock, in the order they happened.
    pub fn from_lock(event: &LockEvent, state: &GameState) -> Vec<EventRecord> {
        let mut records = Vec::with_capacity(2);
        if event.game_over {
            records.push(EventRecord::GameOver {
                score: state.score(),
                level: state.level(),
                lines: state.lines(),
            });
            return records;
        }

        records.push(EventRecord::Locked {
            piece: event.kind.as_str(),
            y: event.y,
            lines_cleared: event.lines_cleared,
            points: event.points,
            score: state.score(),
            level: state.level(),
            lines: state.lines(),
        });
        if event.level_up {
            records.push(EventRecord::LevelUp {
                level: state.level(),
            });
        }
        records
    }
}

/// Wire shape of a record: the record plus a sequence number and wall clock.
#[derive(Serialize)]
struct Line<'a> {
    seq: u64,
    ts_ms: u64,
    #[serde(flatten)]
    record: &'a EventRecord,
}

/// Cheap, cloneable handle for emitting records.
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<EventRecord>,
}

impl EventLog {
    /// A log backed by a plain channel; the caller consumes the records.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EventRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Open (or create) `path` for appending and spawn the writer task.
    ///
    /// Must be called from inside a tokio runtime.
    pub async fn open(path: &str) -> Result<(Self, JoinHandle<()>)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open event log {}", path))?;

        let (log, rx) = Self::channel();
        let writer = tokio::spawn(write_lines(file, rx));
        Ok((log, writer))
    }

    /// Queue a record. Records sent after the writer stopped are dropped.
    pub fn record(&self, record: EventRecord) {
        let _ = self.tx.send(record);
    }
}

async fn write_lines(file: tokio::fs::File, rx: mpsc::UnboundedReceiver<EventRecord>) {
    if let Err(e) = drain_into(file, rx).await {
        eprintln!("[EventLog] {}, closing log", e);
    }
}

/// Write every record as a JSON line until the channel closes, then flush.
/// Returns the number of records taken off the channel.
async fn drain_into<W>(
    mut out: W,
    mut rx: mpsc::UnboundedReceiver<EventRecord>,
) -> io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(512);
    let mut seq: u64 = 0;

    while let Some(record) = rx.recv().await {
        seq += 1;
        let line = Line {
            seq,
            ts_ms: unix_millis(),
            record: &record,
        };

        buf.clear();
        if let Err(e) = serde_json::to_writer(&mut buf, &line) {
            eprintln!("[EventLog] Failed to encode record {}: {}", seq, e);
            continue;
        }
        buf.push(b'\n');
        if let Err(e) = out.write_all(&buf).await {
            let message = format!("write of record {} failed: {}", seq, e);
            return Err(io::Error::new(e.kind(), message));
        }
    }

    if let Err(e) = out.flush().await {
        let message = format!("final flush after {} records failed: {}", seq, e);
        return Err(io::Error::new(e.kind(), message));
    }
    Ok(seq)
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
