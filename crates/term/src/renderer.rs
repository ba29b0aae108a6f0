//! TerminalRenderer: flushes text frames to a real terminal.
//!
//! Frames are compared line by line with the previous one and only changed
//! lines are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{cursor, style::Print, terminal, QueueableCommand};

use crate::core::Projection;
use crate::frame::Frame;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a projection, rewriting only lines that changed since the last draw.
    pub fn draw(&mut self, view: &Projection) -> Result<()> {
        let frame = Frame::from_projection(view);

        self.buf.clear();
        match &self.last {
            Some(prev) => encode_diff_into(prev, &frame, &mut self.buf)?,
            None => encode_full_into(&frame, &mut self.buf)?,
        }
        self.flush_buf()?;

        self.last = Some(frame);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for y in 0..frame.height() {
        write_line(frame, y, out)?;
    }
    Ok(())
}

/// Encode only the lines that differ between `prev` and `next` into `out`.
pub fn encode_diff_into(prev: &Frame, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    for y in changed_lines(prev, next) {
        write_line(next, y, out)?;
    }
    Ok(())
}

fn write_line(frame: &Frame, y: usize, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, y as u16))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    if let Some(line) = frame.line(y) {
        out.queue(Print(line))?;
    }
    Ok(())
}

/// Indices of lines that must be rewritten to turn `prev` into `next`.
fn changed_lines(prev: &Frame, next: &Frame) -> Vec<usize> {
    let height = prev.height().max(next.height());
    (0..height).filter(|&y| prev.line(y) != next.line(y)).collect()
}
