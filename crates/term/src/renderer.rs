//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is written in full. After
//! that only runs of changed cells are sent.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Horizontal span of cells that differ between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame flushed to the terminal.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
            entered: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.last = None;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Current terminal size as a viewport.
    pub fn viewport(&self) -> Result<Viewport> {
        let (w, h) = terminal::size().context("query terminal size")?;
        Ok(Viewport::new(w, h))
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// After the call `fb` holds stale contents the caller is expected to
    /// overwrite; this keeps two buffers alive without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .context("write frame to stdout")?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Tracks the style last sent so repeated cells skip the escape codes.
struct StyleCursor(Option<CellStyle>);

impl StyleCursor {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.0 == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.0 = Some(style);
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut cursor = StyleCursor(None);
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_span(fb, 0, y, fb.width(), &mut cursor, out)?;
    }
    finish(out)
}

/// Encode only the runs that changed between `prev` and `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut cursor = StyleCursor(None);
    for run in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        write_span(next, run.x, run.y, run.len, &mut cursor, out)?;
    }
    finish(out)
}

fn write_span(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    cursor: &mut StyleCursor,
    out: &mut Vec<u8>,
) -> Result<()> {
    for dx in 0..len {
        let cell = fb.get(x + dx, y).unwrap_or_default();
        cursor.apply(out, cell.style)?;
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Row-wise runs of differing cells. A size mismatch marks every row dirty.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let w = next.width();
    if prev.width() != w || prev.height() != next.height() {
        return (0..next.height())
            .map(|y| Run { x: 0, y, len: w })
            .collect();
    }

    let mut runs = Vec::new();
    if w == 0 {
        return runs;
    }
    for (y, (a, b)) in prev
        .cells()
        .chunks(w as usize)
        .zip(next.cells().chunks(w as usize))
        .enumerate()
    {
        let mut start: Option<usize> = None;
        for x in 0..=w as usize {
            let differs = x < w as usize && a[x] != b[x];
            match (start, differs) {
                (None, true) => start = Some(x),
                (Some(s), false) => {
                    runs.push(Run {
                        x: s as u16,
                        y: y as u16,
                        len: (x - s) as u16,
                    });
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}
