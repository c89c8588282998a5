//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{color_for, ActiveSnapshot, GameSnapshot, Phase};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Difficulty, MAX_TILE_NUMBER};

/// Width reserved for the score/next/controls column.
const PANEL_W: u16 = 20;

/// Key bindings listed in the side panel.
pub const CONTROLS_HELP: [(&str, &str); 8] = [
    ("←/→", "move"),
    ("↓", "soft drop"),
    ("↑", "rotate cw"),
    ("Z", "rotate ccw"),
    ("Space", "hard drop"),
    ("P", "pause"),
    ("R", "restart"),
    ("Q", "quit"),
];

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the playfield frame for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Left column of the side panel, if it fits.
    pub panel_x: Option<u16>,
}

/// Terminal renderer for the tile-merging game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Four columns fit "2048" in one cell.
        Self {
            cell_w: 4,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the frame and side panel go for this snapshot and viewport.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.width as u16 * self.cell_w + 2;
        let frame_h = snap.height as u16 * self.cell_h + 2;

        let with_panel = frame_w + 2 + PANEL_W;
        let total_w = if with_panel <= viewport.width {
            with_panel
        } else {
            frame_w
        };

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let panel_x = (total_w == with_panel).then(|| start_x + frame_w + 2);

        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
            panel_x,
        }
    }

    /// Top-left terminal position of grid cell `(row, col)`, row 0 at the bottom.
    pub fn cell_origin(&self, layout: &Layout, grid_height: u8, row: u16, col: u16) -> (u16, u16) {
        let screen_row = (grid_height as u16).saturating_sub(1).saturating_sub(row);
        (
            layout.start_x + 1 + col * self.cell_w,
            layout.start_y + 1 + screen_row * self.cell_h,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport on every call.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG),
        });

        let layout = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        self.draw_border(
            fb,
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for row in 0..snap.height as u16 {
            for col in 0..snap.width as u16 {
                let (x, y) = self.cell_origin(&layout, snap.height, row, col);
                match snap.cell(row as usize, col as usize) {
                    Some(number) => self.draw_tile(fb, x, y, number),
                    None => self.draw_empty(fb, x, y),
                }
            }
        }

        // Rows above the top edge stay hidden until the piece falls into view.
        if let Some(active) = &snap.active {
            for &(p, number) in &active.tiles {
                if p.x < 0 || p.y < 0 || p.x >= snap.width as i32 || p.y >= snap.height as i32 {
                    continue;
                }
                let (x, y) = self.cell_origin(&layout, snap.height, p.y as u16, p.x as u16);
                self.draw_tile(fb, x, y, number);
            }
        }

        if let Some(panel_x) = layout.panel_x {
            self.draw_side_panel(fb, snap, viewport, panel_x, layout.start_y);
        }

        match snap.phase {
            Phase::Menu => {
                let lines = menu_lines(snap.difficulty);
                self.draw_overlay(fb, &layout, &lines);
            }
            Phase::Paused => {
                let score = format!("Score: {}", snap.score);
                self.draw_overlay(fb, &layout, &["PAUSED", "", score.as_str(), "", "P to resume"]);
            }
            Phase::GameOver => {
                let score = format!("Your Score: {}", snap.score);
                let verdict = if snap.highest_number >= MAX_TILE_NUMBER {
                    "Congratulations! You reached 2048!"
                } else {
                    "You Lost :("
                };
                self.draw_overlay(
                    fb,
                    &layout,
                    &["GAME OVER", "", score.as_str(), verdict, "", "R to restart, Q to quit"],
                );
            }
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let style = CellStyle::new(BOARD_BG, EMPTY_BG).dim();
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(x + (self.cell_w - 1) / 2, y + self.cell_h / 2, '·', style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, number: u16) {
        let colors = color_for(number);
        let style = CellStyle::new(colors.foreground, colors.background).bold();
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);

        let digits = decimal_len(number as u32);
        let tx = x + self.cell_w.saturating_sub(digits) / 2;
        fb.put_u32(tx, y + self.cell_h / 2, number as u32, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = y.saturating_add(self.draw_preview(fb, &snap.next, panel_x, y));
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, difficulty_label(snap.difficulty), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HIGHEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.highest_number as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CONTROLS", label);
        y = y.saturating_add(1);
        let dim = value.dim();
        for (key, action) in CONTROLS_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 7, y, action, dim);
            y = y.saturating_add(1);
        }
    }

    /// Draw the upcoming piece trimmed to its tiles. Returns the rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, next: &ActiveSnapshot, x: u16, y: u16) -> u16 {
        let Some(min_x) = next.tiles.iter().map(|(p, _)| p.x).min() else {
            return 0;
        };
        let Some(max_y) = next.tiles.iter().map(|(p, _)| p.y).max() else {
            return 0;
        };
        let min_y = next.tiles.iter().map(|(p, _)| p.y).min().unwrap_or(max_y);

        for &(p, number) in &next.tiles {
            let px = x + (p.x - min_x) as u16 * self.cell_w;
            let py = y + (max_y - p.y) as u16 * self.cell_h;
            self.draw_tile(fb, px, py, number);
        }
        (max_y - min_y + 1) as u16 * self.cell_h
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 40, 50)).bold();
        let text_w = lines.iter().map(|l| l.chars().count() as u16).max().unwrap_or(0);
        let inner_w = layout.frame_w.saturating_sub(2);
        let box_w = (text_w + 4).min(inner_w);
        let box_h = lines.len() as u16 + 2;

        let x = layout.start_x + 1 + inner_w.saturating_sub(box_w) / 2;
        let y = layout.start_y + layout.frame_h.saturating_sub(box_h) / 2;
        fb.fill_rect(x, y, box_w, box_h, ' ', style);
        for (i, line) in lines.iter().enumerate() {
            fb.put_centered(x, y + 1 + i as u16, box_w, line, style);
        }
    }
}

fn menu_lines(selected: Difficulty) -> [&'static str; 8] {
    let mark = |d: Difficulty, on: &'static str, off: &'static str| {
        if d == selected {
            on
        } else {
            off
        }
    };
    [
        "TETRIS 2048",
        "",
        mark(Difficulty::Easy, "> 1 Easy   <", "  1 Easy    "),
        mark(Difficulty::Medium, "> 2 Medium <", "  2 Medium  "),
        mark(Difficulty::Hard, "> 3 Hard   <", "  3 Hard    "),
        "",
        "Enter to start",
        "Q to quit",
    ]
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "EASY",
        Difficulty::Medium => "MEDIUM",
        Difficulty::Hard => "HARD",
    }
}

fn decimal_len(mut n: u32) -> u16 {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}
