//! Framebuffer and style types for terminal rendering.

pub use crate::types::Rgb;

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are reset.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write a string left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x as usize + i;
            if cx >= self.width as usize {
                break;
            }
            self.put_char(cx as u16, y, ch, style);
        }
    }

    /// Write a string centred in `[x, x + w)`.
    pub fn put_centered(&mut self, x: u16, y: u16, w: u16, s: &str, style: CellStyle) {
        let len = s.chars().count() as u16;
        self.put_str(x.saturating_add(w.saturating_sub(len) / 2), y, s, style);
    }

    /// Write a number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for i in 0..len {
            let ch = digits[len - 1 - i] as char;
            self.put_char(x.saturating_add(i as u16), y, ch, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Concatenate every row, for searching rendered text in tests.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }
}
