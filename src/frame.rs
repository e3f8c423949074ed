// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// One terminal character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Glyph {
    pub fn blank(bg: Option<Color>) -> Self {
        Self { ch: ' ', fg: None, bg }
    }
}

/// Screen-sized glyph buffer that remembers which cells changed since the
/// last draw.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Glyph>,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Glyph::blank(bg); len],
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
        } else {
            for &i in &self.dirty {
                self.dirty_map[i] = false;
            }
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Glyph> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Glyph {
        self.cells[i]
    }

    /// Writes `glyph`, marking the cell dirty only if it actually changed.
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i] == glyph {
            return;
        }
        self.cells[i] = glyph;
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Option<Color>, bg: Option<Color>) {
        for (dx, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else {
                break;
            };
            self.set(x.saturating_add(dx), y, Glyph { ch, fg, bg });
        }
    }
}
