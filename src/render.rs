// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::{
    frame::{Frame, Glyph},
    grid::Grid,
    palette::{shade_color, term_color, Rgb},
    runtime::ColorMode,
};

pub const TITLE: &str = "Rain Animation with Gradient Effect";

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_W: u16 = 2;

#[derive(Clone, Copy, Debug)]
pub struct Painter {
    pub color_mode: ColorMode,
    /// Inactive cells and the area around the grid.
    pub bg: Option<Color>,
    pub title: bool,
}

impl Painter {
    /// Top-left corner of the grid inside a `width x height` screen.
    pub fn origin(&self, grid: &Grid, width: u16, height: u16) -> (u16, u16) {
        let gw = grid.cols().saturating_mul(CELL_W);
        let title_rows = if self.title { 2 } else { 0 };
        let gh = grid.rows().saturating_add(title_rows);
        let x = width.saturating_sub(gw) / 2;
        let y = height.saturating_sub(gh) / 2 + title_rows;
        (x, y)
    }

    fn cell_color(&self, base: Rgb, shade: u16) -> Option<Color> {
        if self.color_mode == ColorMode::Mono {
            return Some(Color::White);
        }
        Some(term_color(shade_color(base, shade), self.color_mode))
    }

    fn cell_glyph(&self, base: Rgb, shade: u16) -> Glyph {
        if self.color_mode == ColorMode::Mono {
            // No background colors to dim with; use density blocks instead.
            let ch = match shade {
                0 => '█',
                1 => '▓',
                2 => '▒',
                _ => '░',
            };
            return Glyph {
                ch,
                fg: self.cell_color(base, shade),
                bg: self.bg,
            };
        }
        Glyph {
            ch: ' ',
            fg: None,
            bg: self.cell_color(base, shade),
        }
    }

    /// Draws `grid` tinted by `base` into `frame`.
    pub fn paint(&self, frame: &mut Frame, grid: &Grid, base: Rgb) {
        let (x0, y0) = self.origin(grid, frame.width, frame.height);

        if self.title && y0 >= 2 {
            let tw = TITLE.chars().count() as u16;
            let tx = frame.width.saturating_sub(tw) / 2;
            let fg = Some(term_color(base, self.color_mode));
            frame.put_str(tx, y0 - 2, TITLE, fg, self.bg);
        }

        let blank = Glyph::blank(self.bg);
        for row in 0..grid.rows() {
            for (col, cell) in grid.row(row).iter().enumerate() {
                let glyph = if cell.is_active {
                    self.cell_glyph(base, cell.shade)
                } else {
                    blank
                };
                let x = x0.saturating_add((col as u16).saturating_mul(CELL_W));
                for dx in 0..CELL_W {
                    frame.set(x.saturating_add(dx), y0.saturating_add(row), glyph);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn painter(title: bool) -> Painter {
        Painter {
            color_mode: ColorMode::TrueColor,
            bg: Some(Color::Black),
            title,
        }
    }

    #[test]
    fn grid_is_centred_below_the_title() {
        let grid = Grid::new(15, 20);
        assert_eq!(painter(true).origin(&grid, 80, 24), (20, 5));
        assert_eq!(painter(false).origin(&grid, 80, 24), (20, 4));
        assert_eq!(painter(false).origin(&grid, 10, 5), (0, 0));
    }

    #[test]
    fn active_cells_take_the_shaded_base_color() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 1, Cell::lit(0));
        grid.set(1, 1, Cell::lit(1));

        let mut frame = Frame::new(4, 2, Some(Color::Black));
        painter(false).paint(&mut frame, &grid, Rgb::new(255, 0, 255));

        let bg = |x, y| frame.get(x, y).and_then(|g| g.bg);
        assert_eq!(bg(0, 0), Some(Color::Black));
        assert_eq!(
            bg(2, 0),
            Some(Color::Rgb {
                r: 255,
                g: 0,
                b: 255
            })
        );
        assert_eq!(bg(3, 0), bg(2, 0));
        assert_eq!(
            bg(3, 1),
            Some(Color::Rgb {
                r: 204,
                g: 0,
                b: 204
            })
        );
    }

    #[test]
    fn title_is_drawn_when_there_is_room() {
        let grid = Grid::new(2, 2);
        let mut frame = Frame::new(40, 6, None);
        painter(true).paint(&mut frame, &grid, Rgb::new(0, 255, 0));
        let (_, y0) = painter(true).origin(&grid, 40, 6);
        let line: String = (0..40)
            .filter_map(|x| frame.get(x, y0 - 2).map(|g| g.ch))
            .collect();
        assert!(line.contains(TITLE));
    }
}
