// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;

/// Row-major `rows x cols` snapshot produced by one simulator tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: u16, cols: u16) -> Self {
        let len = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, row: u16, col: u16) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: u16, col: u16, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    pub fn row(&self, row: u16) -> &[Cell] {
        let w = self.cols as usize;
        let start = row as usize * w;
        self.cells.get(start..start + w).unwrap_or(&[])
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_active).count()
    }

    /// `(row, col, cell)` for every active cell, top to bottom.
    #[allow(dead_code)]
    pub fn active_cells(&self) -> impl Iterator<Item = (u16, u16, Cell)> + '_ {
        let w = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_active)
            .map(move |(i, c)| ((i / w) as u16, (i % w) as u16, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_blank_and_sized() {
        let g = Grid::new(3, 4);
        assert_eq!((g.rows(), g.cols()), (3, 4));
        assert_eq!(g.active_count(), 0);
        for r in 0..3 {
            assert_eq!(g.row(r).len(), 4);
        }
        assert!(g.row(3).is_empty());
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut g = Grid::new(2, 2);
        g.set(2, 0, Cell::lit(0));
        g.set(0, 2, Cell::lit(0));
        assert_eq!(g.active_count(), 0);

        g.set(1, 0, Cell::lit(3));
        assert_eq!(g.get(1, 0), Some(Cell::lit(3)));
        assert_eq!(g.active_cells().collect::<Vec<_>>(), vec![(1, 0, Cell::lit(3))]);
    }
}
