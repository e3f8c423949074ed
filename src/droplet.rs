// Copyright (c) 2026 rezky_nightky

use crate::{cell::Cell, grid::Grid};

/// A falling drop. `position` is the row of the leading (bottom-most) cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Raindrop {
    pub column: u16,
    pub height: u16,
    pub position: u32,
    pub delay: u32,
}

impl Raindrop {
    pub fn new(column: u16, height: u16, delay: u32) -> Self {
        Self {
            column,
            height,
            position: 0,
            delay,
        }
    }

    /// Rows past which the whole drop has left a grid of `rows` rows.
    fn exit_line(&self, rows: u16) -> u32 {
        rows as u32 + self.height as u32
    }

    /// Advances one tick and paints the drop into `grid`.
    ///
    /// While delayed the drop only counts down and stays invisible. Returns
    /// `false` once the drop has fully exited and should be discarded.
    pub fn advance(&mut self, grid: &mut Grid) -> bool {
        if self.delay > 0 {
            self.delay -= 1;
            return true;
        }

        self.position += 1;
        self.paint(grid);
        self.position < self.exit_line(grid.rows())
    }

    fn paint(&self, grid: &mut Grid) {
        for shade in 0..self.height {
            let Some(row) = self.position.checked_sub(shade as u32) else {
                break;
            };
            if row < grid.rows() as u32 {
                grid.set(row as u16, self.column, Cell::lit(shade));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delayed_drop_counts_down_without_painting() {
        let mut g = Grid::new(15, 20);
        let mut d = Raindrop::new(3, 4, 2);
        assert!(d.advance(&mut g));
        assert_eq!((d.delay, d.position), (1, 0));
        assert!(d.advance(&mut g));
        assert_eq!((d.delay, d.position), (0, 0));
        assert_eq!(g.active_count(), 0);
    }

    #[test]
    fn head_is_brightest_and_tail_dims_upward() {
        let mut g = Grid::new(15, 20);
        let mut d = Raindrop {
            column: 7,
            height: 5,
            position: 9,
            delay: 0,
        };
        assert!(d.advance(&mut g));
        assert_eq!(d.position, 10);
        for (row, shade) in [(10, 0), (9, 1), (8, 2), (7, 3), (6, 4)] {
            assert_eq!(g.get(row, 7), Some(Cell::lit(shade)));
        }
        assert_eq!(g.active_count(), 5);
    }

    #[test]
    fn partially_entered_drop_clips_at_top() {
        let mut g = Grid::new(15, 20);
        let mut d = Raindrop::new(0, 8, 0);
        d.advance(&mut g);
        assert_eq!(g.get(1, 0), Some(Cell::lit(0)));
        assert_eq!(g.get(0, 0), Some(Cell::lit(1)));
        assert_eq!(g.active_count(), 2);
    }

    #[test]
    fn drop_is_removed_once_its_tail_leaves_the_grid() {
        let mut g = Grid::new(15, 20);
        let mut d = Raindrop {
            column: 0,
            height: 4,
            position: 16,
            delay: 0,
        };
        assert!(d.advance(&mut g));
        assert_eq!(g.get(14, 0), Some(Cell::lit(3)));
        assert_eq!(g.active_count(), 1);

        // Fully below the grid but 18 < 15 + 4, so still retained.
        let mut g = Grid::new(15, 20);
        assert!(d.advance(&mut g));
        assert_eq!(g.active_count(), 0);

        assert!(!d.advance(&mut g));
        assert_eq!(d.position, 19);
        assert_eq!(g.active_count(), 0);
    }

    #[test]
    fn delay_never_removes_a_drop() {
        let mut g = Grid::new(2, 2);
        let mut d = Raindrop {
            column: 1,
            height: 4,
            position: 100,
            delay: 3,
        };
        for _ in 0..3 {
            assert!(d.advance(&mut g));
        }
        assert!(!d.advance(&mut g));
    }
}
