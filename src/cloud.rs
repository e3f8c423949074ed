// Copyright (c) 2026 rezky_nightky

use tracing::trace;

use crate::{
    config::Config, droplet::Raindrop, error::ConfigError, grid::Grid, rng::RandomSource,
};

/// Owns the live drops and turns each simulator tick into a fresh grid.
pub struct Cloud {
    rows: u16,
    cols: u16,
    spawn_threshold: f64,
    max_drops: usize,
    spawn_attempts: u32,
    min_height: u16,
    max_height: u16,
    delay_stride: u32,

    droplets: Vec<Raindrop>,
    grid: Grid,
}

impl Cloud {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            spawn_threshold: config.spawn_threshold,
            max_drops: config.max_drops,
            spawn_attempts: config.spawn_attempts,
            min_height: config.min_height,
            max_height: config.max_height,
            delay_stride: config.delay_stride,
            droplets: Vec::new(),
            grid: Grid::new(config.rows, config.cols),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn droplets(&self) -> &[Raindrop] {
        &self.droplets
    }

    #[cfg(test)]
    pub fn set_droplets(&mut self, droplets: Vec<Raindrop>) {
        self.droplets = droplets;
    }

    /// Moves every drop one step, rasterizes into a new grid, then spawns.
    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> &Grid {
        let mut grid = Grid::new(self.rows, self.cols);

        let before = self.droplets.len();
        self.droplets.retain_mut(|d| d.advance(&mut grid));
        let exited = before - self.droplets.len();

        let spawned = self.spawn_droplets(rng);

        trace!(
            live = self.droplets.len(),
            exited = exited,
            spawned = spawned,
            lit = grid.active_count(),
            "drop tick"
        );

        self.grid = grid;
        &self.grid
    }

    fn spawn_droplets(&mut self, rng: &mut dyn RandomSource) -> usize {
        let mut spawned = 0usize;
        for attempt in 0..self.spawn_attempts {
            // The draw is taken even when the cap is already reached.
            let hit = rng.chance() > self.spawn_threshold;
            if !hit || self.droplets.len() >= self.max_drops {
                continue;
            }

            let column = rng.pick(0, self.cols as u32 - 1) as u16;
            let height = rng.pick(self.min_height as u32, self.max_height as u32) as u16;
            let delay = attempt.saturating_mul(self.delay_stride);
            trace!(column = column, height = height, delay = delay, "spawn drop");

            self.droplets.push(Raindrop::new(column, height, delay));
            spawned += 1;
        }
        spawned
    }
}
