// Copyright (c) 2026 rezky_nightky

use std::time::Instant;

use tracing::info;

use crate::{
    cloud::Cloud,
    config::Config,
    cycler::ColorCycler,
    error::ConfigError,
    grid::Grid,
    palette::Rgb,
    rng::RandomSource,
    timer::Interval,
};

/// What changed during one [`Animation::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Advance {
    pub drops: bool,
    pub color: bool,
}

impl Advance {
    pub fn any(self) -> bool {
        self.drops || self.color
    }
}

/// The drop simulator and the color cycler, each on its own interval.
pub struct Animation<R> {
    cloud: Cloud,
    cycler: ColorCycler,
    drop_timer: Interval,
    color_timer: Interval,
    rng: R,
    drop_ticks: u64,
    color_ticks: u64,
}

impl<R: RandomSource> Animation<R> {
    pub fn new(
        config: &Config,
        palette: Vec<Rgb>,
        rng: R,
        start: Instant,
    ) -> Result<Self, ConfigError> {
        let cloud = Cloud::new(config)?;
        let cycler = ColorCycler::new(palette)?;
        Ok(Self {
            cloud,
            cycler,
            drop_timer: Interval::new(config.drop_period, start),
            color_timer: Interval::new(config.color_period, start),
            rng,
            drop_ticks: 0,
            color_ticks: 0,
        })
    }

    /// Runs whichever timers are due at `now`, color first.
    pub fn advance(&mut self, now: Instant) -> Advance {
        let mut out = Advance::default();
        if self.color_timer.poll(now) {
            self.cycler.tick(&mut self.rng);
            self.color_ticks += 1;
            out.color = true;
        }
        if self.drop_timer.poll(now) {
            self.cloud.tick(&mut self.rng);
            self.drop_ticks += 1;
            out.drops = true;
        }
        out
    }

    /// Earliest pending tick; `None` after [`Animation::stop`].
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.drop_timer.deadline(), self.color_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn grid(&self) -> &Grid {
        self.cloud.grid()
    }

    pub fn base_color(&self) -> Rgb {
        self.cycler.current()
    }

    pub fn live_drops(&self) -> usize {
        self.cloud.droplets().len()
    }

    pub fn is_running(&self) -> bool {
        !self.drop_timer.is_cancelled() || !self.color_timer.is_cancelled()
    }

    /// Cancels both timers.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.drop_timer.cancel();
        self.color_timer.cancel();
        info!(
            drop_ticks = self.drop_ticks,
            color_ticks = self.color_ticks,
            live_drops = self.live_drops(),
            "animation stopped"
        );
    }
}
