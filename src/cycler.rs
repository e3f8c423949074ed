// Copyright (c) 2026 rezky_nightky

use tracing::debug;

use crate::{error::ConfigError, palette::Rgb, rng::RandomSource};

/// Holds the shared base color and swaps it for a random palette entry on
/// every tick.
pub struct ColorCycler {
    palette: Vec<Rgb>,
    current: Rgb,
}

impl ColorCycler {
    /// Starts on the first palette entry.
    pub fn new(palette: Vec<Rgb>) -> Result<Self, ConfigError> {
        let current = *palette.first().ok_or(ConfigError::EmptyPalette)?;
        Ok(Self { palette, current })
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    #[allow(dead_code)]
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> Rgb {
        let idx = rng.pick(0, self.palette.len() as u32 - 1) as usize;
        let next = self.palette[idx];
        if next != self.current {
            debug!(r = next.r, g = next.g, b = next.b, "base color changed");
        }
        self.current = next;
        next
    }
}
