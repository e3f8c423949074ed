// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::palette::RAIN_COLORS;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  raingrid --rows 15 --cols 20 --drop-ms 100 --color-ms 6000 --spawn-threshold 0.6 --max-drops 10 --spawn-attempts 4 --height 4,8 --delay-stride 2";

/// Longest accepted timer period.
pub const MAX_PERIOD: Duration = Duration::from_secs(86_400);

/// Simulation settings, fixed for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rows: u16,
    pub cols: u16,
    pub drop_period: Duration,
    pub color_period: Duration,
    /// A spawn attempt succeeds when its `[0, 1)` draw is above this.
    pub spawn_threshold: f64,
    pub max_drops: usize,
    pub spawn_attempts: u32,
    pub min_height: u16,
    pub max_height: u16,
    pub delay_stride: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 20,
            drop_period: Duration::from_millis(100),
            color_period: Duration::from_millis(6000),
            spawn_threshold: 0.6,
            max_drops: 10,
            spawn_attempts: 4,
            min_height: 4,
            max_height: 8,
            delay_stride: 2,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.min_height == 0 || self.min_height > self.max_height {
            return Err(ConfigError::HeightRange {
                low: self.min_height,
                high: self.max_height,
            });
        }
        if !self.spawn_threshold.is_finite() || !(0.0..=1.0).contains(&self.spawn_threshold) {
            return Err(ConfigError::SpawnThreshold(self.spawn_threshold));
        }
        for (name, period) in [("drop", self.drop_period), ("color", self.color_period)] {
            if period.is_zero() || period > MAX_PERIOD {
                return Err(ConfigError::PeriodRange { name, period });
            }
        }
        Ok(())
    }
}

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn default_params_usage_for_help() -> String {
    if color_enabled_stdout() {
        DEFAULT_PARAMS_USAGE.replacen(
            "DEFAULT PARAMS USAGE:",
            "\x1b[1;36mDEFAULT PARAMS USAGE:\x1b[0m",
            1,
        )
    } else {
        DEFAULT_PARAMS_USAGE.to_string()
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "default-background")]
    DefaultBackground,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct U16Range {
    pub low: u16,
    pub high: u16,
}

impl FromStr for U16Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(',')
            .ok_or_else(|| "expected: NUM1,NUM2".to_string())?;
        let low: u16 = a
            .trim()
            .parse()
            .map_err(|_| "invalid low value".to_string())?;
        let high: u16 = b
            .trim()
            .parse()
            .map_err(|_| "invalid high value".to_string())?;
        if low == 0 || high == 0 || low > high {
            return Err("range must be >0 and low <= high".to_string());
        }
        Ok(Self { low, high })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "raingrid", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'r',
        long = "rows",
        default_value_t = 15,
        value_parser = clap::value_parser!(u16).range(1..=500),
        help_heading = "GRID",
        help = "Grid rows (min 1 max 500)"
    )]
    pub rows: u16,

    #[arg(
        short = 'c',
        long = "cols",
        default_value_t = 20,
        value_parser = clap::value_parser!(u16).range(1..=500),
        help_heading = "GRID",
        help = "Grid columns (min 1 max 500)"
    )]
    pub cols: u16,

    #[arg(
        long = "drop-ms",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..=60_000),
        help_heading = "TIMING",
        help = "Drop simulation period in ms (min 1 max 60000)"
    )]
    pub drop_ms: u64,

    #[arg(
        long = "color-ms",
        default_value_t = 6000,
        value_parser = clap::value_parser!(u64).range(1..=3_600_000),
        help_heading = "TIMING",
        help = "Base color change period in ms (min 1 max 3600000)"
    )]
    pub color_ms: u64,

    #[arg(
        long = "spawn-threshold",
        default_value_t = 0.6,
        help_heading = "RAIN",
        help = "A spawn attempt succeeds when a [0,1) draw exceeds this (min 0 max 1)"
    )]
    pub spawn_threshold: f64,

    #[arg(
        short = 'n',
        long = "max-drops",
        default_value_t = 10,
        help_heading = "RAIN",
        help = "Maximum concurrent drops"
    )]
    pub max_drops: usize,

    #[arg(
        long = "spawn-attempts",
        default_value_t = 4,
        help_heading = "RAIN",
        help = "Spawn attempts per drop tick"
    )]
    pub spawn_attempts: u32,

    #[arg(
        long = "height",
        default_value = "4,8",
        help_heading = "RAIN",
        help = "Drop height range in cells: LOW,HIGH (inclusive)"
    )]
    pub height: U16Range,

    #[arg(
        long = "delay-stride",
        default_value_t = 2,
        help_heading = "RAIN",
        help = "Start delay in ticks added per spawn attempt index"
    )]
    pub delay_stride: u32,

    #[arg(
        long = "seed",
        help_heading = "RAIN",
        help = "Seed the random source for a reproducible run"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, default-background)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        long = "no-title",
        help_heading = "APPEARANCE",
        help = "Hide the title line above the grid"
    )]
    pub no_title: bool,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Write log output to this file (filter with RUST_LOG)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "check-bitcolor",
        help_heading = "HELP",
        help = "Print detected terminal color capability and exit"
    )]
    pub check_bitcolor: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List the rain color palette and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

impl Args {
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let config = Config {
            rows: self.rows,
            cols: self.cols,
            drop_period: Duration::from_millis(self.drop_ms),
            color_period: Duration::from_millis(self.color_ms),
            spawn_threshold: self.spawn_threshold,
            max_drops: self.max_drops,
            spawn_attempts: self.spawn_attempts,
            min_height: self.height.low,
            max_height: self.height.high,
            delay_stride: self.delay_stride,
        };
        config.validate()?;
        Ok(config)
    }

    /// `None` when no positive duration was asked for.
    pub fn run_duration(&self) -> Result<Option<Duration>, String> {
        let Some(s) = self.duration else {
            return Ok(None);
        };
        if !s.is_finite() {
            return Err(format!(
                "failed to apply --duration {} (must be a finite number)",
                s
            ));
        }
        if s <= 0.0 {
            return Ok(None);
        }
        if !(0.1..=86400.0).contains(&s) {
            return Err(format!(
                "failed to apply --duration {} (min 0.1 max 86400)",
                s
            ));
        }
        Ok(Some(Duration::from_secs_f64(s)))
    }
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mRAIN COLORS:\x1b[0m");
        println!("\x1b[2mNOTE: The base color is picked from these at random.\x1b[0m");
    } else {
        println!("RAIN COLORS:");
        println!("NOTE: The base color is picked from these at random.");
    }
    println!();
    println!("NAME            RGB");
    for (name, c) in RAIN_COLORS {
        if color_enabled_stdout() {
            println!(
                "{:<15} {:>3},{:>3},{:>3}  \x1b[48;2;{};{};{}m    \x1b[0m",
                name, c.r, c.g, c.b, c.r, c.g, c.b
            );
        } else {
            println!("{:<15} {:>3},{:>3},{:>3}", name, c.r, c.g, c.b);
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_match_the_classic_animation() {
        let args = Args::parse_from(["raingrid"]);
        let config = args.to_config().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(args.run_duration(), Ok(None));
    }

    #[test]
    fn height_range_parses_and_rejects_inverted() {
        assert_eq!("3, 6".parse::<U16Range>(), Ok(U16Range { low: 3, high: 6 }));
        assert!("6,3".parse::<U16Range>().is_err());
        assert!("0,3".parse::<U16Range>().is_err());
        assert!("4".parse::<U16Range>().is_err());
    }

    #[test]
    fn zero_rows_are_refused_by_the_parser() {
        assert!(Args::try_parse_from(["raingrid", "--rows", "0"]).is_err());
        assert!(Args::try_parse_from(["raingrid", "--drop-ms", "0"]).is_err());
    }

    #[test]
    fn validate_rejects_misuse() {
        let bad = Config {
            cols: 0,
            ..Config::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::EmptyGrid { rows: 15, cols: 0 })
        );

        let bad = Config {
            min_height: 9,
            ..Config::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::HeightRange { low: 9, high: 8 })
        );

        let bad = Config {
            spawn_threshold: 1.5,
            ..Config::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::SpawnThreshold(1.5)));

        let bad = Config {
            color_period: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::PeriodRange {
                name: "color",
                period: Duration::ZERO,
            })
        );
    }

    #[test]
    fn oversized_periods_are_rejected() {
        let huge = Duration::from_secs(u64::MAX);
        let bad = Config {
            drop_period: huge,
            ..Config::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::PeriodRange {
                name: "drop",
                period: huge,
            })
        );

        let ok = Config {
            color_period: MAX_PERIOD,
            ..Config::default()
        };
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn spawn_threshold_from_cli_is_validated() {
        let args = Args::parse_from(["raingrid", "--spawn-threshold", "2"]);
        assert_eq!(args.to_config(), Err(ConfigError::SpawnThreshold(2.0)));
    }

    #[test]
    fn duration_bounds() {
        let args = Args::parse_from(["raingrid", "--duration", "2.5"]);
        assert_eq!(args.run_duration(), Ok(Some(Duration::from_millis(2500))));

        let args = Args::parse_from(["raingrid", "--duration", "0"]);
        assert_eq!(args.run_duration(), Ok(None));

        let args = Args::parse_from(["raingrid", "--duration", "0.01"]);
        assert!(args.run_duration().is_err());
    }
}
