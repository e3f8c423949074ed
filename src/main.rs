// Copyright (c) 2026 rezky_nightky

mod animation;
mod cell;
mod cloud;
mod config;
mod cycler;
mod droplet;
mod error;
mod frame;
mod grid;
mod palette;
mod render;
mod rng;
mod runtime;
mod terminal;
mod timer;

use std::env;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use anyhow::{bail, Context, Result};
use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::animation::Animation;
use crate::config::{
    color_enabled_stdout, default_params_usage_for_help, print_list_colors, Args, ColorBg,
};
use crate::frame::Frame;
use crate::palette::rain_palette;
use crate::render::Painter;
use crate::rng::SimRng;
use crate::runtime::ColorMode;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn build_info() -> &'static str {
    env!("RAINGRID_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM").unwrap_or_default();
    let term = env::var("TERM").unwrap_or_default();
    ColorMode::detect(&colorterm, &term)
}

fn detect_color_mode(args: &Args) -> Result<ColorMode> {
    match args.colormode {
        Some(bits) => match ColorMode::from_bits(bits) {
            Some(m) => Ok(m),
            None => bail!("invalid --colormode: {} (allowed: 0,16,8/256,24/32)", bits),
        },
        None => Ok(detect_color_mode_auto()),
    }
}

fn print_bitcolor_check(args: &Args) -> Result<()> {
    let colorterm = env::var("COLORTERM").unwrap_or_default();
    let term = env::var("TERM").unwrap_or_default();
    let auto = detect_color_mode_auto();
    let effective = detect_color_mode(args)?;

    let or_unset = |v: &str| {
        if v.is_empty() {
            "(unset)".to_string()
        } else {
            v.to_string()
        }
    };

    println!("BITCOLOR CHECK:");
    println!("  COLORTERM: {}", or_unset(&colorterm));
    println!("  TERM: {}", or_unset(&term));
    println!("  auto_detected: {}", auto.label());
    if args.colormode.is_some() {
        println!("  forced: {}", effective.label());
    }
    println!("  effective: {}", effective.label());
    Ok(())
}

/// Logs go to a file only; the terminal is busy with the animation.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn is_quit_key(k: &KeyEvent) -> bool {
    match (k.code, k.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => true,
        (KeyCode::Char('c'), m) => m.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.check_bitcolor {
        return print_bitcolor_check(&args);
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    let config = args.to_config()?;
    let duration = args.run_duration().map_err(anyhow::Error::msg)?;
    let color_mode = detect_color_mode(&args)?;
    let bg = match args.color_bg {
        ColorBg::Black => Some(Color::Black),
        ColorBg::DefaultBackground => None,
    };
    let painter = Painter {
        color_mode,
        bg,
        title: !args.no_title,
    };

    let rng = match args.seed {
        Some(seed) => SimRng::from_seed_u64(seed),
        None => SimRng::from_os(),
    };

    info!(
        rows = config.rows,
        cols = config.cols,
        drop_ms = config.drop_period.as_millis() as u64,
        color_ms = config.color_period.as_millis() as u64,
        spawn_threshold = config.spawn_threshold,
        max_drops = config.max_drops,
        seed = ?args.seed,
        color_mode = color_mode.label(),
        "starting rain"
    );

    let start = Instant::now();
    let mut anim = Animation::new(&config, rain_palette(), rng, start)?;
    let end_time = duration.map(|d| start + d);

    let mut term = Terminal::new().context("failed to set up terminal")?;
    let (w, h) = term.size().context("failed to read terminal size")?;
    if w < config.cols.saturating_mul(2) || h < config.rows {
        warn!(width = w, height = h, "terminal is smaller than the grid; output is clipped");
    }
    let mut frame = Frame::new(w, h, bg);
    painter.paint(&mut frame, anim.grid(), anim.base_color());
    term.draw(&mut frame)?;

    while anim.is_running() {
        let now = Instant::now();
        if end_time.is_some_and(|end| now >= end) {
            anim.stop();
            break;
        }

        let mut timeout = anim
            .next_deadline()
            .map(|d| d.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO);
        if let Some(end) = end_time {
            timeout = timeout.min(end.saturating_duration_since(now));
        }

        let mut pending_resize: Option<(u16, u16)> = None;
        if Terminal::poll_event(timeout)? {
            loop {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => pending_resize = Some((nw, nh)),
                    Event::Key(k) if k.kind == KeyEventKind::Press && is_quit_key(&k) => {
                        anim.stop();
                    }
                    _ => {}
                }
                if !Terminal::poll_event(Duration::ZERO)? {
                    break;
                }
            }
        }

        if !anim.is_running() {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            frame = Frame::new(nw, nh, bg);
        }

        let advanced = anim.advance(Instant::now());
        if advanced.any() || pending_resize.is_some() {
            painter.paint(&mut frame, anim.grid(), anim.base_color());
            term.draw(&mut frame)?;
        }
    }

    Ok(())
}
