// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::runtime::ColorMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const RAIN_COLORS: [(&str, Rgb); 8] = [
    ("magenta", Rgb::new(255, 0, 255)),
    ("purple", Rgb::new(128, 0, 128)),
    ("indigo", Rgb::new(75, 0, 130)),
    ("dark-violet", Rgb::new(148, 0, 211)),
    ("orange-red", Rgb::new(255, 69, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("dark-turquoise", Rgb::new(0, 206, 209)),
    ("gold", Rgb::new(255, 215, 0)),
];

pub fn rain_palette() -> Vec<Rgb> {
    RAIN_COLORS.iter().map(|&(_, c)| c).collect()
}

/// Dims `base` by 20% per shade level, never below 20% brightness.
pub fn shade_color(base: Rgb, shade: u16) -> Rgb {
    let factor = (1.0 - shade as f64 * 0.2).max(0.2);
    let dim = |c: u8| (c as f64 * factor).floor() as u8;
    Rgb::new(dim(base.r), dim(base.g), dim(base.b))
}

fn dist2(a: Rgb, b: Rgb) -> i32 {
    let dr = (a.r as i32) - (b.r as i32);
    let dg = (a.g as i32) - (b.g as i32);
    let db = (a.b as i32) - (b.b as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(c: Rgb) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let level = |v: u8| ((v as u16 * 5) + 127) / 255;
    let (r6, g6, b6) = (level(c.r), level(c.g), level(c.b));
    let cube = Rgb::new(
        CUBE_LEVELS[r6 as usize],
        CUBE_LEVELS[g6 as usize],
        CUBE_LEVELS[b6 as usize],
    );
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);

    let avg = ((c.r as u16 + c.g as u16 + c.b as u16) / 3) as u8;
    let (gray_idx, gray) = if avg < 8 {
        (16, Rgb::new(0, 0, 0))
    } else if avg > 238 {
        (231, Rgb::new(255, 255, 255))
    } else {
        let step = (avg - 8) / 10;
        let v = 8 + 10 * step;
        (232 + step, Rgb::new(v, v, v))
    };

    if dist2(c, gray) < dist2(c, cube) {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(c: Rgb) -> Color {
    const TABLE: [(Color, Rgb); 16] = [
        (Color::Black, Rgb::new(0, 0, 0)),
        (Color::DarkGrey, Rgb::new(128, 128, 128)),
        (Color::Grey, Rgb::new(192, 192, 192)),
        (Color::White, Rgb::new(255, 255, 255)),
        (Color::DarkRed, Rgb::new(128, 0, 0)),
        (Color::Red, Rgb::new(255, 0, 0)),
        (Color::DarkGreen, Rgb::new(0, 128, 0)),
        (Color::Green, Rgb::new(0, 255, 0)),
        (Color::DarkBlue, Rgb::new(0, 0, 128)),
        (Color::Blue, Rgb::new(0, 0, 255)),
        (Color::DarkCyan, Rgb::new(0, 128, 128)),
        (Color::Cyan, Rgb::new(0, 255, 255)),
        (Color::DarkMagenta, Rgb::new(128, 0, 128)),
        (Color::Magenta, Rgb::new(255, 0, 255)),
        (Color::DarkYellow, Rgb::new(128, 128, 0)),
        (Color::Yellow, Rgb::new(255, 255, 0)),
    ];

    TABLE
        .iter()
        .min_by_key(|(_, rgb)| dist2(c, *rgb))
        .map(|(color, _)| *color)
        .unwrap_or(Color::White)
}

/// Maps an RGB value onto what the terminal can show.
pub fn term_color(c: Rgb, mode: ColorMode) -> Color {
    match mode {
        ColorMode::TrueColor => Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        },
        ColorMode::Color256 => Color::AnsiValue(rgb_to_ansi256(c)),
        ColorMode::Color16 => rgb_to_color16(c),
        ColorMode::Mono => {
            if c.r as u16 + c.g as u16 + c.b as u16 >= 3 * 96 {
                Color::White
            } else {
                Color::DarkGrey
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn shade_steps_down_by_a_fifth() {
        let base = Rgb::new(255, 0, 255);
        assert_eq!(shade_color(base, 0), base);
        assert_eq!(shade_color(base, 1), Rgb::new(204, 0, 204));
        assert_eq!(shade_color(base, 2), Rgb::new(153, 0, 153));
        assert_eq!(shade_color(base, 4), Rgb::new(51, 0, 51));
        assert_eq!(shade_color(base, 7), Rgb::new(51, 0, 51));
    }

    #[test]
    fn ansi256_maps_primaries_into_the_cube() {
        assert_eq!(rgb_to_ansi256(Rgb::new(255, 0, 255)), 201);
        assert_eq!(rgb_to_ansi256(Rgb::new(0, 255, 0)), 46);
        assert_eq!(rgb_to_ansi256(Rgb::new(0, 0, 0)), 16);
    }

    #[test]
    fn color16_picks_nearest() {
        assert_eq!(rgb_to_color16(Rgb::new(250, 10, 250)), Color::Magenta);
        assert_eq!(rgb_to_color16(Rgb::new(0, 206, 209)), Color::Cyan);
    }

    #[test]
    fn palette_has_eight_distinct_entries() {
        let p = rain_palette();
        assert_eq!(p.len(), 8);
        assert_eq!(p[0], Rgb::new(255, 0, 255));
        let distinct: std::collections::HashSet<_> = p.iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    proptest! {
        #[test]
        fn shade_is_monotone_and_floored(
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
            shade in 0u16..64,
        ) {
            let base = Rgb::new(r, g, b);
            let cur = shade_color(base, shade);
            let next = shade_color(base, shade + 1);
            prop_assert!(next.r <= cur.r && next.g <= cur.g && next.b <= cur.b);

            let floor = |c: u8| (c as f64 * 0.2).floor() as u8;
            prop_assert!(cur.r >= floor(r) && cur.g >= floor(g) && cur.b >= floor(b));
            prop_assert!(cur.r <= r && cur.g <= g && cur.b <= b);
        }
    }
}
