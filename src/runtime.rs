// Copyright (c) 2026 rezky_nightky

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

impl ColorMode {
    pub fn label(self) -> &'static str {
        match self {
            ColorMode::TrueColor => "24-bit truecolor",
            ColorMode::Color256 => "8-bit (256-color)",
            ColorMode::Color16 => "16-color",
            ColorMode::Mono => "mono",
        }
    }

    /// Picks a mode from `COLORTERM` / `TERM` values.
    pub fn detect(colorterm: &str, term: &str) -> Self {
        let colorterm = colorterm.to_ascii_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return ColorMode::TrueColor;
        }

        let term = term.to_ascii_lowercase();
        if term == "dumb" {
            return ColorMode::Mono;
        }
        if term.contains("256color") {
            return ColorMode::Color256;
        }
        if term.is_empty() {
            return ColorMode::Color256;
        }

        ColorMode::Color16
    }

    /// Accepts the `--colormode` bit depths.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0 => Some(ColorMode::Mono),
            16 => Some(ColorMode::Color16),
            8 | 256 => Some(ColorMode::Color256),
            24 | 32 => Some(ColorMode::TrueColor),
            _ => None,
        }
    }
}
