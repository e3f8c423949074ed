// Copyright (c) 2026 rezky_nightky

/// One square of the rain grid. `shade` counts cells back from a drop's
/// leading edge and is always 0 on inactive cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_active: bool,
    pub shade: u16,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        is_active: false,
        shade: 0,
    };

    pub fn lit(shade: u16) -> Self {
        Self {
            is_active: true,
            shade,
        }
    }
}
