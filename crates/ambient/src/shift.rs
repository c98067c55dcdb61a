//! Temperature and season adjustments applied on top of the day palette.

use crate::color::{shift_palette, Palette, RgbShift};

// ── Temperature ───────────────────────────────────────────────────────

/// Additive shift for a Celsius reading.
///
/// Five bands: freezing and cold lean blue, 15–25°C is neutral, warm and
/// hot lean red with green pulled down at the hot end. Intensity grows
/// linearly toward each band's extreme and saturates at the outer bands.
pub fn temperature_shift(celsius: f64) -> RgbShift {
    if celsius < 5.0 {
        let intensity = ((5.0 - celsius) / 15.0).min(1.0);
        RgbShift::new(-0.08, 0.02, 0.12).scaled(intensity)
    } else if celsius < 15.0 {
        let intensity = (15.0 - celsius) / 10.0;
        RgbShift::new(-0.03, 0.01, 0.05).scaled(intensity)
    } else if celsius < 25.0 {
        RgbShift::ZERO
    } else if celsius < 35.0 {
        let intensity = (celsius - 25.0) / 10.0;
        RgbShift::new(0.08, 0.02, -0.05).scaled(intensity)
    } else {
        let intensity = ((celsius - 35.0) / 10.0).min(1.0);
        RgbShift::new(0.12, -0.02, -0.08).scaled(intensity)
    }
}

/// Apply the temperature shift to every color. No reading, no change.
pub fn apply_temperature_shift(palette: &Palette, temperature_celsius: Option<f64>) -> Palette {
    match temperature_celsius {
        Some(celsius) if !celsius.is_nan() => shift_palette(palette, temperature_shift(celsius)),
        _ => *palette,
    }
}

// ── Season ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Northern-hemisphere season for a 1-based month.
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }

    pub fn tint(self) -> RgbShift {
        match self {
            Season::Winter => RgbShift::new(-0.03, -0.01, 0.04),
            Season::Spring => RgbShift::new(-0.02, 0.04, -0.01),
            Season::Summer => RgbShift::new(0.03, 0.02, -0.02),
            Season::Autumn => RgbShift::new(0.04, 0.02, -0.03),
        }
    }
}

/// Tint for a month; out-of-range months get none.
pub fn season_tint(month: u32) -> RgbShift {
    Season::from_month(month)
        .map(Season::tint)
        .unwrap_or(RgbShift::ZERO)
}

pub fn apply_season_tint(palette: &Palette, month: u32) -> Palette {
    shift_palette(palette, season_tint(month))
}
