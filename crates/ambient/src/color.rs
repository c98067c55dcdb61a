//! RGB color math for the mesh palette.

use serde::Serialize;

/// Linear RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Nine mesh colors, row-major over the 3×3 grid.
pub type Palette = [Rgb; 9];

/// Additive per-channel offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbShift {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbShift {
    pub const ZERO: RgbShift = RgbShift::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise interpolation; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Add `shift` and clamp every channel to [0, 1].
    pub fn shifted(self, shift: RgbShift) -> Rgb {
        Rgb::new(
            clamp01(self.r + shift.r),
            clamp01(self.g + shift.g),
            clamp01(self.b + shift.b),
        )
    }

    pub fn is_in_gamut(self) -> bool {
        [self.r, self.g, self.b].iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// `#rrggbb` form, handy for logs and the JSON dump.
    pub fn to_hex(self) -> String {
        let byte = |c: f64| (clamp01(c) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Apply one shift uniformly to every color of a palette.
pub fn shift_palette(palette: &Palette, shift: RgbShift) -> Palette {
    palette.map(|c| c.shifted(shift))
}

pub(crate) fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
