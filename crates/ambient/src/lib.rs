//! Ambient background engine.
//!
//! Computes the 3×3 mesh-gradient palette from time of day, temperature and
//! season, and the drifting mesh control points. Everything here is a pure
//! function of its inputs.

pub mod color;
pub mod mesh;
pub mod palette;
pub mod shift;

pub use color::{Palette, Rgb, RgbShift};
pub use mesh::{compute_mesh_points, max_drift, nominal_point, MeshPoint};
pub use palette::{compute_ambient_palette, time_of_day_palette};
pub use shift::{apply_season_tint, apply_temperature_shift, season_tint, temperature_shift, Season};

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::Serialize;

/// Palette and mesh layout for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientFrame {
    pub palette: Palette,
    pub points: [MeshPoint; 9],
}

impl AmbientFrame {
    /// Frame for a wall-clock instant in the viewer's timezone.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, temperature_celsius: Option<f64>) -> Self {
        let fractional_hour = now.hour() as f64 + now.minute() as f64 / 60.0;
        let time_secs = now.timestamp() as f64 + now.timestamp_subsec_millis() as f64 / 1000.0;

        Self {
            palette: compute_ambient_palette(fractional_hour, temperature_celsius, now.month()),
            points: compute_mesh_points(time_secs),
        }
    }
}
