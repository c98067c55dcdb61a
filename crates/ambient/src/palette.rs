//! Time-of-day palette keyframes and blending.

use crate::color::{Palette, Rgb};
use crate::shift::{apply_season_tint, apply_temperature_shift};

/// A palette anchored at an hour of the day.
#[derive(Debug, Clone, Copy)]
pub struct Keyframe {
    pub hour: f64,
    pub colors: &'static Palette,
}

const fn rgb(r: f64, g: f64, b: f64) -> Rgb {
    Rgb::new(r, g, b)
}

// ── Base palettes ─────────────────────────────────────────────────────

pub const NIGHT: Palette = [
    rgb(0.04, 0.04, 0.12), rgb(0.06, 0.06, 0.16), rgb(0.05, 0.05, 0.14),
    rgb(0.05, 0.05, 0.14), rgb(0.07, 0.07, 0.18), rgb(0.06, 0.06, 0.15),
    rgb(0.04, 0.04, 0.12), rgb(0.06, 0.05, 0.15), rgb(0.05, 0.05, 0.13),
];

pub const DAWN: Palette = [
    rgb(0.45, 0.35, 0.55), rgb(0.70, 0.50, 0.55), rgb(0.90, 0.65, 0.50),
    rgb(0.55, 0.40, 0.58), rgb(0.85, 0.60, 0.55), rgb(0.95, 0.75, 0.55),
    rgb(0.65, 0.50, 0.60), rgb(0.90, 0.70, 0.58), rgb(0.98, 0.85, 0.65),
];

pub const MORNING: Palette = [
    rgb(0.55, 0.75, 0.92), rgb(0.65, 0.82, 0.95), rgb(0.78, 0.88, 0.96),
    rgb(0.60, 0.78, 0.90), rgb(0.75, 0.88, 0.95), rgb(0.88, 0.92, 0.95),
    rgb(0.70, 0.85, 0.92), rgb(0.85, 0.90, 0.94), rgb(0.95, 0.95, 0.88),
];

pub const MIDDAY: Palette = [
    rgb(0.52, 0.78, 0.98), rgb(0.65, 0.85, 0.98), rgb(0.75, 0.90, 0.99),
    rgb(0.60, 0.82, 0.97), rgb(0.80, 0.92, 0.99), rgb(0.90, 0.95, 0.98),
    rgb(0.72, 0.88, 0.98), rgb(0.88, 0.94, 0.98), rgb(0.96, 0.97, 0.95),
];

pub const AFTERNOON: Palette = [
    rgb(0.70, 0.82, 0.92), rgb(0.85, 0.82, 0.78), rgb(0.95, 0.85, 0.68),
    rgb(0.75, 0.80, 0.85), rgb(0.92, 0.85, 0.72), rgb(0.98, 0.88, 0.65),
    rgb(0.82, 0.82, 0.78), rgb(0.95, 0.88, 0.70), rgb(0.98, 0.82, 0.58),
];

pub const SUNSET: Palette = [
    rgb(0.45, 0.30, 0.55), rgb(0.75, 0.35, 0.45), rgb(0.95, 0.50, 0.30),
    rgb(0.55, 0.28, 0.50), rgb(0.88, 0.42, 0.35), rgb(0.98, 0.60, 0.25),
    rgb(0.65, 0.30, 0.45), rgb(0.92, 0.55, 0.30), rgb(0.98, 0.75, 0.35),
];

pub const TWILIGHT: Palette = [
    rgb(0.10, 0.08, 0.25), rgb(0.18, 0.12, 0.35), rgb(0.30, 0.15, 0.40),
    rgb(0.12, 0.10, 0.28), rgb(0.22, 0.15, 0.38), rgb(0.35, 0.18, 0.42),
    rgb(0.15, 0.12, 0.30), rgb(0.25, 0.18, 0.40), rgb(0.38, 0.22, 0.35),
];

/// Day cycle anchors. Night is doubled at both ends so the blend holds
/// steady through the small hours and wraps cleanly at midnight.
pub const KEYFRAMES: [Keyframe; 10] = [
    Keyframe { hour: 0.0, colors: &NIGHT },
    Keyframe { hour: 5.0, colors: &NIGHT },
    Keyframe { hour: 6.0, colors: &DAWN },
    Keyframe { hour: 7.5, colors: &MORNING },
    Keyframe { hour: 11.0, colors: &MIDDAY },
    Keyframe { hour: 14.0, colors: &AFTERNOON },
    Keyframe { hour: 17.0, colors: &SUNSET },
    Keyframe { hour: 20.0, colors: &TWILIGHT },
    Keyframe { hour: 22.0, colors: &NIGHT },
    Keyframe { hour: 24.0, colors: &NIGHT },
];

// ── Blending ──────────────────────────────────────────────────────────

/// Full pipeline: time-of-day blend, then temperature shift, then season
/// tint. Each stage clamps, so a saturated channel can swallow part of a
/// later stage's offset.
pub fn compute_ambient_palette(
    fractional_hour: f64,
    temperature_celsius: Option<f64>,
    month: u32,
) -> Palette {
    let base = time_of_day_palette(fractional_hour);
    let warmed = apply_temperature_shift(&base, temperature_celsius);
    apply_season_tint(&warmed, month)
}

/// Blend the two keyframes that bracket `fractional_hour`.
///
/// Hours outside [0, 24) wrap around the day; NaN and infinities are
/// treated as midnight.
pub fn time_of_day_palette(fractional_hour: f64) -> Palette {
    let hour = normalize_hour(fractional_hour);

    let (lower, upper) = KEYFRAMES
        .windows(2)
        .find(|pair| hour >= pair[0].hour && hour < pair[1].hour)
        .map(|pair| (pair[0], pair[1]))
        .unwrap_or((KEYFRAMES[0], KEYFRAMES[1]));

    let range = upper.hour - lower.hour;
    let t = if range > 0.0 {
        (hour - lower.hour) / range
    } else {
        0.0
    };
    let eased = smoothstep(t);

    let mut out = *lower.colors;
    for (color, target) in out.iter_mut().zip(upper.colors.iter()) {
        *color = color.lerp(*target, eased);
    }
    out
}

/// Hermite ease `t²(3 − 2t)` over a clamped `t`.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn normalize_hour(hour: f64) -> f64 {
    if !hour.is_finite() {
        return 0.0;
    }
    let wrapped = hour.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs.
    if wrapped >= 24.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{shift_palette, RgbShift};

    fn max_channel_gap(a: &Palette, b: &Palette) -> f64 {
        a.iter()
            .zip(b.iter())
            .flat_map(|(x, y)| [(x.r - y.r).abs(), (x.g - y.g).abs(), (x.b - y.b).abs()])
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_keyframe_hours_strictly_increase_and_wrap() {
        for pair in KEYFRAMES.windows(2) {
            assert!(pair[0].hour < pair[1].hour);
        }
        assert_eq!(KEYFRAMES[0].hour, 0.0);
        assert_eq!(KEYFRAMES[KEYFRAMES.len() - 1].hour, 24.0);
        assert_eq!(KEYFRAMES[0].colors, KEYFRAMES[KEYFRAMES.len() - 1].colors);
    }

    #[test]
    fn test_exact_keyframe_hour_returns_keyframe() {
        assert_eq!(time_of_day_palette(11.0), MIDDAY);
        assert_eq!(time_of_day_palette(6.0), DAWN);
        assert_eq!(time_of_day_palette(17.0), SUNSET);
        assert_eq!(time_of_day_palette(3.0), NIGHT);
    }

    #[test]
    fn test_midday_summer_without_temperature() {
        let summer = RgbShift::new(0.03, 0.02, -0.02);
        assert_eq!(
            compute_ambient_palette(11.0, None, 7),
            shift_palette(&MIDDAY, summer)
        );
    }

    #[test]
    fn test_continuous_across_keyframe_boundaries() {
        let eps = 1e-7;
        for frame in &KEYFRAMES[1..KEYFRAMES.len() - 1] {
            let before = compute_ambient_palette(frame.hour - eps, Some(10.0), 4);
            let after = compute_ambient_palette(frame.hour + eps, Some(10.0), 4);
            assert!(
                max_channel_gap(&before, &after) < 1e-5,
                "jump at hour {}",
                frame.hour
            );
        }
    }

    #[test]
    fn test_continuous_across_midnight() {
        let before = time_of_day_palette(24.0 - 1e-7);
        let after = time_of_day_palette(0.0);
        assert!(max_channel_gap(&before, &after) < 1e-5);
    }

    #[test]
    fn test_smoothstep_eases_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
        assert!(smoothstep(0.25) < 0.25);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }

    #[test]
    fn test_out_of_range_hours_wrap() {
        assert_eq!(time_of_day_palette(35.0), time_of_day_palette(11.0));
        assert_eq!(time_of_day_palette(-13.0), time_of_day_palette(11.0));
        assert_eq!(time_of_day_palette(24.0), NIGHT);
        assert_eq!(time_of_day_palette(f64::NAN), NIGHT);
    }

    #[test]
    fn test_all_outputs_in_gamut() {
        let temps = [None, Some(-40.0), Some(0.0), Some(12.0), Some(20.0), Some(30.0), Some(60.0)];
        for step in 0..96 {
            let hour = step as f64 * 0.25;
            for temp in temps {
                for month in 0..=13 {
                    let palette = compute_ambient_palette(hour, temp, month);
                    assert!(palette.iter().all(|c| c.is_in_gamut()));
                }
            }
        }
    }

    #[test]
    fn test_neutral_band_matches_no_reading() {
        for temp in [15.0, 20.0, 24.9] {
            for hour in [0.5, 6.5, 12.0, 18.25, 21.0] {
                assert_eq!(
                    compute_ambient_palette(hour, Some(temp), 10),
                    compute_ambient_palette(hour, None, 10)
                );
            }
        }
    }
}
