//! Drifting control points for the 3×3 mesh gradient.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy)]
enum Wave {
    Sin,
    Cos,
}

/// One oscillation: `amplitude · wave(t / time_scale_secs)`.
#[derive(Debug, Clone, Copy)]
struct DriftTerm {
    wave: Wave,
    time_scale_secs: f64,
    amplitude: f64,
}

impl DriftTerm {
    fn at(&self, time_secs: f64) -> f64 {
        let phase = time_secs / self.time_scale_secs;
        let unit = match self.wave {
            Wave::Sin => phase.sin(),
            Wave::Cos => phase.cos(),
        };
        unit * self.amplitude
    }
}

struct ControlPoint {
    nominal: (f64, f64),
    dx: &'static [DriftTerm],
    dy: &'static [DriftTerm],
}

const fn sin(time_scale_secs: f64, amplitude: f64) -> DriftTerm {
    DriftTerm { wave: Wave::Sin, time_scale_secs, amplitude }
}

const fn cos(time_scale_secs: f64, amplitude: f64) -> DriftTerm {
    DriftTerm { wave: Wave::Cos, time_scale_secs, amplitude }
}

const FIXED: &[DriftTerm] = &[];

// Time scales are pairwise non-harmonic so the combined motion does not
// visibly repeat. Corners stay pinned to keep the gradient edge-to-edge.
const CONTROL_POINTS: [ControlPoint; 9] = [
    ControlPoint { nominal: (0.0, 0.0), dx: FIXED, dy: FIXED },
    ControlPoint { nominal: (0.5, 0.0), dx: &[sin(25.0, 0.06)], dy: &[sin(30.0, 0.04)] },
    ControlPoint { nominal: (1.0, 0.0), dx: FIXED, dy: FIXED },
    ControlPoint { nominal: (0.0, 0.5), dx: &[cos(28.0, 0.05)], dy: &[cos(22.0, 0.06)] },
    ControlPoint { nominal: (0.5, 0.5), dx: &[sin(20.0, 0.04)], dy: &[cos(24.0, 0.04)] },
    ControlPoint { nominal: (1.0, 0.5), dx: &[sin(26.0, 0.04)], dy: &[sin(18.0, 0.05)] },
    ControlPoint { nominal: (0.0, 1.0), dx: FIXED, dy: FIXED },
    ControlPoint { nominal: (0.5, 1.0), dx: &[cos(23.0, 0.05)], dy: FIXED },
    ControlPoint { nominal: (1.0, 1.0), dx: FIXED, dy: FIXED },
];

/// Mesh points at `time_secs` of wall-clock time, row-major.
pub fn compute_mesh_points(time_secs: f64) -> [MeshPoint; 9] {
    let time_secs = if time_secs.is_finite() { time_secs } else { 0.0 };
    CONTROL_POINTS.map(|p| MeshPoint {
        x: p.nominal.0 + sum_terms(p.dx, time_secs),
        y: p.nominal.1 + sum_terms(p.dy, time_secs),
    })
}

/// Nominal grid position of point `index` (0..9).
pub fn nominal_point(index: usize) -> Option<MeshPoint> {
    CONTROL_POINTS.get(index).map(|p| MeshPoint {
        x: p.nominal.0,
        y: p.nominal.1,
    })
}

/// Largest displacement point `index` can reach on each axis.
pub fn max_drift(index: usize) -> Option<(f64, f64)> {
    CONTROL_POINTS
        .get(index)
        .map(|p| (amplitude_budget(p.dx), amplitude_budget(p.dy)))
}

fn sum_terms(terms: &[DriftTerm], time_secs: f64) -> f64 {
    terms.iter().map(|term| term.at(time_secs)).sum()
}

fn amplitude_budget(terms: &[DriftTerm]) -> f64 {
    terms.iter().map(|term| term.amplitude.abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_stay_within_drift_budget() {
        for step in 0..5000 {
            let t = step as f64 * 0.73 + 1.0e9;
            let points = compute_mesh_points(t);
            for (i, point) in points.iter().enumerate() {
                let nominal = nominal_point(i).unwrap();
                let (dx, dy) = max_drift(i).unwrap();
                assert!((point.x - nominal.x).abs() <= dx + 1e-12);
                assert!((point.y - nominal.y).abs() <= dy + 1e-12);
                assert!(dx <= 0.15 && dy <= 0.15);
            }
        }
    }

    #[test]
    fn test_corners_are_pinned() {
        for t in [0.0, 12.5, 1234.0, 1.7e9] {
            let points = compute_mesh_points(t);
            for i in [0, 2, 6, 8] {
                assert_eq!(points[i], nominal_point(i).unwrap());
            }
        }
    }

    #[test]
    fn test_center_and_edges_move() {
        let a = compute_mesh_points(0.0);
        let b = compute_mesh_points(15.0);
        for i in [1, 3, 4, 5, 7] {
            assert_ne!(a[i], b[i], "point {} did not drift", i);
        }
    }

    #[test]
    fn test_time_zero_matches_closed_form() {
        let points = compute_mesh_points(0.0);
        assert_eq!(points[1], MeshPoint { x: 0.5, y: 0.0 });
        assert!((points[3].x - 0.05).abs() < 1e-12);
        assert!((points[3].y - 0.56).abs() < 1e-12);
        assert!((points[4].y - 0.54).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_time_is_stable() {
        assert_eq!(compute_mesh_points(f64::NAN), compute_mesh_points(0.0));
        assert!(nominal_point(9).is_none());
        assert!(max_drift(9).is_none());
    }
}
