//! Easing curves
//!
//! Reparametrizations of normalized progress applied before interpolation.

use serde::{Deserialize, Serialize};

/// Easing curve for tween progress
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Identity (constant rate)
    #[default]
    Linear,
    /// Decelerate past the target, then settle back
    ///
    /// `overshoot` controls how far past the end value the curve swings;
    /// 0.2 gives the classic reel-stop snap.
    BackOut { overshoot: f64 },
    /// Elastic settle with decaying oscillation
    OutElastic,
    /// Sine-shaped ease in and out
    InOutSine,
}

impl Easing {
    /// Evaluate the curve at normalized progress `t` (clamped to 0.0 - 1.0)
    ///
    /// Output starts at 0 and ends at 1; `BackOut` and `OutElastic` may
    /// exceed 1 in between.
    #[inline]
    pub fn eval(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,

            // y = 1 + (s+1)(t-1)^3 + s(t-1)^2
            Easing::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }

            // y = 2^(-10t) * sin((10t - 0.75) * 2π/3) + 1, pinned at both ends
            Easing::OutElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let c4 = (2.0 * std::f64::consts::PI) / 3.0;
                    (2.0_f64).powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }

            // y = -(cos(πt) - 1) / 2
            Easing::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_curve_boundaries() {
        for easing in [
            Easing::Linear,
            Easing::BackOut { overshoot: 0.2 },
            Easing::OutElastic,
            Easing::InOutSine,
        ] {
            assert!(easing.eval(0.0).abs() < EPS, "{:?} at 0.0", easing);
            assert!((easing.eval(1.0) - 1.0).abs() < EPS, "{:?} at 1.0", easing);
        }
    }

    #[test]
    fn test_input_clamped() {
        for easing in [
            Easing::Linear,
            Easing::BackOut { overshoot: 0.2 },
            Easing::OutElastic,
            Easing::InOutSine,
        ] {
            assert_eq!(easing.eval(-1.0), easing.eval(0.0), "{:?}", easing);
            assert_eq!(easing.eval(2.0), easing.eval(1.0), "{:?}", easing);
        }
    }

    #[test]
    fn test_backout_overshoots() {
        let easing = Easing::BackOut { overshoot: 0.2 };

        // Peaks above 1 inside the settle-back window
        let peak = (0..=100)
            .map(|i| easing.eval(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);

        // Monotonic over the approach, back below the peak at the end
        assert!(easing.eval(0.5) < easing.eval(0.8));
        assert!((easing.eval(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_inout_sine_midpoint() {
        assert!((Easing::InOutSine.eval(0.5) - 0.5).abs() < EPS);
    }
}
