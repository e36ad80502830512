//! Small numerical helpers used throughout the workspace.

use crate::constants::TWOPI;

/// Floating-point remainder with the sign of the dividend (C `fmod`).
///
/// `a.rem_euclid(b)` changes sign conventions; the trigonometric series
/// in the nutation and sidereal code expect the C behavior.
pub fn fmod(a: f64, b: f64) -> f64 {
    a % b
}

/// Wraps an angle in radians to `[0, 2pi)`.
pub fn wrap_0_2pi(angle: f64) -> f64 {
    let wrapped = angle % TWOPI;
    if wrapped < 0.0 {
        wrapped + TWOPI
    } else {
        wrapped
    }
}

/// Wraps an angle in radians to `(-pi, pi]`.
pub fn wrap_pm_pi(angle: f64) -> f64 {
    let wrapped = wrap_0_2pi(angle);
    if wrapped > crate::constants::PI {
        wrapped - TWOPI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PI;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fmod_sign() {
        assert_abs_diff_eq!(fmod(7.0, 3.0), 1.0);
        assert_abs_diff_eq!(fmod(-7.0, 3.0), -1.0);
    }

    #[test]
    fn test_wrap_0_2pi() {
        assert_abs_diff_eq!(wrap_0_2pi(0.0), 0.0);
        assert_abs_diff_eq!(wrap_0_2pi(-PI), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(wrap_0_2pi(3.0 * TWOPI + 0.5), 0.5, epsilon = 1e-12);
        assert!(wrap_0_2pi(-1e-9) < TWOPI);
    }

    #[test]
    fn test_wrap_pm_pi() {
        assert_abs_diff_eq!(wrap_pm_pi(PI + 0.5), -PI + 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pm_pi(-0.25), -0.25, epsilon = 1e-15);
    }
}
