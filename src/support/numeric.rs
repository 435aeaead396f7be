//! Floating-point comparison helpers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute and relative tolerance used when two values of the same property
/// are compared.
///
/// Two values agree when their difference is within `abs`, or within `rel`
/// times the larger magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerance {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-6,
        }
    }
}

impl Tolerance {
    /// Returns `true` if `a` and `b` agree within this tolerance.
    #[must_use]
    pub fn agrees(&self, a: f64, b: f64) -> bool {
        let diff = (a - b).abs();
        if diff <= self.abs {
            return true;
        }
        diff <= self.rel * a.abs().max(b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrees_within_relative_band() {
        let tol = Tolerance::default();
        assert!(tol.agrees(100_000.0, 100_000.05));
        assert!(!tol.agrees(100_000.0, 100_001.0));
    }

    #[test]
    fn agrees_near_zero_uses_absolute_band() {
        let tol = Tolerance::default();
        assert!(tol.agrees(0.0, 1e-12));
        assert!(!tol.agrees(0.0, 1e-6));
    }

    #[test]
    fn nan_never_agrees() {
        let tol = Tolerance::default();
        assert!(!tol.agrees(f64::NAN, 1.0));
        assert!(!tol.agrees(f64::NAN, f64::NAN));
    }
}
