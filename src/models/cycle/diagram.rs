//! Process curves for p–v and T–s diagrams.
//!
//! Curves are fitted through the endpoint data rather than derived from the
//! process kind, so they also work for tabulated media. For an ideal gas
//! they reproduce the textbook shapes: `p·v^k = const` with `k` = 0, 1, γ
//! or `n`, and `s − s_A = c·ln(T/T_A)` with `c` = `cp` or `cv`.

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    numeric::Tolerance,
    thermo::{Point, Property},
};

use super::ProcessKind;

/// One process of a cycle with its endpoint states, ready for plotting.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub index: usize,
    pub kind: ProcessKind,
    pub start: &'a Point,
    pub end: &'a Point,
    /// Decides when two endpoint values are equal, making the curve a
    /// straight vertical or horizontal line.
    pub tolerance: Tolerance,
}

impl Segment<'_> {
    /// Samples the process on p–v axes as `(v, p)` pairs in SI.
    ///
    /// Returns `None` if fewer than two samples are requested, or if either
    /// endpoint lacks a positive `p` or `v`.
    #[must_use]
    pub fn pv_path(&self, samples: usize) -> Option<Vec<(f64, f64)>> {
        if samples < 2 {
            return None;
        }
        let (v_a, p_a) = positive_pair(self.start, Property::SpecificVolume, Property::Pressure)?;
        let (v_b, p_b) = positive_pair(self.end, Property::SpecificVolume, Property::Pressure)?;

        if self.tolerance.agrees(v_a, v_b) {
            return Some(lerp_samples(samples, p_a, p_b).map(|p| (v_a, p)).collect());
        }

        let k = (p_b / p_a).ln() / (v_a / v_b).ln();
        Some(
            lerp_samples(samples, v_a, v_b)
                .map(|v| (v, p_a * (v_a / v).powf(k)))
                .collect(),
        )
    }

    /// Samples the process on T–s axes as `(s, T)` pairs in SI.
    ///
    /// Returns `None` if fewer than two samples are requested, or if either
    /// endpoint lacks `s` or a positive `T`.
    #[must_use]
    pub fn ts_path(&self, samples: usize) -> Option<Vec<(f64, f64)>> {
        if samples < 2 {
            return None;
        }
        let t_a = StrictlyPositive::admit(self.start.get(Property::Temperature)?)?;
        let t_b = StrictlyPositive::admit(self.end.get(Property::Temperature)?)?;
        let s_a = self.start.get(Property::Entropy)?;
        let s_b = self.end.get(Property::Entropy)?;

        if self.tolerance.agrees(t_a, t_b) {
            return Some(lerp_samples(samples, s_a, s_b).map(|s| (s, t_a)).collect());
        }
        if self.tolerance.agrees(s_a, s_b) {
            return Some(lerp_samples(samples, t_a, t_b).map(|t| (s_a, t)).collect());
        }

        let c = (s_b - s_a) / (t_b / t_a).ln();
        Some(
            lerp_samples(samples, t_a, t_b)
                .map(|t| (s_a + c * (t / t_a).ln(), t))
                .collect(),
        )
    }
}

fn positive_pair(point: &Point, x: Property, y: Property) -> Option<(f64, f64)> {
    Some((
        StrictlyPositive::admit(point.get(x)?)?,
        StrictlyPositive::admit(point.get(y)?)?,
    ))
}

/// `samples` evenly spaced values from `from` to `to`, both included.
fn lerp_samples(samples: usize, from: f64, to: f64) -> impl Iterator<Item = f64> {
    let last = (samples - 1) as f64;
    (0..samples).map(move |i| from + (to - from) * (i as f64 / last))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn point(name: &str, values: &[(Property, f64)]) -> Point {
        values
            .iter()
            .fold(Point::new(name), |point, &(p, v)| point.with(p, v))
    }

    #[test]
    fn isentropic_pv_curve_follows_gamma() {
        let start = point("A", &[(Property::SpecificVolume, 0.861), (Property::Pressure, 1.0e5)]);
        let v_b: f64 = 0.0703;
        let p_b = 1.0e5 * (0.861 / v_b).powf(1.4);
        let end = point("B", &[(Property::SpecificVolume, v_b), (Property::Pressure, p_b)]);
        let segment = Segment { index: 0, kind: ProcessKind::Isentropic, start: &start, end: &end, tolerance: Tolerance::default() };

        let path = segment.pv_path(11).unwrap();

        assert_eq!(path.len(), 11);
        assert_relative_eq!(path[0].0, 0.861);
        assert_relative_eq!(path[10].1, p_b, max_relative = 1e-9);
        for &(v, p) in &path {
            assert_relative_eq!(p * v.powf(1.4), 1.0e5 * 0.861_f64.powf(1.4), max_relative = 1e-9);
        }
    }

    #[test]
    fn isochoric_pv_curve_is_vertical() {
        let start = point("A", &[(Property::SpecificVolume, 0.1), (Property::Pressure, 1.0e6)]);
        let end = point("B", &[(Property::SpecificVolume, 0.1), (Property::Pressure, 3.0e6)]);
        let segment = Segment { index: 1, kind: ProcessKind::Isochoric, start: &start, end: &end, tolerance: Tolerance::default() };

        let path = segment.pv_path(3).unwrap();
        assert_eq!(path, vec![(0.1, 1.0e6), (0.1, 2.0e6), (0.1, 3.0e6)]);
    }

    #[test]
    fn isobaric_ts_curve_uses_cp() {
        let cp = 1004.5;
        let start = point("A", &[(Property::Temperature, 400.0), (Property::Entropy, 100.0)]);
        let end = point(
            "B",
            &[(Property::Temperature, 800.0), (Property::Entropy, 100.0 + cp * 2.0_f64.ln())],
        );
        let segment = Segment { index: 0, kind: ProcessKind::Isobaric, start: &start, end: &end, tolerance: Tolerance::default() };

        let path = segment.ts_path(5).unwrap();
        let (s_mid, t_mid) = path[2];
        assert_relative_eq!(t_mid, 600.0, max_relative = 1e-12);
        assert_relative_eq!(s_mid, 100.0 + cp * 1.5_f64.ln(), max_relative = 1e-12);
    }

    #[test]
    fn isentropic_ts_curve_is_vertical() {
        let start = point("A", &[(Property::Temperature, 300.0), (Property::Entropy, 98.0)]);
        let end = point("B", &[(Property::Temperature, 817.0), (Property::Entropy, 98.0)]);
        let segment = Segment { index: 0, kind: ProcessKind::Isentropic, start: &start, end: &end, tolerance: Tolerance::default() };

        let path = segment.ts_path(4).unwrap();
        assert!(path.iter().all(|&(s, _)| s == 98.0));
    }

    #[test]
    fn straight_line_detection_follows_the_tolerance() {
        let start = point("A", &[(Property::SpecificVolume, 0.1), (Property::Pressure, 1.0e6)]);
        let end = point("B", &[(Property::SpecificVolume, 0.1001), (Property::Pressure, 3.0e6)]);

        let strict = Segment {
            index: 0,
            kind: ProcessKind::Isochoric,
            start: &start,
            end: &end,
            tolerance: Tolerance::default(),
        };
        let path = strict.pv_path(3).unwrap();
        assert_relative_eq!(path[2].0, 0.1001, max_relative = 1e-12);

        let loose = Segment {
            tolerance: Tolerance { abs: 1e-9, rel: 1e-2 },
            ..strict
        };
        let path = loose.pv_path(3).unwrap();
        assert!(path.iter().all(|&(v, _)| v == 0.1));
        assert_eq!(path[1].1, 2.0e6);
    }

    #[test]
    fn missing_data_gives_no_path() {
        let start = point("A", &[(Property::Temperature, 300.0)]);
        let end = point("B", &[(Property::Temperature, 600.0), (Property::Entropy, 1.0)]);
        let segment = Segment { index: 0, kind: ProcessKind::Isobaric, start: &start, end: &end, tolerance: Tolerance::default() };

        assert!(segment.ts_path(10).is_none());
        assert!(segment.pv_path(10).is_none());
        assert!(segment.ts_path(1).is_none());
    }
}
