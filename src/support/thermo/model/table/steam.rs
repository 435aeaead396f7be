use uom::si::{
    available_energy::{joule_per_kilogram, kilojoule_per_kilogram},
    f64::{AvailableEnergy, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    pressure::{bar, kilopascal, pascal},
    specific_heat_capacity::{joule_per_kilogram_kelvin, kilojoule_per_kilogram_kelvin},
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use tracing::trace;

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    numeric::Tolerance,
    thermo::{LookupError, Property},
};

use super::{PropertyTable, TableEntry};

/// Superheated steam, in the customary table units:
/// `(p [bar], T [°C], v [m³/kg], u [kJ/kg], h [kJ/kg], s [kJ/kg·K])`.
const SUPERHEATED: &[(f64, f64, f64, f64, f64, f64)] = &[
    (10.0, 179.88, 0.194_37, 2582.8, 2777.1, 6.5850),
    (10.0, 200.0, 0.206_02, 2622.3, 2828.3, 6.6956),
    (10.0, 250.0, 0.232_75, 2710.4, 2943.1, 6.9265),
    (10.0, 300.0, 0.257_99, 2793.7, 3051.6, 7.1246),
    (10.0, 350.0, 0.282_50, 2875.7, 3158.2, 7.3029),
    (10.0, 400.0, 0.306_61, 2957.9, 3264.5, 7.4670),
    (10.0, 500.0, 0.354_11, 3125.0, 3479.1, 7.7642),
    (10.0, 600.0, 0.401_11, 3297.5, 3697.0, 8.0311),
    (80.0, 295.06, 0.023_52, 2569.8, 2758.0, 5.7432),
    (80.0, 320.0, 0.026_82, 2662.7, 2877.2, 5.9489),
    (80.0, 360.0, 0.030_89, 2772.7, 3019.8, 6.1819),
    (80.0, 400.0, 0.034_32, 2863.8, 3138.3, 6.3634),
    (80.0, 440.0, 0.037_42, 2946.7, 3246.1, 6.5190),
    (80.0, 480.0, 0.040_34, 3025.7, 3348.4, 6.6586),
    (80.0, 520.0, 0.043_13, 3102.7, 3447.7, 6.7871),
    (80.0, 560.0, 0.045_82, 3178.7, 3545.3, 6.9072),
    (80.0, 600.0, 0.048_45, 3254.4, 3642.0, 7.0206),
    (80.0, 640.0, 0.051_02, 3330.1, 3738.3, 7.1283),
    (80.0, 700.0, 0.054_81, 3443.9, 3882.4, 7.2812),
    (80.0, 740.0, 0.057_29, 3520.4, 3978.7, 7.3782),
];

/// Saturated water and steam by pressure:
/// `(p [kPa], T [°C], v_f, v_g [m³/kg], u_f, u_g, h_f, h_g [kJ/kg], s_f, s_g [kJ/kg·K])`.
#[rustfmt::skip]
const SATURATED: &[(f64, f64, f64, f64, f64, f64, f64, f64, f64, f64)] = &[
    (100.0,   99.61,  0.001_043, 1.6941,    417.40, 2505.6, 417.51, 2675.0, 1.3028, 7.3589),
    (200.0,   120.21, 0.001_061, 0.885_78,  504.50, 2529.1, 504.70, 2706.3, 1.5302, 7.1270),
    (500.0,   151.83, 0.001_093, 0.374_83,  639.54, 2560.7, 640.09, 2748.1, 1.8604, 6.8207),
    (800.0,   170.41, 0.001_115, 0.240_35,  719.97, 2576.0, 720.87, 2768.3, 2.0457, 6.6616),
    (1000.0,  179.88, 0.001_127, 0.194_36,  761.39, 2582.8, 762.51, 2777.1, 2.1381, 6.5850),
    (2000.0,  212.38, 0.001_177, 0.099_59,  906.12, 2599.1, 908.47, 2798.3, 2.4467, 6.3390),
    (5000.0,  263.94, 0.001_286, 0.039_45,  1148.1, 2597.0, 1154.5, 2794.2, 2.9207, 5.9737),
    (8000.0,  295.01, 0.001_385, 0.023_528, 1316.1, 2569.5, 1317.1, 2758.7, 3.2081, 5.7450),
    (10000.0, 311.00, 0.001_453, 0.018_028, 1393.3, 2545.2, 1407.9, 2725.5, 3.3603, 5.6159),
];

/// Saturated liquid (`f`) or saturated vapor (`g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Vapor,
}

/// Saturated liquid and vapor states at one saturation pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturatedEntry {
    pub liquid: TableEntry,
    pub vapor: TableEntry,
}

impl SaturatedEntry {
    #[must_use]
    pub fn phase(&self, phase: Phase) -> &TableEntry {
        match phase {
            Phase::Liquid => &self.liquid,
            Phase::Vapor => &self.vapor,
        }
    }

    /// State of a liquid-vapor mixture with vapor mass fraction `quality`.
    ///
    /// Returns `None` if `quality` is outside `[0, 1]`.
    #[must_use]
    pub fn mixture(&self, quality: f64) -> Option<TableEntry> {
        (0.0..=1.0)
            .contains(&quality)
            .then(|| self.liquid.lerp(&self.vapor, quality))
    }

    /// Vapor mass fraction of the mixture whose `property` equals `value`.
    ///
    /// Returns `None` for temperature and pressure, which do not vary across
    /// the dome, and for values outside the saturated range.
    #[must_use]
    pub fn quality(&self, property: Property, value: f64) -> Option<f64> {
        let f = self.liquid.get(property);
        let g = self.vapor.get(property);
        let span = StrictlyPositive::admit(g - f)?;
        let x = (value - f) / span;
        (0.0..=1.0).contains(&x).then_some(x)
    }
}

/// Steam tables for water.
///
/// Superheated lookups fix one property to a tabulated grid value and
/// interpolate linearly on the other. Pressure is preferred as the fixed
/// property, since the superheated data is organized in constant-pressure
/// blocks. Fixing another property interpolates across those blocks, which
/// is only as fine as the block spacing.
///
/// States the superheated data cannot place are tried inside the vapor
/// dome: when one key is the pressure or temperature and the other falls
/// between its saturated-liquid and saturated-vapor values, the result is
/// the liquid-vapor mixture of the matching quality.
///
/// # Example
///
/// ```
/// use cycle_models::support::thermo::{Property, model::{PropertyTable, SteamTable}};
///
/// let table = SteamTable::new();
/// let entry = table
///     .lookup((Property::Pressure, 8.0e6), (Property::Temperature, 753.15))
///     .unwrap();
///
/// assert!((entry.get(Property::Enthalpy) - 3_348_400.0).abs() < 1e-6);
/// assert!((entry.get(Property::Entropy) - 6_658.6).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SteamTable {
    superheated: Vec<TableEntry>,
    saturated: Vec<SaturatedEntry>,
    tolerance: Tolerance,
    consistency: Tolerance,
}

impl Default for SteamTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SteamTable {
    /// Builds the table, converting the tabulated data to SI.
    #[must_use]
    pub fn new() -> Self {
        let superheated = SUPERHEATED
            .iter()
            .map(|&(p, t, v, u, h, s)| entry(pressure_bar(p), t, v, u, h, s))
            .collect();

        let saturated = SATURATED
            .iter()
            .map(|&(p, t, v_f, v_g, u_f, u_g, h_f, h_g, s_f, s_g)| {
                let p = Pressure::new::<kilopascal>(p).get::<pascal>();
                SaturatedEntry {
                    liquid: entry(p, t, v_f, u_f, h_f, s_f),
                    vapor: entry(p, t, v_g, u_g, h_g, s_g),
                }
            })
            .collect();

        Self {
            superheated,
            saturated,
            tolerance: Tolerance::default(),
            consistency: Tolerance { abs: 1e-9, rel: 1e-2 },
        }
    }

    /// Sets the tolerance used to match a fixed property to a grid value.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the tolerance used to check known properties against lookups.
    #[must_use]
    pub fn with_consistency_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.consistency = tolerance;
        self
    }

    /// Saturation state where `phase`'s `property` equals `value`.
    ///
    /// For example `saturated(Phase::Vapor, Property::Entropy, s)` finds the
    /// pressure at which saturated vapor has entropy `s`. Temperature and
    /// pressure are shared by both phases, so `phase` does not matter for them.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfRange`] if `value` is outside the table.
    pub fn saturated(
        &self,
        phase: Phase,
        property: Property,
        value: f64,
    ) -> Result<SaturatedEntry, LookupError> {
        let (lo, hi, t) = bracket(
            self.saturated.clone(),
            |row| row.phase(phase).get(property),
            property,
            value,
        )?;

        Ok(SaturatedEntry {
            liquid: lo.liquid.lerp(&hi.liquid, t),
            vapor: lo.vapor.lerp(&hi.vapor, t),
        })
    }

    /// Interpolates the superheated rows sharing `fixed` along `free`.
    ///
    /// Returns `None` when fewer than two rows match `fixed`.
    fn superheated_along(
        &self,
        fixed: (Property, f64),
        free: (Property, f64),
    ) -> Option<Result<TableEntry, LookupError>> {
        let rows: Vec<TableEntry> = self
            .superheated
            .iter()
            .filter(|row| self.tolerance.agrees(row.get(fixed.0), fixed.1))
            .copied()
            .collect();

        if rows.len() < 2 {
            return None;
        }

        Some(
            bracket(rows, |row| row.get(free.0), free.0, free.1)
                .map(|(lo, hi, t)| lo.lerp(&hi, t)),
        )
    }

    /// Liquid-vapor mixture at saturation pressure or temperature `fixed`
    /// whose `free` property matches.
    ///
    /// Returns `None` unless `fixed` is a pressure or temperature inside the
    /// table and `free` lies between the saturated liquid and vapor values.
    fn wet(&self, fixed: (Property, f64), free: (Property, f64)) -> Option<TableEntry> {
        if !matches!(fixed.0, Property::Pressure | Property::Temperature) {
            return None;
        }
        let sat = self.saturated(Phase::Liquid, fixed.0, fixed.1).ok()?;
        sat.mixture(sat.quality(free.0, free.1)?)
    }
}

impl PropertyTable for SteamTable {
    fn name(&self) -> &str {
        "steam"
    }

    fn consistency_tolerance(&self) -> Tolerance {
        self.consistency
    }

    fn lookup(
        &self,
        first: (Property, f64),
        second: (Property, f64),
    ) -> Result<TableEntry, LookupError> {
        let (fixed, free) = if second.0 == Property::Pressure {
            (second, first)
        } else {
            (first, second)
        };

        let no_data = || LookupError::NoData {
            first: first.0,
            first_value: first.1,
            second: second.0,
            second_value: second.1,
        };
        if fixed.0 == free.0 {
            return Err(no_data());
        }

        let pairs = [(fixed, free), (free, fixed)];

        let superheated = pairs
            .into_iter()
            .find_map(|(fixed, free)| self.superheated_along(fixed, free));
        if let Some(Ok(entry)) = superheated {
            return Ok(entry);
        }

        if let Some(entry) = pairs.into_iter().find_map(|(fixed, free)| self.wet(fixed, free)) {
            trace!(
                fixed = fixed.0.symbol(),
                free = free.0.symbol(),
                "state is inside the vapor dome"
            );
            return Ok(entry);
        }

        superheated.unwrap_or_else(|| Err(no_data()))
    }
}

/// Sorts `rows` on `key` and returns the two rows bracketing `value`, with
/// the interpolation fraction between them.
fn bracket<R: Copy>(
    mut rows: Vec<R>,
    key: impl Fn(&R) -> f64,
    property: Property,
    value: f64,
) -> Result<(R, R, f64), LookupError> {
    rows.sort_by(|a, b| key(a).total_cmp(&key(b)));

    let out_of_range = |min: f64, max: f64| LookupError::OutOfRange {
        key: property,
        value,
        min,
        max,
    };

    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(out_of_range(f64::NAN, f64::NAN));
    };
    let (min, max) = (key(first), key(last));
    if !(min..=max).contains(&value) {
        return Err(out_of_range(min, max));
    }

    rows.windows(2)
        .find_map(|pair| {
            let (lo, hi) = (key(&pair[0]), key(&pair[1]));
            (lo..=hi).contains(&value).then(|| {
                let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
                (pair[0], pair[1], t)
            })
        })
        .ok_or_else(|| out_of_range(min, max))
}

fn pressure_bar(p: f64) -> f64 {
    Pressure::new::<bar>(p).get::<pascal>()
}

/// Converts one row from table units to a SI [`TableEntry`].
fn entry(p: f64, t: f64, v: f64, u: f64, h: f64, s: f64) -> TableEntry {
    let kj = |x: f64| AvailableEnergy::new::<kilojoule_per_kilogram>(x).get::<joule_per_kilogram>();
    let mut values = [0.0; Property::COUNT];
    values[Property::Temperature.index()] =
        ThermodynamicTemperature::new::<degree_celsius>(t).get::<kelvin>();
    values[Property::Pressure.index()] = p;
    values[Property::SpecificVolume.index()] = v;
    values[Property::Enthalpy.index()] = kj(h);
    values[Property::Entropy.index()] = SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(s)
        .get::<joule_per_kilogram_kelvin>();
    values[Property::InternalEnergy.index()] = kj(u);
    TableEntry::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn celsius(t: f64) -> f64 {
        ThermodynamicTemperature::new::<degree_celsius>(t).get::<kelvin>()
    }

    #[test]
    fn exact_row() {
        let table = SteamTable::new();
        let entry = table
            .lookup((Property::Temperature, celsius(480.0)), (Property::Pressure, 8.0e6))
            .unwrap();

        assert_relative_eq!(entry.get(Property::SpecificVolume), 0.040_34, max_relative = 1e-12);
        assert_relative_eq!(entry.get(Property::InternalEnergy), 3_025_700.0, max_relative = 1e-12);
        assert_relative_eq!(entry.get(Property::Enthalpy), 3_348_400.0, max_relative = 1e-12);
        assert_relative_eq!(entry.get(Property::Entropy), 6_658.6, max_relative = 1e-12);
    }

    #[test]
    fn interpolates_on_temperature() {
        let table = SteamTable::new();
        let entry = table
            .lookup((Property::Pressure, 8.0e6), (Property::Temperature, celsius(460.0)))
            .unwrap();

        assert_relative_eq!(entry.get(Property::Enthalpy), 3_297_250.0, max_relative = 1e-9);
        assert_relative_eq!(entry.get(Property::Entropy), 6_588.8, max_relative = 1e-9);
    }

    #[test]
    fn interpolates_on_entropy() {
        let table = SteamTable::new();
        let entry = table
            .lookup((Property::Pressure, 1.0e6), (Property::Entropy, 6_658.6))
            .unwrap();

        let t = (6.6586 - 6.5850) / (6.6956 - 6.5850);
        assert_relative_eq!(
            entry.get(Property::Temperature),
            celsius(179.88 + t * (200.0 - 179.88)),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            entry.get(Property::Enthalpy),
            (2777.1 + t * (2828.3 - 2777.1)) * 1e3,
            max_relative = 1e-9
        );
    }

    #[test]
    fn does_not_extrapolate() {
        let table = SteamTable::new();
        let err = table
            .lookup((Property::Pressure, 8.0e6), (Property::Temperature, celsius(800.0)))
            .unwrap_err();

        let LookupError::OutOfRange { key, min, max, .. } = err else {
            panic!("expected out of range, got {err:?}");
        };
        assert_eq!(key, Property::Temperature);
        assert_relative_eq!(min, celsius(295.06));
        assert_relative_eq!(max, celsius(740.0));
    }

    #[test]
    fn untabulated_pair_has_no_data() {
        let table = SteamTable::new();

        // 50 bar has no block, and only one row sits at 480 °C.
        let err = table
            .lookup((Property::Pressure, 5.0e6), (Property::Temperature, celsius(480.0)))
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::NoData {
                first: Property::Pressure,
                second: Property::Temperature,
                ..
            }
        ));

        assert!(table
            .lookup((Property::Pressure, 8.0e6), (Property::Pressure, 8.0e6))
            .is_err());
    }

    #[test]
    fn wet_state_by_pressure_and_entropy() {
        let table = SteamTable::new();
        let entry = table
            .lookup((Property::Pressure, 1.0e5), (Property::Entropy, 6_658.6))
            .unwrap();

        let x = (6.6586 - 1.3028) / (7.3589 - 1.3028);
        assert_relative_eq!(entry.get(Property::Temperature), celsius(99.61), max_relative = 1e-12);
        assert_relative_eq!(
            entry.get(Property::Enthalpy),
            (417.51 + x * (2675.0 - 417.51)) * 1e3,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            entry.get(Property::SpecificVolume),
            0.001_043 + x * (1.6941 - 0.001_043),
            max_relative = 1e-9
        );
    }

    #[test]
    fn wet_state_by_temperature_and_enthalpy() {
        let table = SteamTable::new();
        let h = (762.51 + 0.25 * (2777.1 - 762.51)) * 1e3;
        let entry = table
            .lookup((Property::Temperature, celsius(179.88)), (Property::Enthalpy, h))
            .unwrap();

        assert_relative_eq!(entry.get(Property::Pressure), 1.0e6, max_relative = 1e-12);
        assert_relative_eq!(
            entry.get(Property::Entropy),
            (2.1381 + 0.25 * (6.5850 - 2.1381)) * 1e3,
            max_relative = 1e-9
        );
    }

    #[test]
    fn compressed_liquid_is_not_covered() {
        let table = SteamTable::new();

        // Below the saturated-liquid entropy at 80 bar.
        let err = table
            .lookup((Property::Pressure, 8.0e6), (Property::Entropy, 1_000.0))
            .unwrap_err();
        assert!(matches!(err, LookupError::OutOfRange { key: Property::Entropy, .. }));
    }

    #[test]
    fn consistency_tolerance_is_configurable() {
        let table = SteamTable::new();
        assert_eq!(table.consistency_tolerance(), Tolerance { abs: 1e-9, rel: 1e-2 });

        let strict = table.with_consistency_tolerance(Tolerance::default());
        assert_eq!(strict.consistency_tolerance(), Tolerance::default());
    }

    #[test]
    fn saturated_by_vapor_entropy() {
        let table = SteamTable::new();
        let sat = table.saturated(Phase::Vapor, Property::Entropy, 6_658.6).unwrap();

        let t = (6.6586 - 6.5850) / (6.6616 - 6.5850);
        assert_relative_eq!(
            sat.vapor.get(Property::Pressure),
            (1000.0 + t * (800.0 - 1000.0)) * 1e3,
            max_relative = 1e-9
        );
        assert_relative_eq!(sat.vapor.get(Property::Entropy), 6_658.6, max_relative = 1e-9);
        assert_relative_eq!(
            sat.liquid.get(Property::Pressure),
            sat.vapor.get(Property::Pressure)
        );
    }

    #[test]
    fn saturated_by_pressure_and_mixture() {
        let table = SteamTable::new();
        let sat = table.saturated(Phase::Liquid, Property::Pressure, 1.0e5).unwrap();

        assert_relative_eq!(sat.vapor.get(Property::Temperature), celsius(99.61));

        let wet = sat.mixture(0.5).unwrap();
        assert_relative_eq!(
            wet.get(Property::Enthalpy),
            (417.51 + 0.5 * (2675.0 - 417.51)) * 1e3,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            sat.quality(Property::Enthalpy, wet.get(Property::Enthalpy)).unwrap(),
            0.5,
            max_relative = 1e-12
        );
        assert_eq!(sat.mixture(1.5), None);
        assert_eq!(sat.quality(Property::Pressure, 1.0e5), None);
    }

    #[test]
    fn saturated_out_of_range() {
        let table = SteamTable::new();
        assert!(matches!(
            table.saturated(Phase::Vapor, Property::Pressure, 5.0e7),
            Err(LookupError::OutOfRange { key: Property::Pressure, .. })
        ));
    }
}
