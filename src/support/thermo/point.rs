use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, SpecificVolume, ThermodynamicTemperature},
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    numeric::Tolerance,
    units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy},
};

use super::{Inconsistency, Property};

type Slots = [Option<f64>; Property::COUNT];

/// One thermodynamic state, with a sparse set of known properties.
///
/// Each property has two slots:
///
/// - the *original* slot, filled only when the point is built (or when a
///   constraint is explicitly supplied later), and
/// - the *derived* slot, filled by property models and processes while a
///   cycle is solved.
///
/// The visible value is the derived one if present, otherwise the original.
/// Derived writes only ever target properties that are still unknown, so a
/// supplied value is never replaced by a computed one.
///
/// # Example
///
/// ```
/// use cycle_models::support::thermo::{Point, Property};
///
/// let mut p1 = Point::new("P1")
///     .with(Property::Temperature, 300.0)
///     .with(Property::Pressure, 100_000.0);
///
/// assert!(p1.is_known(Property::Temperature));
/// assert!(!p1.is_known(Property::SpecificVolume));
///
/// // Derived writes never replace a supplied value.
/// assert!(!p1.set(Property::Temperature, 500.0));
/// assert_eq!(p1.get(Property::Temperature), Some(300.0));
///
/// assert!(p1.set(Property::SpecificVolume, 0.861));
/// assert_eq!(p1.get(Property::SpecificVolume), Some(0.861));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    name: String,
    original: Slots,
    derived: Slots,
}

impl Point {
    /// Creates a point with no known properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original: [None; Property::COUNT],
            derived: [None; Property::COUNT],
        }
    }

    /// Returns this point with `property` supplied as an original value (SI units).
    ///
    /// A `NaN` or infinite value is refused and leaves `property` unknown.
    #[must_use]
    pub fn with(mut self, property: Property, value: f64) -> Self {
        if value.is_finite() {
            self.original[property.index()] = Some(value);
        } else {
            warn!(point = %self.name, property = property.symbol(), value, "refused non-finite value");
        }
        self
    }

    /// Returns this point with the given temperature supplied.
    #[must_use]
    pub fn with_temperature(self, temperature: ThermodynamicTemperature) -> Self {
        self.with(Property::Temperature, temperature.get::<kelvin>())
    }

    /// Returns this point with the given pressure supplied.
    #[must_use]
    pub fn with_pressure(self, pressure: Pressure) -> Self {
        self.with(Property::Pressure, pressure.get::<pascal>())
    }

    /// Returns this point with the given specific volume supplied.
    #[must_use]
    pub fn with_specific_volume(self, volume: SpecificVolume) -> Self {
        self.with(
            Property::SpecificVolume,
            volume.get::<cubic_meter_per_kilogram>(),
        )
    }

    /// Returns this point with the given specific enthalpy supplied.
    #[must_use]
    pub fn with_enthalpy(self, enthalpy: SpecificEnthalpy) -> Self {
        self.with(Property::Enthalpy, enthalpy.get::<joule_per_kilogram>())
    }

    /// Returns this point with the given specific entropy supplied.
    #[must_use]
    pub fn with_entropy(self, entropy: SpecificEntropy) -> Self {
        self.with(Property::Entropy, entropy.get::<joule_per_kilogram_kelvin>())
    }

    /// Returns this point with the given specific internal energy supplied.
    #[must_use]
    pub fn with_internal_energy(self, internal_energy: SpecificInternalEnergy) -> Self {
        self.with(
            Property::InternalEnergy,
            internal_energy.get::<joule_per_kilogram>(),
        )
    }

    /// The point's name, used only for diagnostics and reporting.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the visible value of `property`: derived if present, else original.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<f64> {
        let i = property.index();
        self.derived[i].or(self.original[i])
    }

    /// Returns the supplied value of `property`, ignoring derived values.
    #[must_use]
    pub fn original(&self, property: Property) -> Option<f64> {
        self.original[property.index()]
    }

    /// Returns `true` if `property` has a value from either slot.
    #[must_use]
    pub fn is_known(&self, property: Property) -> bool {
        self.get(property).is_some()
    }

    /// Returns `true` if `property` was supplied rather than derived.
    #[must_use]
    pub fn is_original(&self, property: Property) -> bool {
        self.original[property.index()].is_some()
    }

    /// Writes a derived value if and only if `property` is currently unknown.
    ///
    /// Returns `true` if the value was written.
    pub fn set(&mut self, property: Property, value: f64) -> bool {
        if self.is_known(property) {
            return false;
        }
        self.derived[property.index()] = Some(value);
        true
    }

    /// Offers a computed value for `property`.
    ///
    /// An unknown property takes the value (returns `Ok(true)`). A known
    /// property is left untouched; if the offered value disagrees with it
    /// beyond `tolerance`, the data is contradictory.
    /// Non-finite values are not offered at all (returns `Ok(false)`), since a
    /// relation that overflowed has not produced a property value.
    ///
    /// # Errors
    ///
    /// Returns an [`Inconsistency`] if the point already holds a materially
    /// different value.
    pub fn reconcile(
        &mut self,
        property: Property,
        value: f64,
        tolerance: Tolerance,
    ) -> Result<bool, Inconsistency> {
        if !value.is_finite() {
            return Ok(false);
        }

        match self.get(property) {
            None => Ok(self.set(property, value)),
            Some(existing) if tolerance.agrees(existing, value) => Ok(false),
            Some(existing) => Err(Inconsistency {
                point: self.name.clone(),
                property,
                existing,
                computed: value,
            }),
        }
    }

    /// Supplies an original value after construction.
    ///
    /// Returns `false` (and changes nothing) if `property` already has an
    /// original value or `value` is not finite. Any derived value for
    /// `property` is discarded.
    pub fn supply(&mut self, property: Property, value: f64) -> bool {
        let i = property.index();
        if self.original[i].is_some() || !value.is_finite() {
            return false;
        }
        self.original[i] = Some(value);
        self.derived[i] = None;
        true
    }

    /// Clears every derived value, leaving only supplied data.
    pub fn reset_derived(&mut self) {
        self.derived = [None; Property::COUNT];
    }

    /// Number of known properties.
    #[must_use]
    pub fn known_count(&self) -> usize {
        Property::ALL.iter().filter(|&&p| self.is_known(p)).count()
    }

    /// Properties that are still unknown.
    pub fn unknown(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL.into_iter().filter(|&p| !self.is_known(p))
    }

    /// Returns `true` once every property is known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.known_count() == Property::COUNT
    }

    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        self.get(Property::Temperature)
            .map(ThermodynamicTemperature::new::<kelvin>)
    }

    #[must_use]
    pub fn pressure(&self) -> Option<Pressure> {
        self.get(Property::Pressure).map(Pressure::new::<pascal>)
    }

    #[must_use]
    pub fn specific_volume(&self) -> Option<SpecificVolume> {
        self.get(Property::SpecificVolume)
            .map(SpecificVolume::new::<cubic_meter_per_kilogram>)
    }

    #[must_use]
    pub fn enthalpy(&self) -> Option<SpecificEnthalpy> {
        self.get(Property::Enthalpy)
            .map(SpecificEnthalpy::new::<joule_per_kilogram>)
    }

    #[must_use]
    pub fn entropy(&self) -> Option<SpecificEntropy> {
        self.get(Property::Entropy)
            .map(SpecificEntropy::new::<joule_per_kilogram_kelvin>)
    }

    #[must_use]
    pub fn internal_energy(&self) -> Option<SpecificInternalEnergy> {
        self.get(Property::InternalEnergy)
            .map(SpecificInternalEnergy::new::<joule_per_kilogram>)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:?}", self.name)?;
        for property in Property::ALL {
            match self.get(property) {
                Some(value) => write!(f, ", {}={value:.2}", property.symbol())?,
                None => write!(f, ", {}=?", property.symbol())?,
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{pressure::bar, thermodynamic_temperature::degree_celsius};

    #[test]
    fn get_prefers_derived_over_original() {
        let mut point = Point::new("P").with(Property::Pressure, 1.0e5);
        assert_eq!(point.get(Property::Pressure), Some(1.0e5));
        assert!(point.is_original(Property::Pressure));

        // Only `supply` can put both slots in play; it clears the derived slot.
        point.derived[Property::Pressure.index()] = Some(2.0e5);
        assert_eq!(point.get(Property::Pressure), Some(2.0e5));
        assert_eq!(point.original(Property::Pressure), Some(1.0e5));
    }

    #[test]
    fn set_only_fills_unknowns() {
        let mut point = Point::new("P").with(Property::Temperature, 300.0);

        assert!(!point.set(Property::Temperature, 301.0));
        assert_eq!(point.get(Property::Temperature), Some(300.0));

        assert!(point.set(Property::Pressure, 1.0e5));
        assert!(!point.set(Property::Pressure, 2.0e5));
        assert_eq!(point.get(Property::Pressure), Some(1.0e5));
        assert!(!point.is_original(Property::Pressure));
    }

    #[test]
    fn zero_is_a_value_not_an_unknown() {
        let mut point = Point::new("P").with(Property::Entropy, 0.0);
        assert!(point.is_known(Property::Entropy));
        assert!(!point.set(Property::Entropy, 12.0));
        assert_eq!(point.get(Property::Entropy), Some(0.0));
    }

    #[test]
    fn reconcile_detects_conflicts() {
        let tol = Tolerance::default();
        let mut point = Point::new("P2").with(Property::Pressure, 1.0e5);

        assert_eq!(point.reconcile(Property::Pressure, 1.0e5 + 1e-6, tol), Ok(false));
        assert_eq!(point.reconcile(Property::Temperature, 400.0, tol), Ok(true));

        let err = point
            .reconcile(Property::Pressure, 2.0e5, tol)
            .unwrap_err();
        assert_eq!(err.point, "P2");
        assert_eq!(err.property, Property::Pressure);
        assert_eq!(err.existing, 1.0e5);
        assert_eq!(err.computed, 2.0e5);
    }

    #[test]
    fn reconcile_ignores_non_finite_values() {
        let tol = Tolerance::default();
        let mut point = Point::new("P");
        assert_eq!(point.reconcile(Property::Pressure, f64::INFINITY, tol), Ok(false));
        assert_eq!(point.reconcile(Property::Pressure, f64::NAN, tol), Ok(false));
        assert!(!point.is_known(Property::Pressure));
    }

    #[test]
    fn reset_derived_keeps_originals() {
        let mut point = Point::new("P").with(Property::Temperature, 300.0);
        point.set(Property::Pressure, 1.0e5);
        assert_eq!(point.known_count(), 2);

        point.reset_derived();
        assert_eq!(point.known_count(), 1);
        assert_eq!(point.get(Property::Temperature), Some(300.0));
    }

    #[test]
    fn supply_refuses_to_replace_originals() {
        let mut point = Point::new("P").with(Property::Temperature, 300.0);
        point.set(Property::Pressure, 1.0e5);

        assert!(!point.supply(Property::Temperature, 310.0));
        assert!(point.supply(Property::Pressure, 2.0e5));
        assert_eq!(point.get(Property::Pressure), Some(2.0e5));
        assert!(point.is_original(Property::Pressure));
    }

    #[test]
    fn non_finite_values_are_never_known() {
        let mut point = Point::new("P")
            .with(Property::Temperature, f64::NAN)
            .with(Property::Pressure, f64::INFINITY);

        assert_eq!(point.known_count(), 0);
        assert!(!point.supply(Property::Enthalpy, f64::NEG_INFINITY));
        assert!(!point.is_known(Property::Enthalpy));
    }

    #[test]
    fn typed_builders_store_si_values() {
        let point = Point::new("P")
            .with_pressure(Pressure::new::<bar>(80.0))
            .with_temperature(ThermodynamicTemperature::new::<degree_celsius>(480.0));

        assert_eq!(point.get(Property::Pressure), Some(8.0e6));
        assert!((point.get(Property::Temperature).unwrap() - 753.15).abs() < 1e-9);
        assert_eq!(point.temperature().unwrap().get::<kelvin>(), point.get(Property::Temperature).unwrap());
        assert!(point.enthalpy().is_none());
    }

    #[test]
    fn display_marks_unknowns() {
        let point = Point::new("P1").with(Property::Temperature, 300.0);
        let text = point.to_string();
        assert!(text.starts_with("Point(\"P1\", T=300.00, p=?"));
        assert!(text.ends_with("u=?)"));
    }
}
