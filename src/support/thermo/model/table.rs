//! Tabulated real-fluid properties.
//!
//! A [`PropertyTable`] maps two known properties of a state to all six,
//! typically by fixing one of them to a tabulated grid value and linearly
//! interpolating on the other. Tables never extrapolate.

mod steam;

use std::fmt::Debug;

use tracing::trace;

use crate::support::{
    numeric::Tolerance,
    thermo::{LookupError, Point, Property, ResolveError},
};

pub use steam::{Phase, SaturatedEntry, SteamTable};

/// A complete set of properties returned by a table lookup, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEntry {
    values: [f64; Property::COUNT],
}

impl TableEntry {
    /// Creates an entry from values ordered as [`Property::ALL`].
    #[must_use]
    pub fn new(values: [f64; Property::COUNT]) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(&self, property: Property) -> f64 {
        self.values[property.index()]
    }

    /// Linear interpolation between two entries: `t = 0` gives `self`,
    /// `t = 1` gives `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut values = self.values;
        for (value, end) in values.iter_mut().zip(other.values) {
            *value += t * (end - *value);
        }
        Self { values }
    }
}

/// Real-fluid property data keyed on any two properties.
pub trait PropertyTable: Debug {
    /// Human-readable fluid name, used in diagnostics.
    fn name(&self) -> &str;

    /// Returns every property of the state fixed by `first` and `second`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the state is not covered by the table.
    fn lookup(
        &self,
        first: (Property, f64),
        second: (Property, f64),
    ) -> Result<TableEntry, LookupError>;

    /// Tolerance for checking a known property against a looked-up value.
    ///
    /// Interpolating along different key pairs does not commute, so this is
    /// looser than the solver tolerance. The default accepts 1% relative
    /// disagreement.
    fn consistency_tolerance(&self) -> Tolerance {
        Tolerance { abs: 1e-9, rel: 1e-2 }
    }
}

/// Fills the unknown properties of `point` from `table`.
///
/// Known pairs are tried in [`Property::ALL`] order until one lookup
/// succeeds. Properties already known are kept, but must agree with the
/// looked-up values within [`PropertyTable::consistency_tolerance`].
///
/// Points with fewer than two known properties are left alone.
pub(crate) fn complete(
    table: &dyn PropertyTable,
    point: &mut Point,
) -> Result<usize, ResolveError> {
    if point.is_complete() || point.known_count() < 2 {
        return Ok(0);
    }

    let known: Vec<(Property, f64)> = Property::ALL
        .into_iter()
        .filter_map(|p| point.get(p).map(|value| (p, value)))
        .collect();

    let mut first_error = None;

    for (i, &first) in known.iter().enumerate() {
        for &second in &known[i + 1..] {
            match table.lookup(first, second) {
                Ok(entry) => {
                    let tolerance = table.consistency_tolerance();
                    let mut filled = 0;
                    for property in Property::ALL {
                        if point.reconcile(property, entry.get(property), tolerance)? {
                            filled += 1;
                        }
                    }
                    trace!(
                        point = point.name(),
                        table = table.name(),
                        first = first.0.symbol(),
                        second = second.0.symbol(),
                        filled,
                        "completed from table"
                    );
                    return Ok(filled);
                }
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
    }

    match first_error {
        Some(source) => Err(ResolveError::Lookup {
            point: point.name().to_string(),
            source,
        }),
        None => Ok(0),
    }
}
