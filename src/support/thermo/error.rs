use thiserror::Error;

use super::Property;

/// A freshly computed property value disagrees with the value already held.
///
/// This is a contradiction in the supplied data (or between supplied data and
/// a physical law), never a numerical gap.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "inconsistent {property} at point {point:?}: holds {existing} {unit}, computed {computed} {unit}",
    unit = .property.unit()
)]
pub struct Inconsistency {
    /// Name of the point holding the conflicting value.
    pub point: String,
    pub property: Property,
    /// The value already held by the point.
    pub existing: f64,
    /// The value a relation produced.
    pub computed: f64,
}

/// Errors returned by a real-fluid [`PropertyTable`](super::model::PropertyTable).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// No tabulated rows match either known property as a fixed key.
    #[error("no tabulated data for {first} = {first_value} and {second} = {second_value}")]
    NoData {
        first: Property,
        first_value: f64,
        second: Property,
        second_value: f64,
    },

    /// Rows exist for the fixed key, but the interpolation key falls outside them.
    #[error("{key} = {value} is outside the tabulated range [{min}, {max}]")]
    OutOfRange {
        key: Property,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors raised while completing a single point from its known properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Inconsistent(#[from] Inconsistency),

    #[error("property lookup failed at point {point:?}")]
    Lookup {
        point: String,
        #[source]
        source: LookupError,
    },
}
