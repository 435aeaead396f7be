//! Thermodynamic state points and the property models that complete them.
//!
//! A [`Point`] holds whatever subset of properties is known about one state.
//! A [`Medium`](model::Medium) knows how to derive the rest: the
//! [`IdealGas`](model::IdealGas) model through the ideal-gas equation of state
//! and constant specific heats, a [`PropertyTable`](model::PropertyTable)
//! through tabulated real-fluid data.

mod error;
mod point;
mod property;

pub mod fluid;
pub mod model;

pub use error::{Inconsistency, LookupError, ResolveError};
pub use point::Point;
pub use property::Property;
