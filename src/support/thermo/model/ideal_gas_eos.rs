//! Ideal gas equation of state helpers.
//!
//! These functions implement the ideal gas equation of state `p·v = R·T` on
//! SI values. Each returns `None` when an operand is zero, negative or `NaN`,
//! which leaves the property it would have produced unknown.

use crate::support::constraint::{Constraint, StrictlyPositive};

/// Computes pressure from temperature and specific volume.
#[must_use]
pub(crate) fn pressure(temperature: f64, volume: f64, r: f64) -> Option<f64> {
    let temperature = StrictlyPositive::admit(temperature)?;
    let volume = StrictlyPositive::admit(volume)?;
    Some(r * temperature / volume)
}

/// Computes specific volume from temperature and pressure.
#[must_use]
pub(crate) fn specific_volume(temperature: f64, pressure: f64, r: f64) -> Option<f64> {
    let temperature = StrictlyPositive::admit(temperature)?;
    let pressure = StrictlyPositive::admit(pressure)?;
    Some(r * temperature / pressure)
}

/// Computes temperature from pressure and specific volume.
#[must_use]
pub(crate) fn temperature(pressure: f64, volume: f64, r: f64) -> Option<f64> {
    let pressure = StrictlyPositive::admit(pressure)?;
    let volume = StrictlyPositive::admit(volume)?;
    Some(pressure * volume / r)
}
