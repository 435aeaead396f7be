//! Numeric invariants checked before a value enters a calculation.
//!
//! Property resolvers divide by pressures and volumes and take logarithms of
//! temperature ratios. An operand that is zero (or negative, for a logarithm)
//! makes the result physically meaningless, so resolvers consult a
//! [`Constraint`] first and treat a violation as "not yet computable".
//!
//! # Provided constraints
//!
//! - [`NonZero`]: Not equal to zero
//! - [`StrictlyPositive`]: Greater than zero
//!
//! Both reject `NaN`.

mod non_zero;
mod strictly_positive;

use thiserror::Error;

pub use non_zero::NonZero;
pub use strictly_positive::StrictlyPositive;

/// A numeric invariant.
///
/// Implement this trait for a zero-sized marker type to describe a new
/// invariant.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;

    /// Returns `Some(value)` if it satisfies this constraint, otherwise `None`.
    ///
    /// This is the form used by property resolvers, where a violated
    /// constraint means the property stays unknown.
    fn admit(value: T) -> Option<T> {
        Self::check(&value).ok().map(|()| value)
    }
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
}
