use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Marker type for values that must be greater than zero.
///
/// Absolute temperatures, pressures, specific volumes and the gas constant
/// all fall in this category.
///
/// # Examples
///
/// ```
/// use cycle_models::support::constraint::{Constraint, StrictlyPositive};
///
/// assert!(StrictlyPositive::check(&101_325.0).is_ok());
/// assert_eq!(StrictlyPositive::admit(300.0), Some(300.0));
///
/// assert!(StrictlyPositive::check(&0.0).is_err());
/// assert_eq!(StrictlyPositive::admit(-1.0), None);
/// assert_eq!(StrictlyPositive::admit(f64::NAN), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
