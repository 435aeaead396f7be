use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Marker type for values that must not be zero.
///
/// Used for divisors whose sign is meaningful, such as `1 − n` in the
/// polytropic work expression.
///
/// # Examples
///
/// ```
/// use cycle_models::support::constraint::{Constraint, NonZero};
///
/// assert_eq!(NonZero::admit(-0.3), Some(-0.3));
/// assert_eq!(NonZero::admit(0.0), None);
/// assert_eq!(NonZero::admit(f64::NAN), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonZero;

impl<T: PartialOrd + Zero> Constraint<T> for NonZero {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Less) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats() {
        assert!(NonZero::check(&2.0).is_ok());
        assert!(NonZero::check(&-3.5).is_ok());
        assert_eq!(NonZero::check(&0.0), Err(ConstraintError::Zero));
        assert_eq!(NonZero::check(&f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn admit_passes_value_through() {
        assert_eq!(NonZero::admit(1.0 - 1.3), Some(1.0 - 1.3));
        assert_eq!(NonZero::admit(1.0 - 1.0), None);
    }
}
