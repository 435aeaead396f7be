//! Building blocks shared by the cycle model.

pub mod constraint;
pub mod numeric;
pub mod thermo;
pub mod units;
