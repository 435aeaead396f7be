//! Canonical fluid identifiers.
//!
//! A fluid type names a substance, and each model defines how that name is
//! interpreted through trait implementations (e.g., gas constants for the
//! [`IdealGas`](crate::support::thermo::model::IdealGas) model).

mod air;
mod steam;

pub use air::Air;
pub use steam::Steam;
