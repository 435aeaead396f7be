//! # Cycle Models
//!
//! Closed thermodynamic power cycles (Otto, Diesel, Brayton, Rankine, ...)
//! modeled as a ring of state-transition processes.
//!
//! State points start with whatever properties are known. Each process
//! encodes the physical law linking its two endpoints (isentropic, isobaric,
//! isochoric, isothermal or polytropic), and the cycle solver propagates
//! values around the ring until every point is determined or no further
//! progress is possible.
//!
//! ## Crate layout
//!
//! - [`models`]: The cycle model and its solver.
//! - [`support`]: State points, property models (ideal gas, steam tables),
//!   numeric constraints and units used by the models.
//!
//! ## Units
//!
//! Quantities crossing the public API are [`uom`] quantities in SI, or `f64`
//! values in SI base units where a [`Property`](support::thermo::Property)
//! key says which quantity is meant.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
