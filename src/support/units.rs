//! Extensions to [`uom`].
//!
//! Every physical quantity crossing this crate's public API is a [`uom`]
//! quantity in SI. This module adds the specific (per-kilogram) quantities
//! that [`uom`] does not name, and a small parser for quantity strings such
//! as `"80 bar"` or `"440 C"`.
//!
//! ```
//! use cycle_models::support::units::{parse_pressure, parse_temperature};
//! use uom::si::{pressure::pascal, thermodynamic_temperature::kelvin};
//!
//! let p = parse_pressure("80 bar").unwrap();
//! let t = parse_temperature("440 C").unwrap();
//!
//! assert_eq!(p.get::<pascal>(), 8.0e6);
//! assert!((t.get::<kelvin>() - 713.15).abs() < 1e-9);
//! ```

mod parse;
mod quantities;

pub use parse::{UnitError, parse_pressure, parse_temperature};
pub use quantities::{
    SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, SpecificHeatTransfer,
    SpecificInternalEnergy, SpecificWork,
};
