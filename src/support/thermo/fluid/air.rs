use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

use crate::support::thermo::model::ideal_gas::{IdealGasFluid, IdealGasParameters};
use crate::support::units::SpecificGasConstant;

/// Canonical identifier for dry air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Air;

impl IdealGasFluid for Air {
    fn parameters() -> IdealGasParameters {
        IdealGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0),
            1.4,
        )
    }
}
