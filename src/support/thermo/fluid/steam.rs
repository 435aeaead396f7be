use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

use crate::support::thermo::model::ideal_gas::{IdealGasFluid, IdealGasParameters};
use crate::support::units::SpecificGasConstant;

/// Canonical identifier for water vapor.
///
/// As an ideal gas, steam is only reasonable well away from saturation.
/// Use [`SteamTable`](crate::support::thermo::model::SteamTable) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Steam;

impl IdealGasFluid for Steam {
    fn parameters() -> IdealGasParameters {
        IdealGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(461.8),
            1.327,
        )
    }
}
