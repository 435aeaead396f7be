//! Thermodynamic property models.
//!
//! A [`Medium`] is the working fluid of a cycle together with the model used
//! to derive its properties.

pub mod ideal_gas;
pub mod table;

pub(crate) mod ideal_gas_eos;

use crate::support::numeric::Tolerance;

use super::{Point, ResolveError};

pub use ideal_gas::{EntropyReference, IdealGas, IdealGasFluid, IdealGasParameters};
pub use table::{Phase, PropertyTable, SaturatedEntry, SteamTable, TableEntry};

/// The working fluid shared by every process of a cycle.
#[derive(Debug)]
pub enum Medium {
    /// Calorically perfect ideal gas.
    IdealGas(IdealGas),
    /// Real fluid described by tabulated data.
    Table(Box<dyn PropertyTable>),
}

impl Medium {
    /// Wraps a property table as a medium.
    pub fn table(table: impl PropertyTable + 'static) -> Self {
        Self::Table(Box::new(table))
    }

    /// Returns the ideal gas model, if this medium is one.
    #[must_use]
    pub fn ideal_gas(&self) -> Option<&IdealGas> {
        match self {
            Self::IdealGas(gas) => Some(gas),
            Self::Table(_) => None,
        }
    }

    /// Short description used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::IdealGas(_) => "ideal gas",
            Self::Table(table) => table.name(),
        }
    }

    /// Derives what it can of `point` from the properties it already knows.
    ///
    /// Returns the number of properties that became known.
    pub(crate) fn complete(
        &self,
        point: &mut Point,
        tolerance: Tolerance,
    ) -> Result<usize, ResolveError> {
        match self {
            Self::IdealGas(gas) => Ok(gas.complete(point, tolerance)?),
            Self::Table(table) => table::complete(table.as_ref(), point),
        }
    }
}

impl From<IdealGas> for Medium {
    fn from(gas: IdealGas) -> Self {
        Self::IdealGas(gas)
    }
}

impl From<SteamTable> for Medium {
    fn from(table: SteamTable) -> Self {
        Self::table(table)
    }
}
