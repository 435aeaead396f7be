//! Calorically perfect ideal gas model.
//!
//! `IdealGas` implements the classic engineering approximation used for
//! air-standard cycle analysis: the ideal gas equation of state with constant
//! specific heats.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p·v = R·T`
//! - Calorically perfect: `cp = γR/(γ−1)` and `cv = R/(γ−1)` are constant
//! - Enthalpy and internal energy are measured from absolute zero:
//!   `h = cp·T`, `u = cv·T`
//!
//! # Reference State
//!
//! Entropy is reported relative to a configurable reference state
//! (`T_ref`, `p_ref`, `s_ref`):
//!
//! `s = s_ref + cp·ln(T/T_ref) − R·ln(p/p_ref)`
//!
//! # Resolvers
//!
//! [`IdealGas::complete`] repeatedly applies every relation whose inputs are
//! known at a point until none produces anything new. Relations whose
//! operands are missing or non-physical simply do nothing.

use thiserror::Error;
use tracing::trace;
use uom::{
    ConstZero,
    si::{
        f64::{Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
        pressure::{atmosphere, pascal},
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
    },
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    numeric::Tolerance,
    thermo::{Inconsistency, Point, Property},
    units::{SpecificEntropy, SpecificGasConstant},
};

use super::ideal_gas_eos;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdealGasParametersError {
    #[error("invalid gas constant R: {r:?}")]
    GasConstant { r: SpecificGasConstant },
    #[error("invalid specific heat ratio: {gamma} (must be > 1)")]
    Gamma { gamma: f64 },
    #[error("invalid reference temperature: {t_ref:?}")]
    ReferenceTemperature { t_ref: ThermodynamicTemperature },
    #[error("invalid reference pressure: {p_ref:?}")]
    ReferencePressure { p_ref: Pressure },
}

/// Reference state that anchors entropy for an [`IdealGas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyReference {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub entropy: SpecificEntropy,
}

impl EntropyReference {
    /// Returns a standard reference: 0°C, 1 atm, `s_ref = 0`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            pressure: Pressure::new::<atmosphere>(1.0),
            entropy: SpecificEntropy::ZERO,
        }
    }
}

impl Default for EntropyReference {
    fn default() -> Self {
        Self::standard()
    }
}

/// Constant parameters for the [`IdealGas`] model.
///
/// These values are typically provided by a fluid's [`IdealGasFluid`] implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasParameters {
    pub gas_constant: SpecificGasConstant,
    pub gamma: f64,
    pub reference: EntropyReference,
}

impl IdealGasParameters {
    #[must_use]
    pub fn new(gas_constant: SpecificGasConstant, gamma: f64) -> Self {
        Self {
            gas_constant,
            gamma,
            reference: EntropyReference::standard(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: EntropyReference) -> Self {
        self.reference = reference;
        self
    }
}

/// Fluid constants required by the [`IdealGas`] model.
pub trait IdealGasFluid {
    /// Returns the constant parameters for use with [`IdealGas`].
    fn parameters() -> IdealGasParameters;
}

/// Ideal gas with constant specific heats.
///
/// All coefficients are held in SI as plain `f64`, since every resolver
/// works on the SI values stored in a [`Point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    r: f64,
    gamma: f64,
    cp: f64,
    cv: f64,
    t_ref: f64,
    p_ref: f64,
    s_ref: f64,
}

impl IdealGas {
    /// Creates an ideal gas from its gas constant and specific heat ratio,
    /// with the standard entropy reference.
    ///
    /// # Errors
    ///
    /// Returns [`IdealGasParametersError`] if `R ≤ 0` or `γ ≤ 1`.
    pub fn new(gas_constant: SpecificGasConstant, gamma: f64) -> Result<Self, IdealGasParametersError> {
        Self::from_parameters(IdealGasParameters::new(gas_constant, gamma))
    }

    /// Creates an ideal gas using constants defined by `Fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`IdealGasParametersError`] if any constant is non-physical.
    pub fn of<Fluid: IdealGasFluid>() -> Result<Self, IdealGasParametersError> {
        Self::from_parameters(Fluid::parameters())
    }

    /// Creates an ideal gas from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`IdealGasParametersError`] if `R ≤ 0`, `γ ≤ 1`, or the
    /// reference temperature or pressure is not strictly positive.
    pub fn from_parameters(parameters: IdealGasParameters) -> Result<Self, IdealGasParametersError> {
        let gas_constant = parameters.gas_constant;
        let r = gas_constant.get::<joule_per_kilogram_kelvin>();
        if StrictlyPositive::check(&r).is_err() {
            return Err(IdealGasParametersError::GasConstant { r: gas_constant });
        }

        // γ − 1 must be strictly positive for cv to be physical.
        let gamma = parameters.gamma;
        if StrictlyPositive::check(&(gamma - 1.0)).is_err() || !gamma.is_finite() {
            return Err(IdealGasParametersError::Gamma { gamma });
        }

        let reference = parameters.reference;
        let t_ref = reference.temperature.get::<kelvin>();
        if StrictlyPositive::check(&t_ref).is_err() {
            return Err(IdealGasParametersError::ReferenceTemperature {
                t_ref: reference.temperature,
            });
        }

        let p_ref = reference.pressure.get::<pascal>();
        if StrictlyPositive::check(&p_ref).is_err() {
            return Err(IdealGasParametersError::ReferencePressure {
                p_ref: reference.pressure,
            });
        }

        Ok(Self {
            r,
            gamma,
            cp: gamma * r / (gamma - 1.0),
            cv: r / (gamma - 1.0),
            t_ref,
            p_ref,
            s_ref: reference.entropy.get::<joule_per_kilogram_kelvin>(),
        })
    }

    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        SpecificGasConstant::new::<joule_per_kilogram_kelvin>(self.r)
    }

    /// Specific heat ratio `γ = cp/cv`.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.cp)
    }

    #[must_use]
    pub fn cv(&self) -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.cv)
    }

    /// Derives every property of `point` reachable from what it already knows.
    ///
    /// Every resolver whose inputs are known is evaluated. Unknown targets are
    /// filled; known targets are checked against the fresh value, so data
    /// that contradicts the gas model is reported rather than ignored.
    ///
    /// Returns the number of properties that became known.
    ///
    /// # Errors
    ///
    /// Returns an [`Inconsistency`] if a relation contradicts a known value.
    pub fn complete(&self, point: &mut Point, tolerance: Tolerance) -> Result<usize, Inconsistency> {
        let mut filled = 0;

        loop {
            let mut progress = false;

            for resolver in &RESOLVERS {
                let Some(value) = (resolver.eval)(self, point) else {
                    continue;
                };
                if point.reconcile(resolver.target, value, tolerance)? {
                    trace!(
                        point = point.name(),
                        property = resolver.target.symbol(),
                        value,
                        via = resolver.name,
                        "derived property"
                    );
                    filled += 1;
                    progress = true;
                }
            }

            if !progress || point.is_complete() {
                break;
            }
        }

        Ok(filled)
    }

    /// Specific volume of the reference state.
    fn v_ref(&self) -> f64 {
        self.r * self.t_ref / self.p_ref
    }

    fn entropy_from_tp(&self, t: f64, p: f64) -> Option<f64> {
        let t = StrictlyPositive::admit(t)?;
        let p = StrictlyPositive::admit(p)?;
        Some(self.s_ref + self.cp * (t / self.t_ref).ln() - self.r * (p / self.p_ref).ln())
    }

    fn temperature_from_ps(&self, p: f64, s: f64) -> Option<f64> {
        let p = StrictlyPositive::admit(p)?;
        let exponent = (s - self.s_ref + self.r * (p / self.p_ref).ln()) / self.cp;
        Some(self.t_ref * exponent.exp())
    }

    fn pressure_from_ts(&self, t: f64, s: f64) -> Option<f64> {
        let t = StrictlyPositive::admit(t)?;
        let exponent = (self.s_ref - s + self.cp * (t / self.t_ref).ln()) / self.r;
        Some(self.p_ref * exponent.exp())
    }

    fn temperature_from_vs(&self, v: f64, s: f64) -> Option<f64> {
        let v = StrictlyPositive::admit(v)?;
        let exponent = (s - self.s_ref - self.r * (v / self.v_ref()).ln()) / self.cv;
        Some(self.t_ref * exponent.exp())
    }

    fn volume_from_ts(&self, t: f64, s: f64) -> Option<f64> {
        let t = StrictlyPositive::admit(t)?;
        let exponent = (s - self.s_ref - self.cv * (t / self.t_ref).ln()) / self.r;
        Some(self.v_ref() * exponent.exp())
    }
}

/// One relation producing `target` from other properties of the same point.
struct Resolver {
    name: &'static str,
    target: Property,
    eval: fn(&IdealGas, &Point) -> Option<f64>,
}

use Property::{Enthalpy, Entropy, InternalEnergy, Pressure as P, SpecificVolume, Temperature};

const RESOLVERS: [Resolver; 12] = [
    Resolver {
        name: "p·v = R·T",
        target: Temperature,
        eval: |gas, pt| ideal_gas_eos::temperature(pt.get(P)?, pt.get(SpecificVolume)?, gas.r),
    },
    Resolver {
        name: "p·v = R·T",
        target: SpecificVolume,
        eval: |gas, pt| ideal_gas_eos::specific_volume(pt.get(Temperature)?, pt.get(P)?, gas.r),
    },
    Resolver {
        name: "p·v = R·T",
        target: P,
        eval: |gas, pt| ideal_gas_eos::pressure(pt.get(Temperature)?, pt.get(SpecificVolume)?, gas.r),
    },
    Resolver {
        name: "h = cp·T",
        target: Temperature,
        eval: |gas, pt| StrictlyPositive::admit(pt.get(Enthalpy)? / gas.cp),
    },
    Resolver {
        name: "u = cv·T",
        target: Temperature,
        eval: |gas, pt| StrictlyPositive::admit(pt.get(InternalEnergy)? / gas.cv),
    },
    Resolver {
        name: "h = cp·T",
        target: Enthalpy,
        eval: |gas, pt| Some(gas.cp * StrictlyPositive::admit(pt.get(Temperature)?)?),
    },
    Resolver {
        name: "u = cv·T",
        target: InternalEnergy,
        eval: |gas, pt| Some(gas.cv * StrictlyPositive::admit(pt.get(Temperature)?)?),
    },
    Resolver {
        name: "s(T, p)",
        target: Entropy,
        eval: |gas, pt| gas.entropy_from_tp(pt.get(Temperature)?, pt.get(P)?),
    },
    Resolver {
        name: "s(T, p)",
        target: Temperature,
        eval: |gas, pt| gas.temperature_from_ps(pt.get(P)?, pt.get(Entropy)?),
    },
    Resolver {
        name: "s(T, p)",
        target: P,
        eval: |gas, pt| gas.pressure_from_ts(pt.get(Temperature)?, pt.get(Entropy)?),
    },
    Resolver {
        name: "s(T, v)",
        target: Temperature,
        eval: |gas, pt| gas.temperature_from_vs(pt.get(SpecificVolume)?, pt.get(Entropy)?),
    },
    Resolver {
        name: "s(T, v)",
        target: SpecificVolume,
        eval: |gas, pt| gas.volume_from_ts(pt.get(Temperature)?, pt.get(Entropy)?),
    },
];
