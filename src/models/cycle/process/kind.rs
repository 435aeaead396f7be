use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::support::thermo::Property;

/// The physical law relating the two endpoints of a process.
///
/// | Kind         | Constrained property | Ideal-gas relation       |
/// |--------------|----------------------|--------------------------|
/// | `Isentropic` | `s`                  | `p·v^γ = const`          |
/// | `Isobaric`   | `p`                  | `T/v = const`            |
/// | `Isochoric`  | `v`                  | `p/T = const`            |
/// | `Isothermal` | `T`                  | `p·v = const`            |
/// | `Polytropic` | none                 | `p·vⁿ = const`           |
/// | `Adiabatic`  | none                 | none                     |
///
/// `Adiabatic` is a non-ideal compressor or turbine. Its end state has the
/// end pressure and the enthalpy `h_B = h_A + (h_Bs − h_A)/η` for compression,
/// or `h_B = h_A − η·(h_A − h_Bs)` for expansion, where `h_Bs` is the ideal
/// isentropic end state at the same pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProcessKind {
    Isentropic,
    Isobaric,
    Isochoric,
    Isothermal,
    Polytropic { n: f64 },
    /// Adiabatic with isentropic efficiency `0 < efficiency ≤ 1`.
    Adiabatic { efficiency: f64 },
}

impl ProcessKind {
    /// The property that is equal at both endpoints, if any.
    #[must_use]
    pub fn constrained(&self) -> Option<Property> {
        match self {
            Self::Isentropic => Some(Property::Entropy),
            Self::Isobaric => Some(Property::Pressure),
            Self::Isochoric => Some(Property::SpecificVolume),
            Self::Isothermal => Some(Property::Temperature),
            Self::Polytropic { .. } | Self::Adiabatic { .. } => None,
        }
    }

    /// Exponent `k` of the path `p·v^k = const` for an ideal gas.
    ///
    /// Returns `None` for an isochoric process, whose path is vertical, and
    /// for a non-ideal adiabatic one, whose path is not a polytrope.
    #[must_use]
    pub fn path_exponent(&self, gamma: f64) -> Option<f64> {
        match self {
            Self::Isentropic => Some(gamma),
            Self::Isobaric => Some(0.0),
            Self::Isochoric | Self::Adiabatic { .. } => None,
            Self::Isothermal => Some(1.0),
            Self::Polytropic { n } => Some(*n),
        }
    }

    /// Exponents of the ideal-gas endpoint relation.
    ///
    /// For each listed property `X`, `X_A / X_B = ρ^e` for a single process
    /// ratio `ρ`. Entries are ordered by the priority in which a known pair is
    /// used to compute `ρ`: volumes, then pressures, then temperatures.
    /// A zero exponent means the property is constant along the process.
    ///
    /// Returns `None` for a non-ideal adiabatic process, which has no such
    /// relation.
    pub(crate) fn ratio_exponents(&self, gamma: f64) -> Option<[(Property, f64); 3]> {
        let (v, p, t) = match self {
            Self::Isentropic => (1.0, -gamma, -(gamma - 1.0)),
            Self::Polytropic { n } => (1.0, -n, -(n - 1.0)),
            Self::Isobaric => (1.0, 0.0, 1.0),
            Self::Isochoric => (0.0, 1.0, 1.0),
            Self::Isothermal => (1.0, -1.0, 0.0),
            Self::Adiabatic { .. } => return None,
        };

        Some([
            (Property::SpecificVolume, v),
            (Property::Pressure, p),
            (Property::Temperature, t),
        ])
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isentropic => f.write_str("isentropic"),
            Self::Isobaric => f.write_str("isobaric"),
            Self::Isochoric => f.write_str("isochoric"),
            Self::Isothermal => f.write_str("isothermal"),
            Self::Polytropic { n } => write!(f, "polytropic (n = {n})"),
            Self::Adiabatic { efficiency } => write!(f, "adiabatic (η = {efficiency})"),
        }
    }
}
