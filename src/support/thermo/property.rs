use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A thermodynamic property tracked at every state point.
///
/// Values are always stored in SI base units:
///
/// | Property           | Symbol | Unit     |
/// |--------------------|--------|----------|
/// | `Temperature`      | `T`    | K        |
/// | `Pressure`         | `p`    | Pa       |
/// | `SpecificVolume`   | `v`    | m³/kg    |
/// | `Enthalpy`         | `h`    | J/kg     |
/// | `Entropy`          | `s`    | J/kg·K   |
/// | `InternalEnergy`   | `u`    | J/kg     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Property {
    Temperature,
    Pressure,
    SpecificVolume,
    Enthalpy,
    Entropy,
    InternalEnergy,
}

impl Property {
    /// Number of tracked properties.
    pub const COUNT: usize = 6;

    /// All properties, in the order used for storage and reporting.
    pub const ALL: [Property; Self::COUNT] = [
        Property::Temperature,
        Property::Pressure,
        Property::SpecificVolume,
        Property::Enthalpy,
        Property::Entropy,
        Property::InternalEnergy,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Conventional symbol, e.g. `"T"` or `"v"`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Property::Temperature => "T",
            Property::Pressure => "p",
            Property::SpecificVolume => "v",
            Property::Enthalpy => "h",
            Property::Entropy => "s",
            Property::InternalEnergy => "u",
        }
    }

    /// SI unit label.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Property::Temperature => "K",
            Property::Pressure => "Pa",
            Property::SpecificVolume => "m³/kg",
            Property::Enthalpy | Property::InternalEnergy => "J/kg",
            Property::Entropy => "J/kg·K",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Temperature => "temperature",
            Property::Pressure => "pressure",
            Property::SpecificVolume => "specific volume",
            Property::Enthalpy => "specific enthalpy",
            Property::Entropy => "specific entropy",
            Property::InternalEnergy => "specific internal energy",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_order_matches_index() {
        for (i, property) in Property::ALL.into_iter().enumerate() {
            assert_eq!(property.index(), i);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Property::SpecificVolume.symbol(), "v");
        assert_eq!(Property::Entropy.unit(), "J/kg·K");
        assert_eq!(Property::Pressure.to_string(), "pressure");
    }
}
