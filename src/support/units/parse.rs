use thiserror::Error;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::{atmosphere, bar, kilopascal, megapascal, pascal},
    thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin},
};

/// Errors that may occur when parsing a quantity string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// No leading number could be read from the input.
    #[error("no numeric value in {input:?}")]
    NoValue { input: String },

    /// The unit suffix is not recognized for this quantity.
    #[error("unknown {quantity} unit {unit:?}")]
    UnknownUnit {
        quantity: &'static str,
        unit: String,
    },

    /// The parsed value is not physical (e.g. below absolute zero).
    #[error("{quantity} out of range: {value} {unit}")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        unit: &'static str,
    },
}

/// Parses an absolute pressure such as `"80 bar"`, `"8.1bar"` or `"101.325 kPa"`.
///
/// Recognized units are `Pa`, `kPa`, `MPa`, `bar` and `atm` (case-insensitive).
/// A bare number is taken as pascals.
///
/// # Errors
///
/// Returns [`UnitError`] if the text has no numeric value, the unit is not
/// recognized, or the pressure is negative or not finite.
pub fn parse_pressure(input: &str) -> Result<Pressure, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let pressure = match unit.to_ascii_lowercase().as_str() {
        "" | "pa" => Pressure::new::<pascal>(value),
        "kpa" => Pressure::new::<kilopascal>(value),
        "mpa" => Pressure::new::<megapascal>(value),
        "bar" => Pressure::new::<bar>(value),
        "atm" => Pressure::new::<atmosphere>(value),
        _ => {
            return Err(UnitError::UnknownUnit {
                quantity: "pressure",
                unit: unit.to_string(),
            });
        }
    };

    let pa = pressure.get::<pascal>();
    if !pa.is_finite() || pa < 0.0 {
        return Err(UnitError::OutOfRange {
            quantity: "pressure",
            value: pa,
            unit: "Pa",
        });
    }

    Ok(pressure)
}

/// Parses an absolute temperature such as `"440 C"`, `"300 K"` or `"70°F"`.
///
/// Recognized units are `K`, `C`/`°C` and `F`/`°F` (case-insensitive).
/// A bare number is taken as kelvin.
///
/// # Errors
///
/// Returns [`UnitError`] if the text has no numeric value, the unit is not
/// recognized, or the temperature is not finite or at or below absolute
/// zero.
pub fn parse_temperature(input: &str) -> Result<ThermodynamicTemperature, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let temperature = match unit.to_ascii_lowercase().as_str() {
        "" | "k" => ThermodynamicTemperature::new::<kelvin>(value),
        "c" | "°c" => ThermodynamicTemperature::new::<degree_celsius>(value),
        "f" | "°f" => ThermodynamicTemperature::new::<degree_fahrenheit>(value),
        _ => {
            return Err(UnitError::UnknownUnit {
                quantity: "temperature",
                unit: unit.to_string(),
            });
        }
    };

    let k = temperature.get::<kelvin>();
    if !k.is_finite() || k <= 0.0 {
        return Err(UnitError::OutOfRange {
            quantity: "temperature",
            value: k,
            unit: "K",
        });
    }

    Ok(temperature)
}

/// Splits `"80 bar"` into `(80.0, "bar")`.
///
/// The numeric part is the longest prefix that parses as `f64`, which keeps
/// exponents like `"1e5 Pa"` intact.
fn split_value_and_unit(input: &str) -> Result<(f64, &str), UnitError> {
    let trimmed = input.trim();

    let split = trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| {
            trimmed[..end]
                .trim_end()
                .parse::<f64>()
                .ok()
                .map(|value| (value, trimmed[end..].trim()))
        });

    split.ok_or_else(|| UnitError::NoValue {
        input: input.to_string(),
    })
}
