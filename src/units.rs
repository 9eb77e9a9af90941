//! Length units and explicit unit conversion.
//!
//! The layout engine works in millimetres only. Anything measured in other
//! units (part sizes quoted in inches, mil-based datasheets) is converted
//! here, as a named step, before a [`TapeSpec`](crate::tape::TapeSpec) is built.
//!
//! # Parsing
//!
//! Lengths are written as a number optionally followed by a unit short name:
//!
//! ```
//! use tape_layout::units::{Length, LengthUnit};
//!
//! let len: Length = "0.08in".parse().unwrap();
//! assert_eq!(len.units, LengthUnit::Inches);
//! assert!((len.to_mm() - 2.032).abs() < 1e-9);
//!
//! // A bare number is millimetres
//! let len: Length = "4".parse().unwrap();
//! assert_eq!(len.units, LengthUnit::Millimeters);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Errors from parsing a length string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitsError {
    /// The numeric part could not be parsed.
    #[error("invalid length '{input}'")]
    InvalidNumber {
        /// The offending input.
        input: String,
    },

    /// The unit suffix is not a known unit short name.
    #[error("unknown length unit '{unit}' (expected one of mm, cm, m, in, ft, mil)")]
    UnknownUnit {
        /// The unrecognised suffix.
        unit: String,
    },
}

/// A unit of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimetres (the engine's working unit).
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    /// Centimetres.
    #[serde(rename = "cm")]
    Centimeters,
    /// Metres.
    #[serde(rename = "m")]
    Meters,
    /// Inches.
    #[serde(rename = "in")]
    Inches,
    /// Feet.
    #[serde(rename = "ft")]
    Feet,
    /// Thousandths of an inch.
    #[serde(rename = "mil")]
    Mils,
}

impl LengthUnit {
    /// All units, in short-name lookup order.
    pub const ALL: [Self; 6] = [
        Self::Millimeters,
        Self::Centimeters,
        Self::Meters,
        Self::Inches,
        Self::Feet,
        Self::Mils,
    ];

    /// Returns the short name used in length strings.
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Inches => "in",
            Self::Feet => "ft",
            Self::Mils => "mil",
        }
    }

    /// Looks up a unit by short name (case-insensitive).
    #[must_use]
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.short_name().eq_ignore_ascii_case(name))
    }

    /// Millimetres in one of this unit.
    #[must_use]
    pub fn mm_per_unit(&self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Centimeters => 10.0,
            Self::Meters => 1000.0,
            Self::Inches => MM_PER_INCH,
            Self::Feet => MM_PER_INCH * 12.0,
            Self::Mils => MM_PER_INCH / 1000.0,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A length value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Length {
    /// Numeric value in `units`.
    pub value: f64,
    /// Unit of `value`.
    pub units: LengthUnit,
}

impl Length {
    /// Creates a new length.
    #[must_use]
    pub const fn new(value: f64, units: LengthUnit) -> Self {
        Self { value, units }
    }

    /// Creates a length in millimetres.
    #[must_use]
    pub const fn mm(value: f64) -> Self {
        Self::new(value, LengthUnit::Millimeters)
    }

    /// Creates a length in inches.
    #[must_use]
    pub const fn inches(value: f64) -> Self {
        Self::new(value, LengthUnit::Inches)
    }

    /// Converts to another unit.
    #[must_use]
    pub fn convert_to(self, units: LengthUnit) -> Self {
        if self.units == units {
            return self;
        }
        Self::new(self.to_mm() / units.mm_per_unit(), units)
    }

    /// Returns the value in millimetres.
    #[must_use]
    pub fn to_mm(self) -> f64 {
        self.value * self.units.mm_per_unit()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}{}", self.value, self.units)
    }
}

fn length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*([A-Za-z]*)$")
            .expect("length pattern is a valid regex")
    })
}

impl FromStr for Length {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = length_pattern()
            .captures(trimmed)
            .ok_or_else(|| UnitsError::InvalidNumber {
                input: s.to_string(),
            })?;

        let value: f64 = caps[1].parse().map_err(|_| UnitsError::InvalidNumber {
            input: s.to_string(),
        })?;

        let unit_name = &caps[2];
        let units = if unit_name.is_empty() {
            LengthUnit::Millimeters
        } else {
            LengthUnit::from_short_name(unit_name).ok_or_else(|| UnitsError::UnknownUnit {
                unit: unit_name.to_string(),
            })?
        };

        Ok(Self::new(value, units))
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millimetres(f64),
            Text(String),
            Tagged { value: f64, units: LengthUnit },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Millimetres(value) => Ok(Self::mm(value)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Raw::Tagged { value, units } => Ok(Self::new(value, units)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_to_mm() {
        assert!((Length::inches(0.08).to_mm() - 2.032).abs() < 1e-12);
        assert!((Length::inches(0.05).to_mm() - 1.27).abs() < 1e-12);
    }

    #[test]
    fn convert_round_trip_units() {
        let len = Length::new(1.0, LengthUnit::Feet).convert_to(LengthUnit::Inches);
        assert_eq!(len.units, LengthUnit::Inches);
        assert!((len.value - 12.0).abs() < 1e-9);

        let len = Length::mm(25.4).convert_to(LengthUnit::Mils);
        assert!((len.value - 1000.0).abs() < 1e-9);

        let len = Length::new(2.0, LengthUnit::Meters).convert_to(LengthUnit::Centimeters);
        assert!((len.value - 200.0).abs() < 1e-9);
    }

    #[test]
    fn parse_with_units() {
        let len: Length = "  1.5 mm ".parse().unwrap();
        assert_eq!(len, Length::mm(1.5));

        let len: Length = "0.05IN".parse().unwrap();
        assert_eq!(len, Length::inches(0.05));

        let len: Length = "40mil".parse().unwrap();
        assert_eq!(len.units, LengthUnit::Mils);
        assert!((len.to_mm() - 1.016).abs() < 1e-12);

        let len: Length = "-.5cm".parse().unwrap();
        assert!((len.to_mm() + 5.0).abs() < 1e-12);
    }

    #[test]
    fn parse_bare_number_is_mm() {
        let len: Length = "8".parse().unwrap();
        assert_eq!(len, Length::mm(8.0));
    }

    #[test]
    fn reject_unknown_unit() {
        let err = "3 furlongs".parse::<Length>().unwrap_err();
        assert_eq!(
            err,
            UnitsError::UnknownUnit {
                unit: "furlongs".to_string()
            }
        );
    }

    #[test]
    fn reject_malformed_number() {
        assert!(matches!(
            "1.2.3mm".parse::<Length>(),
            Err(UnitsError::InvalidNumber { .. })
        ));
        assert!("".parse::<Length>().is_err());
        assert!("mm".parse::<Length>().is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(Length::inches(0.08).to_string(), "0.080in");
        assert_eq!(Length::mm(4.0).to_string(), "4.000mm");
    }

    #[test]
    fn deserialize_number_string_and_tagged() {
        let len: Length = serde_json::from_str("1.75").unwrap();
        assert_eq!(len, Length::mm(1.75));

        let len: Length = serde_json::from_str(r#""0.1in""#).unwrap();
        assert_eq!(len, Length::inches(0.1));

        let len: Length = serde_json::from_str(r#"{"value": 2, "units": "cm"}"#).unwrap();
        assert_eq!(len, Length::new(2.0, LengthUnit::Centimeters));

        assert!(serde_json::from_str::<Length>(r#""2 parsecs""#).is_err());
    }
}
