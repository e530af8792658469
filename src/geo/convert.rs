//! Degrees/minutes/seconds to decimal degrees

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use crate::types::Rational;

/// Why a DMS triple could not be converted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// One of the three rationals has a zero denominator
    #[error("{component} has a zero denominator")]
    ZeroDenominator { component: &'static str },

    /// Fewer than three rationals were supplied
    #[error("expected degrees, minutes and seconds, found {found} value(s)")]
    MissingComponent { found: usize },

    /// Hemisphere reference is not one of N, S, E, W
    #[error("invalid hemisphere reference {0:?}")]
    InvalidReference(String),
}

/// Hemisphere reference from GPSLatitudeRef / GPSLongitudeRef
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Sign applied to the unsigned DMS magnitude
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

impl FromStr for Hemisphere {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" | "n" => Ok(Hemisphere::North),
            "S" | "s" => Ok(Hemisphere::South),
            "E" | "e" => Ok(Hemisphere::East),
            "W" | "w" => Ok(Hemisphere::West),
            other => Err(ConversionError::InvalidReference(other.to_string())),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        };
        write!(f, "{}", c)
    }
}

const COMPONENT_NAMES: [&str; 3] = ["degrees", "minutes", "seconds"];

/// Converts a DMS rational triple and hemisphere reference to signed decimal degrees
///
/// `decimal = d + m/60 + s/3600`, negated for `S` and `W`. Values past the
/// third rational are ignored.
pub fn convert(dms: &[Rational], hemisphere_ref: &str) -> Result<f64, ConversionError> {
    if dms.len() < 3 {
        return Err(ConversionError::MissingComponent { found: dms.len() });
    }

    let mut parts = [0.0f64; 3];
    for (i, part) in parts.iter_mut().enumerate() {
        *part = dms[i].to_f64().ok_or(ConversionError::ZeroDenominator {
            component: COMPONENT_NAMES[i],
        })?;
    }

    let hemisphere: Hemisphere = hemisphere_ref.parse()?;
    let [degrees, minutes, seconds] = parts;

    Ok(hemisphere.sign() * (degrees + minutes / 60.0 + seconds / 3600.0))
}
