//! Core data types for geotag_survey

use std::fmt;

/// An EXIF RATIONAL or SRATIONAL value
///
/// Both unsigned and signed rationals widen losslessly into `i64`, so the
/// reader produces this single type for either field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    /// Numerator
    pub num: i64,
    /// Denominator
    pub den: i64,
}

impl Rational {
    /// Creates a new rational
    pub fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// Returns the quotient, or `None` for a zero denominator
    pub fn to_f64(&self) -> Option<f64> {
        if self.den == 0 {
            None
        } else {
            Some(self.num as f64 / self.den as f64)
        }
    }
}

impl From<(u32, u32)> for Rational {
    fn from((num, den): (u32, u32)) -> Self {
        Self::new(num as i64, den as i64)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
