//! Rational values as stored by RATIONAL / SRATIONAL fields.

use std::fmt;

use super::error::{DecodeError, Result};
use super::record::{Endian, TypeTag};

/// A fraction read from two consecutive 32-bit integers.
///
/// Both layouts widen into `i64`, so an unsigned `0xFFFFFFFF` numerator
/// survives intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Parse the first 8 bytes of `bytes` as numerator then denominator.
    pub fn from_bytes(bytes: &[u8], endian: Endian, signed: bool) -> Result<Self> {
        if bytes.len() < 8 {
            return Err(DecodeError::Truncated {
                kind: if signed {
                    TypeTag::SRational
                } else {
                    TypeTag::Rational
                },
                needed: 8,
                actual: bytes.len(),
            });
        }

        let (num, den) = if signed {
            (
                endian.read_i32(&bytes[..4]) as i64,
                endian.read_i32(&bytes[4..8]) as i64,
            )
        } else {
            (
                endian.read_u32(&bytes[..4]) as i64,
                endian.read_u32(&bytes[4..8]) as i64,
            )
        };
        Ok(Self::new(num, den))
    }

    /// Plain floating-point division; a zero denominator yields `inf` or `NaN`.
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Division that refuses a zero denominator.
    pub fn checked_f64(self) -> Result<f64> {
        if self.denominator == 0 {
            return Err(DecodeError::ZeroDenominator {
                numerator: self.numerator,
            });
        }
        Ok(self.to_f64())
    }

    /// Decimal text when finite, the raw ratio otherwise.
    fn component_text(self) -> String {
        match self.checked_f64() {
            Ok(v) => v.to_string(),
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Three rationals: degrees, minutes, seconds (or hours, minutes, seconds
/// for the GPS time stamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpsRational {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl GpsRational {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Parse 24 bytes as three consecutive rationals.
    pub fn from_bytes(bytes: &[u8], endian: Endian, signed: bool) -> Result<Self> {
        if bytes.len() < 24 {
            return Err(DecodeError::Truncated {
                kind: if signed {
                    TypeTag::SRational
                } else {
                    TypeTag::Rational
                },
                needed: 24,
                actual: bytes.len(),
            });
        }

        Ok(Self::new(
            Rational::from_bytes(&bytes[0..8], endian, signed)?,
            Rational::from_bytes(&bytes[8..16], endian, signed)?,
            Rational::from_bytes(&bytes[16..24], endian, signed)?,
        ))
    }

    /// `degrees + minutes / 60 + seconds / 3600`.
    pub fn to_decimal_degrees(&self) -> Result<f64> {
        let d = self.degrees.checked_f64()?;
        let m = self.minutes.checked_f64()?;
        let s = self.seconds.checked_f64()?;
        Ok(d + m / 60.0 + s / 3600.0)
    }
}

impl fmt::Display for GpsRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}° {}' {}\"",
            self.degrees.component_text(),
            self.minutes.component_text(),
            self.seconds.component_text()
        )
    }
}

/// Round to `places` decimals, ties to even.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}
