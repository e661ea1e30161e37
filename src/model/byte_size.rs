//! # Binary-prefixed byte magnitudes.
//!
//! [`ByteSize`] is a signed byte count with a canonical human-readable form.
//! Rendering picks the largest unit in which the magnitude is below 1024
//! (falling back to `TiB`); parsing accepts the same `<number> <unit>` form.
//!
//! ## Rules
//! - Units: `B`, `KiB`, `MiB`, `GiB`, `TiB` (powers of 1024).
//! - Unknown unit or unparsable number parses to zero.
//! - Values may be negative (counter resets upstream produce negative deltas).
//!
//! ## Example
//! ```rust
//! use sharif_net::ByteSize;
//!
//! let size = ByteSize::parse("1536 KiB");
//! assert_eq!(size.to_string(), "1.5 MiB");
//! assert_eq!(ByteSize::parse("12 parsecs"), ByteSize::ZERO);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// Unit table shared by rendering and parsing, smallest first.
const UNITS: [(&str, i64); 5] = [
    ("B", 1),
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
    ("TiB", 1 << 40),
];

/// A magnitude in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(i64);

impl ByteSize {
    pub const ZERO: ByteSize = ByteSize(0);

    /// Wraps a raw byte count.
    #[inline]
    pub const fn from_bytes(bytes: i64) -> Self {
        Self(bytes)
    }

    /// Returns the raw byte count.
    #[inline]
    pub const fn bytes(self) -> i64 {
        self.0
    }

    /// Parses `"<number> <unit>"`; anything else yields [`ByteSize::ZERO`].
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split_whitespace();
        let (Some(number), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Self::ZERO;
        };
        let Some(scale) = unit_scale(unit) else {
            return Self::ZERO;
        };
        match number.parse::<f64>() {
            Ok(value) if value.is_finite() => Self((value * scale as f64).round() as i64),
            _ => Self::ZERO,
        }
    }
}

fn unit_scale(unit: &str) -> Option<i64> {
    UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, scale)| *scale)
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let (name, scale) = UNITS
            .iter()
            .find(|(_, scale)| magnitude / (*scale as u64) < 1024)
            .unwrap_or(&UNITS[UNITS.len() - 1]);
        // Division by a power of two is exact, so the shortest f64 rendering
        // parses back to the same byte count.
        write!(f, "{} {}", self.0 as f64 / *scale as f64, name)
    }
}

impl FromStr for ByteSize {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Sub for ByteSize {
    type Output = ByteSize;

    fn sub(self, rhs: ByteSize) -> ByteSize {
        ByteSize(self.0.saturating_sub(rhs.0))
    }
}
