//! # Money Module
//!
//! Provides the `Money` type for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront API sends prices as JSON numbers:                       │
//! │    { "price": 139.9 }                                                   │
//! │                                                                         │
//! │  Held as f64 that is 139.900000000000005684...                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Decode:  139.9  → 13990 cents (rounded once, at the edge)            │
//! │    Encode:  13990  → 139.9                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never sums or taxes prices. Money is carried through the
//! snapshot and displayed, nothing more.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A price in the smallest currency unit (cents).
///
/// ## Wire Format
/// Serialized as a decimal JSON number, the same shape the storefront API
/// uses, so snapshots stay readable by the web storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::Money;
    ///
    /// let price = Money::from_cents(13_990); // 139.90
    /// assert_eq!(price.cents(), 13_990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding to the nearest
    /// cent. Returns `None` for NaN, infinities and amounts whose cents do
    /// not fit in an `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::Money;
    ///
    /// assert_eq!(Money::from_decimal(139.9), Some(Money::from_cents(13_990)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// assert_eq!(Money::from_decimal(1e17), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always positive, 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a decimal number, for the wire format only.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Display implementation shows money as `major.minor`.
///
/// ## Note
/// Currency symbols and localization are left to the views.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts go out as integers so `100` stays `100`, not `100.0`
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("price out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("price out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).ok_or_else(|| E::custom("price must be a finite number in range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(139.9).unwrap().cents(), 13_990);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(100.0).unwrap().cents(), 10_000);
        assert!(Money::from_decimal(f64::INFINITY).is_none());
    }

    #[test]
    fn test_from_decimal_rejects_out_of_range() {
        assert!(Money::from_decimal(1e17).is_none());
        assert!(Money::from_decimal(-1e17).is_none());
        assert!(Money::from_decimal(f64::MAX).is_none());
        assert_eq!(
            Money::from_decimal(90_000_000_000_000.5).unwrap().cents(),
            9_000_000_000_000_050
        );

        assert!(serde_json::from_str::<Money>("1e18").is_err());
        assert!(serde_json::from_str::<Money>("-2.5e17").is_err());
        assert!(serde_json::from_str::<Money>("100000000000000000000").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(13_990).to_string(), "139.90");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_decodes_integer_and_decimal_prices() {
        let whole: Money = serde_json::from_str("100").unwrap();
        assert_eq!(whole, Money::from_cents(10_000));

        let decimal: Money = serde_json::from_str("179.9").unwrap();
        assert_eq!(decimal, Money::from_cents(17_990));

        assert!(serde_json::from_str::<Money>("\"12\"").is_err());
    }

    #[test]
    fn test_encodes_as_json_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(10_000)).unwrap(), "100");
        assert_eq!(serde_json::to_string(&Money::from_cents(13_990)).unwrap(), "139.9");
    }
}
