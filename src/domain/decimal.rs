//! Exact decimal numeric type backed by rust_decimal.
//!
//! All silver amounts, multipliers and rates flow through this type so that the
//! same inputs always produce the same digits, independent of float drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exact decimal used for prices, weights, multipliers and rates.
///
/// Serializes to a JSON number (not string).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Build `num × 10^-scale`, e.g. `from_scaled(105, 2) == 1.05`.
    pub fn from_scaled(num: i64, scale: u32) -> Self {
        Decimal(RustDecimal::new(num, scale))
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s.trim()).map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// Largest representable value; saturated results land here.
    pub fn max_value() -> Self {
        Decimal(RustDecimal::MAX)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    pub fn floor(&self) -> Self {
        Decimal(self.0.floor())
    }

    /// Round to the nearest integer, halves toward positive infinity.
    ///
    /// `2.5 -> 3`, `-2.5 -> -2`. This is the rounding used for every silver
    /// figure shown to players.
    pub fn round_half_up(&self) -> Self {
        if self.0.scale() == 0 {
            return *self;
        }
        Decimal((self.0 + RustDecimal::new(5, 1)).floor())
    }

    /// Round to one decimal place with [`Decimal::round_half_up`] semantics.
    pub fn round_tenths(&self) -> Self {
        // A scale of 2 or more bounds the magnitude well below the ×10 overflow.
        if self.0.scale() <= 1 {
            return *self;
        }
        let scaled = Decimal(self.0 * RustDecimal::TEN).round_half_up();
        Decimal(scaled.0 / RustDecimal::TEN)
    }

    /// Round to `dp` decimal places, halves away from zero.
    pub fn round_dp(&self, dp: u32) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Division that yields `None` instead of panicking on a zero divisor.
    pub fn checked_div(&self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_div(rhs.0).map(Decimal)
    }

    /// Integral part as `u64`; negative values clamp to 0.
    pub fn to_u64_saturating(&self) -> u64 {
        if self.is_negative() {
            return 0;
        }
        self.0.trunc().to_u64().unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

// Arithmetic saturates at the representable range instead of panicking.

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_mul(rhs.0))
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    /// Division by zero yields zero; overflow saturates.
    fn div(self, rhs: Decimal) -> Decimal {
        if rhs.is_zero() {
            return Decimal::zero();
        }
        match self.0.checked_div(rhs.0) {
            Some(quotient) => Decimal(quotient),
            None if self.is_negative() != rhs.is_negative() => Decimal(RustDecimal::MIN),
            None => Decimal(RustDecimal::MAX),
        }
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_round_half_up_positive_and_negative() {
        assert_eq!(d("2.5").round_half_up(), d("3"));
        assert_eq!(d("2.49").round_half_up(), d("2"));
        assert_eq!(d("-2.5").round_half_up(), d("-2"));
        assert_eq!(d("-2.51").round_half_up(), d("-3"));
        assert_eq!(d("7").round_half_up(), d("7"));
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(d("33.333").round_tenths(), d("33.3"));
        assert_eq!(d("12.25").round_tenths(), d("12.3"));
        assert_eq!(d("-12.25").round_tenths(), d("-12.2"));
    }

    #[test]
    fn test_round_dp_four_places() {
        assert_eq!(d("0.23456").round_dp(4), d("0.2346"));
        assert_eq!(d("0.15").round_dp(4), d("0.15"));
    }

    #[test]
    fn test_checked_div_by_zero_is_none() {
        assert_eq!(d("10").checked_div(Decimal::zero()), None);
        assert_eq!(d("10").checked_div(d("4")), Some(d("2.5")));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = d("70000000000000000000000000000");
        assert_eq!(huge * d("2"), Decimal::max_value());
        assert_eq!(-huge * d("2"), -Decimal::max_value());
        assert_eq!(huge + huge, Decimal::max_value());
        assert_eq!(-huge - huge, -Decimal::max_value());
        assert_eq!(huge / d("0.001"), Decimal::max_value());
        assert_eq!(-huge / d("0.001"), -Decimal::max_value());
        assert_eq!(huge / Decimal::zero(), Decimal::zero());
    }

    #[test]
    fn test_rounding_at_the_range_edge() {
        let max = Decimal::max_value();
        assert_eq!(max.round_half_up(), max);
        assert_eq!(max.round_tenths(), max);
        assert_eq!((-max).round_tenths(), -max);
        assert_eq!(max.to_u64_saturating(), u64::MAX);
    }

    #[test]
    fn test_to_u64_saturating() {
        assert_eq!(d("42").to_u64_saturating(), 42);
        assert_eq!(d("-3").to_u64_saturating(), 0);
        assert_eq!(d("9.9").to_u64_saturating(), 9);
    }

    #[test]
    fn test_from_scaled() {
        assert_eq!(Decimal::from_scaled(105, 2), d("1.05"));
        assert_eq!(Decimal::from_scaled(6, 0), d("6"));
    }

    #[test]
    fn test_decimal_json_serialization() {
        let decimal = d("123.456");
        let json = serde_json::to_value(decimal).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_decimal_sum() {
        let total: Decimal = vec![d("1.5"), d("2.5"), d("3")].into_iter().sum();
        assert_eq!(total, d("7"));
    }

    #[test]
    fn test_decimal_ordering() {
        assert!(d("10") < d("20"));
        assert_eq!(std::cmp::max(d("1"), d("1.5")), d("1.5"));
    }
}
