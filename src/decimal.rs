use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Money type with 8 decimal places of internal precision. Presentation
/// rounding to whole cents is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    /// smallest balance treated as fully paid off
    pub const EPSILON: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(8)))
    }

    /// create from whole currency units (dollars)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// true once a balance is within the paid-off epsilon
    pub fn is_settled(&self) -> bool {
        self.0 <= Self::EPSILON.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.round_dp(2))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(8))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(8);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(8))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(8);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(8))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(8))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// annual interest rate expressed as a percentage (3.25 means 3.25%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from annual percentage (e.g. dec!(3.25) for 3.25%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p)
    }

    /// create from whole percentage points
    pub fn from_percent_u32(p: u32) -> Self {
        Rate(Decimal::from(p))
    }

    /// annual percentage
    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    /// annual fractional rate (percentage / 100)
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::from(100)
    }

    /// monthly fractional rate (percentage / 100 / 12)
    pub fn monthly_fraction(&self) -> Decimal {
        self.0 / Decimal::from(1200)
    }

    /// shift the rate by a percentage-point delta (may go negative)
    pub fn shifted(&self, delta: Decimal) -> Rate {
        Rate(self.0 + delta)
    }

    /// reduce the rate by a percentage-point delta, clamped at a floor
    pub fn reduced(&self, delta: Decimal, floor: Decimal) -> Rate {
        Rate((self.0 - delta.abs()).max(floor))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_percent(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.as_decimal(), dec!(100.12345679)); // rounded to 8 places
    }

    #[test]
    fn test_cents() {
        assert_eq!(Money::from_cents(139250), Money::from_decimal(dec!(1392.50)));
    }

    #[test]
    fn test_settled_epsilon() {
        assert!(Money::from_decimal(dec!(0.01)).is_settled());
        assert!(Money::from_decimal(dec!(0.009)).is_settled());
        assert!(!Money::from_decimal(dec!(0.011)).is_settled());
        assert!(Money::ZERO.is_settled());
    }

    #[test]
    fn test_rate_conversions() {
        let r = Rate::from_percent(dec!(3.25));
        assert_eq!(r.as_percent(), dec!(3.25));
        assert_eq!(r.as_fraction(), dec!(0.0325));
        assert_eq!(r.monthly_fraction().round_dp(10), dec!(0.0027083333));
    }

    #[test]
    fn test_rate_reduced_floor() {
        let r = Rate::from_percent(dec!(0.5));
        assert_eq!(r.reduced(dec!(2), dec!(0.1)), Rate::from_percent(dec!(0.1)));
        assert_eq!(r.reduced(dec!(-2), dec!(0.1)), Rate::from_percent(dec!(0.1)));

        let high = Rate::from_percent(dec!(18.99));
        assert_eq!(high.reduced(dec!(1), dec!(0.1)), Rate::from_percent(dec!(17.99)));
    }
}
