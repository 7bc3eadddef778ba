//! Taka amounts in whole currency units.
//!
//! The shop sells in Bangladeshi taka only and never deals in poisha, so a
//! price is an unsigned integer count of taka. Arithmetic saturates instead of
//! wrapping; a cart can never be large enough for that to matter, but an
//! overflowing total must not turn into a tiny one.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Currency sign printed in front of every amount.
pub const TAKA_SIGN: &str = "৳";

/// An amount of money in taka.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero taka.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole number of taka.
    #[must_use]
    pub const fn new(taka: u64) -> Self {
        Self(taka)
    }

    /// The amount in taka.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Whether this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format for display with thousands grouping, e.g. `৳12,500`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{TAKA_SIGN}{}", group_thousands(self.0))
    }

    /// Percentage saved when selling at `self` instead of `original`.
    ///
    /// Returns `None` unless `original` is strictly higher. Rounded down.
    #[must_use]
    pub const fn discount_percent_from(&self, original: Self) -> Option<u64> {
        if original.0 <= self.0 {
            return None;
        }
        Some((original.0 - self.0) * 100 / original.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<u64> for Price {
    fn from(taka: u64) -> Self {
        Self(taka)
    }
}

/// Insert a comma every three digits from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouping() {
        assert_eq!(Price::new(0).display(), "৳0");
        assert_eq!(Price::new(100).display(), "৳100");
        assert_eq!(Price::new(3450).display(), "৳3,450");
        assert_eq!(Price::new(1_234_567).display(), "৳1,234,567");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(3450).times(2), Price::new(100)].into_iter().sum();
        assert_eq!(total, Price::new(7000));
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(Price::new(3450).discount_percent_from(Price::new(4200)), Some(17));
        assert_eq!(Price::new(2800).discount_percent_from(Price::new(3200)), Some(12));
        assert_eq!(Price::new(5200).discount_percent_from(Price::new(5200)), None);
        assert_eq!(Price::new(5200).discount_percent_from(Price::new(100)), None);
    }
}
