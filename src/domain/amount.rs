use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Fixed-point sale amount using i64 cents (two decimal places)
///
/// Sums are exact, so totals do not depend on the order records are folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 100;

    /// Smallest amount the generator produces (0.50)
    pub const MIN_SALE: Amount = Amount(50);

    /// Largest amount the generator produces (999.99)
    pub const MAX_SALE: Amount = Amount(99_999);

    /// Create from a raw number of cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get raw number of cents
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Zero value
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Convert to decimal string with 2 decimal places
    pub fn to_decimal_string(&self) -> String {
        let abs_value = self.0.abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            abs_value / Self::SCALE,
            abs_value % Self::SCALE
        )
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
