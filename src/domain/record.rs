use std::fmt;

use super::amount::Amount;
use super::error::DomainError;

/// Calendar date of a sale, rendered as two-digit components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaleDate {
    day: u8,
    month: u8,
    year: u8,
}

impl SaleDate {
    /// Create a date, validating day in [1,31], month in [1,12], year in [0,99]
    pub fn new(day: u8, month: u8, year: u8) -> Result<Self, DomainError> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year > 99 {
            return Err(DomainError::InvalidDate { day, month, year });
        }
        Ok(Self { day, month, year })
    }

    /// Two-digit day ("DD")
    pub fn day(&self) -> String {
        format!("{:02}", self.day)
    }

    /// Two-digit month ("MM")
    pub fn month(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Two-digit year ("YY")
    pub fn year(&self) -> String {
        format!("{:02}", self.year)
    }

    /// Aggregation key for monthly totals ("MM-YY")
    pub fn month_key(&self) -> String {
        format!("{:02}-{:02}", self.month, self.year)
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:02}", self.day, self.month, self.year)
    }
}

/// A single synthetic sale, immutable once generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    date: SaleDate,
    store_id: u32,
    register_id: u8,
    amount: Amount,
}

impl SalesRecord {
    /// Registers are numbered 1 through 6
    pub const REGISTERS: std::ops::RangeInclusive<u8> = 1..=6;

    /// Create a record, validating the register id
    pub fn new(
        date: SaleDate,
        store_id: u32,
        register_id: u8,
        amount: Amount,
    ) -> Result<Self, DomainError> {
        if !Self::REGISTERS.contains(&register_id) {
            return Err(DomainError::InvalidRegister(register_id));
        }
        Ok(Self {
            date,
            store_id,
            register_id,
            amount,
        })
    }

    pub fn date(&self) -> SaleDate {
        self.date
    }

    pub fn store_id(&self) -> u32 {
        self.store_id
    }

    pub fn register_id(&self) -> u8 {
        self.register_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}
