use thiserror::Error;

/// Domain-level errors for malformed record values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid date: {day:02}-{month:02}-{year:02}")]
    InvalidDate { day: u8, month: u8, year: u8 },

    #[error("Invalid register id: {0}")]
    InvalidRegister(u8),
}
