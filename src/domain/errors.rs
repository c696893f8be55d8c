use thiserror::Error;

/// Reasons a calculation request is rejected before any computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Base is not a finite positive number, or equals 1.
    #[error("Invalid base: must be a positive number other than 1")]
    InvalidBase,
    /// Value is not usable for the requested operation.
    #[error("Invalid value: logarithm requires a positive number, antilog a finite exponent")]
    InvalidValue,
}

pub type DomainResult<T> = Result<T, ValidationError>;
