//! Logarithm and antilogarithm computation.
//!
//! Everything here is a pure function of its arguments: no logging, no
//! shared state. A request either validates and computes in full or is
//! rejected with a [`ValidationError`] before any arithmetic happens.

use super::errors::{DomainResult, ValidationError};
use super::models::{CalculationRequest, CalculationResult, Operation};
use super::steps::generate_steps;

/// A request whose base and value are known to be acceptable.
///
/// Only [`validate`] can produce one, so [`compute`] never sees a bad base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    operation: Operation,
    base: f64,
    value: f64,
}

impl ValidatedInput {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl TryFrom<CalculationRequest> for ValidatedInput {
    type Error = ValidationError;

    fn try_from(request: CalculationRequest) -> DomainResult<Self> {
        validate(request.base, request.value, request.operation)
    }
}

/// Checks a base/value pair for the given operation.
///
/// The base is checked first, so a base of 1 is reported as
/// [`ValidationError::InvalidBase`] whatever the value is. Antilog accepts
/// any finite exponent, including zero and negatives.
///
/// # Examples
///
/// ```
/// use logbook::domain::{validate, Operation, ValidationError};
///
/// assert!(validate(10.0, 100.0, Operation::Log).is_ok());
/// assert_eq!(validate(1.0, 5.0, Operation::Log), Err(ValidationError::InvalidBase));
/// assert_eq!(validate(10.0, -1.0, Operation::Log), Err(ValidationError::InvalidValue));
/// assert!(validate(10.0, -1.0, Operation::Antilog).is_ok());
/// ```
pub fn validate(base: f64, value: f64, operation: Operation) -> DomainResult<ValidatedInput> {
    if !base.is_finite() || base <= 0.0 || base == 1.0 {
        return Err(ValidationError::InvalidBase);
    }

    let value_ok = match operation {
        Operation::Log => value.is_finite() && value > 0.0,
        Operation::Antilog => value.is_finite(),
    };
    if !value_ok {
        return Err(ValidationError::InvalidValue);
    }

    Ok(ValidatedInput { operation, base, value })
}

/// Computes the unrounded result for a validated input.
///
/// Log uses the change-of-base formula `ln(value) / ln(base)`. Antilog is
/// evaluated as `exp(value * ln(base))`, the same decomposition the step
/// derivation displays.
///
/// # Examples
///
/// ```
/// use logbook::domain::{compute, validate, Operation};
///
/// let input = validate(10.0, 100.0, Operation::Log).unwrap();
/// assert!((compute(&input) - 2.0).abs() < 1e-12);
///
/// let input = validate(2.0, 3.0, Operation::Antilog).unwrap();
/// assert!((compute(&input) - 8.0).abs() < 1e-12);
/// ```
pub fn compute(input: &ValidatedInput) -> f64 {
    let ln_base = input.base.ln();
    match input.operation {
        Operation::Log => input.value.ln() / ln_base,
        Operation::Antilog => (input.value * ln_base).exp(),
    }
}

/// Validates, computes and derives the steps for one request.
pub fn calculate(operation: Operation, base: f64, value: f64) -> DomainResult<CalculationResult> {
    let input = validate(base, value, operation)?;
    let result = compute(&input);
    Ok(CalculationResult {
        operation,
        base,
        value,
        result,
        steps: generate_steps(operation, base, value, result),
    })
}

/// Parses a form field into a number.
///
/// Surrounding whitespace is ignored; empty or malformed text gives `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
