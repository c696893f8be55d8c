use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way the calculator runs: logarithm or its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Log,
    Antilog,
}

impl Operation {
    /// Label shown in the operation selector.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Log => "Logarithm (log)",
            Operation::Antilog => "Antilogarithm (antilog)",
        }
    }

    /// Name of the second input field, which changes meaning with the operation.
    pub fn value_label(self) -> &'static str {
        match self {
            Operation::Log => "Value",
            Operation::Antilog => "Exponent",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Operation::Log => Operation::Antilog,
            Operation::Antilog => Operation::Log,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Log => write!(f, "log"),
            Operation::Antilog => write!(f, "antilog"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Operation::Log),
            "antilog" => Ok(Operation::Antilog),
            other => Err(format!("unknown operation '{}', expected 'log' or 'antilog'", other)),
        }
    }
}

/// Raw, not yet validated input for a calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    pub operation: Operation,
    pub base: f64,
    pub value: f64,
}

/// One line of a derivation, shown in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the derivation
    pub index: usize,
    pub formula: String,
    pub explanation: String,
}

/// A finished calculation together with the steps that explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub operation: Operation,
    pub base: f64,
    pub value: f64,
    pub result: f64,
    pub steps: Vec<Step>,
}

/// A single cell of the base-10 log table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogTableEntry {
    /// Table argument, rounded to one decimal
    pub number: f64,
    pub log_value: f64,
    /// `log_value` to four decimals
    pub display_value: String,
}

/// Row and column of a cell in the log table grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePosition {
    pub row: usize,
    pub column: usize,
}

/// Result of a nearest-entry lookup; `None` when there is no usable target.
pub type ClosestMatch = Option<TablePosition>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_parsing() {
        assert_eq!("log".parse::<Operation>(), Ok(Operation::Log));
        assert_eq!(" Antilog ".parse::<Operation>(), Ok(Operation::Antilog));
        assert!("ln".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operation_display_matches_parse() {
        for op in [Operation::Log, Operation::Antilog] {
            assert_eq!(op.to_string().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn test_operation_toggle_and_labels() {
        assert_eq!(Operation::Log.toggled(), Operation::Antilog);
        assert_eq!(Operation::Antilog.toggled(), Operation::Log);
        assert_eq!(Operation::Log.value_label(), "Value");
        assert_eq!(Operation::Antilog.value_label(), "Exponent");
    }

    #[test]
    fn test_operation_serializes_lowercase() {
        let json = serde_json::to_string(&Operation::Antilog).unwrap();
        assert_eq!(json, "\"antilog\"");
    }
}
