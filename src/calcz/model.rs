use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One evaluated operation.
///
/// Records are immutable once built; history owns them after append and
/// corrections are expressed by appending a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    operation: String,
    operand_a: f64,
    operand_b: f64,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn new(operation: impl Into<String>, operand_a: f64, operand_b: f64, result: f64) -> Self {
        Self::with_timestamp(operation, operand_a, operand_b, result, Utc::now())
    }

    pub fn with_timestamp(
        operation: impl Into<String>,
        operand_a: f64,
        operand_b: f64,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation: operation.into(),
            operand_a,
            operand_b,
            result,
            timestamp,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn operand_a(&self) -> f64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> f64 {
        self.operand_b
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation, self.operand_a, self.operand_b, self.result
        )
    }
}

/// Round `value` to `precision` fractional digits.
pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = format!("{:.*}", precision as usize, value)
        .parse::<f64>()
        .unwrap_or(value);
    // Collapse -0 so it never shows up in output
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Render `value` with at most `precision` fractional digits and no
/// trailing zeros.
pub fn format_result(value: f64, precision: u32) -> String {
    round_to(value, precision).to_string()
}
