//! # Operation Set
//!
//! Every calculator operation is a pure function of two operands. The
//! [`Operation`] trait is the extension seam: anything implementing it can be
//! handed to [`crate::registry::OperationRegistry::register`] and becomes a
//! command in the REPL without touching dispatch code.
//!
//! Operations return raw values. [`apply`] is the single place results are
//! checked for finiteness and rounded to the configured precision, so custom
//! operations get the same treatment as the built-ins.

use crate::error::{CalcError, Result};
use crate::model::round_to;

pub trait Operation {
    /// Registry key, e.g. `add`.
    fn name(&self) -> &str;

    /// Human-facing name carried by records, e.g. `Addition`.
    fn display_name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn execute(&self, a: f64, b: f64) -> Result<f64>;
}

/// Execute `operation` and round its result to `precision` fractional digits.
pub fn apply(operation: &dyn Operation, a: f64, b: f64, precision: u32) -> Result<f64> {
    let raw = operation.execute(a, b)?;
    if !raw.is_finite() {
        return Err(CalcError::InvalidOperation(format!(
            "{} of {} and {} is not a finite real number",
            operation.display_name(),
            a,
            b
        )));
    }
    Ok(round_to(raw, precision))
}

/// A built-in operation backed by a plain function pointer.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinOperation {
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    func: fn(f64, f64) -> Result<f64>,
}

impl BuiltinOperation {
    pub const fn new(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        func: fn(f64, f64) -> Result<f64>,
    ) -> Self {
        Self {
            name,
            display_name,
            description,
            func,
        }
    }
}

impl Operation for BuiltinOperation {
    fn name(&self) -> &str {
        self.name
    }

    fn display_name(&self) -> &str {
        self.display_name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn execute(&self, a: f64, b: f64) -> Result<f64> {
        (self.func)(a, b)
    }
}

/// All built-in operations, in the order they are registered.
pub fn builtins() -> Vec<BuiltinOperation> {
    vec![
        BuiltinOperation::new("add", "Addition", "Add two numbers", add),
        BuiltinOperation::new("subtract", "Subtraction", "Subtract b from a", subtract),
        BuiltinOperation::new(
            "multiply",
            "Multiplication",
            "Multiply two numbers",
            multiply,
        ),
        BuiltinOperation::new("divide", "Division", "Divide a by b", divide),
        BuiltinOperation::new("power", "Power", "Raise a to the power b", power),
        BuiltinOperation::new("root", "Root", "Take the b-th root of a", root),
        BuiltinOperation::new("modulus", "Modulus", "Remainder of a / b", modulus),
        BuiltinOperation::new(
            "int_divide",
            "IntegerDivision",
            "Floor division of a by b",
            int_divide,
        ),
        BuiltinOperation::new("percent", "Percentage", "a as a percentage of b", percent),
        BuiltinOperation::new("percentage", "Percentage", "Alias of percent", percent),
        BuiltinOperation::new(
            "abs_diff",
            "AbsoluteDifference",
            "Absolute difference |a - b|",
            abs_diff,
        ),
    ]
}

fn ensure_nonzero_divisor(b: f64) -> Result<()> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(())
}

fn is_integer(x: f64) -> bool {
    x.fract() == 0.0
}

pub fn add(a: f64, b: f64) -> Result<f64> {
    Ok(a + b)
}

pub fn subtract(a: f64, b: f64) -> Result<f64> {
    Ok(a - b)
}

pub fn multiply(a: f64, b: f64) -> Result<f64> {
    Ok(a * b)
}

pub fn divide(a: f64, b: f64) -> Result<f64> {
    ensure_nonzero_divisor(b)?;
    Ok(a / b)
}

pub fn power(a: f64, b: f64) -> Result<f64> {
    if a == 0.0 && b < 0.0 {
        return Err(CalcError::InvalidOperation(
            "Zero cannot be raised to a negative power".into(),
        ));
    }
    Ok(a.powf(b))
}

pub fn root(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::InvalidOperation("Zero root is undefined".into()));
    }
    if a < 0.0 {
        if !is_integer(b) {
            return Err(CalcError::InvalidOperation(
                "Cannot calculate a fractional root of a negative number".into(),
            ));
        }
        if b % 2.0 == 0.0 {
            return Err(CalcError::InvalidOperation(
                "Cannot calculate even root of a negative number".into(),
            ));
        }
        // Odd roots of negatives are real
        return Ok(-(-a).powf(1.0 / b));
    }
    Ok(a.powf(1.0 / b))
}

/// Truncated remainder: the sign follows the dividend.
pub fn modulus(a: f64, b: f64) -> Result<f64> {
    ensure_nonzero_divisor(b)?;
    Ok(a % b)
}

pub fn int_divide(a: f64, b: f64) -> Result<f64> {
    ensure_nonzero_divisor(b)?;
    Ok((a / b).floor())
}

pub fn percent(a: f64, b: f64) -> Result<f64> {
    ensure_nonzero_divisor(b)?;
    Ok((a / b) * 100.0)
}

pub fn abs_diff(a: f64, b: f64) -> Result<f64> {
    Ok((a - b).abs())
}
