use crate::config::CalcConfig;
use crate::error::{CalcError, Result};

/// Parse user text into an operand, enforcing the configured range.
pub fn parse_operand(raw: &str, config: &CalcConfig) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::InvalidInput(
            "Input cannot be empty or whitespace".into(),
        ));
    }
    let value: f64 = trimmed.parse().map_err(|_| {
        CalcError::InvalidInput(format!(
            "Invalid number format: {}. Please enter a valid numeric value",
            trimmed
        ))
    })?;
    validate_operand(value, config)
}

/// Range and finiteness checks for an already-numeric operand.
pub fn validate_operand(value: f64, config: &CalcConfig) -> Result<f64> {
    if !value.is_finite() {
        return Err(CalcError::InvalidInput(format!(
            "{} is not a finite number",
            value
        )));
    }
    if value.abs() > config.max_input_value {
        return Err(CalcError::InputOutOfRange {
            value,
            max: config.max_input_value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CalcConfig {
        let mut config = CalcConfig::new(".");
        config.max_input_value = 1000.0;
        config
    }

    #[test]
    fn parses_numbers_with_whitespace() {
        assert_eq!(parse_operand("  42 ", &config()).unwrap(), 42.0);
        assert_eq!(parse_operand("-3.5", &config()).unwrap(), -3.5);
        assert_eq!(parse_operand("1e2", &config()).unwrap(), 100.0);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        for raw in ["", "   ", "abc", "1,5"] {
            assert!(
                matches!(parse_operand(raw, &config()), Err(CalcError::InvalidInput(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_finite() {
        for raw in ["inf", "NaN", "-infinity"] {
            assert!(matches!(
                parse_operand(raw, &config()),
                Err(CalcError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn enforces_max_input_value() {
        assert_eq!(parse_operand("1000", &config()).unwrap(), 1000.0);
        let err = parse_operand("-1001", &config()).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InputOutOfRange { value, max } if value == -1001.0 && max == 1000.0
        ));
    }
}
