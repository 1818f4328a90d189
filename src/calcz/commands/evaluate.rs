use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CalculationRecord, format_result};
use crate::operations;
use crate::session::Session;
use crate::store::DataStore;
use crate::undo::Mutation;
use crate::validate::{parse_operand, validate_operand};

/// Evaluate `op_name(a, b)`, append the record and notify subscribers.
pub fn run<S: DataStore>(
    session: &mut Session<S>,
    op_name: &str,
    a: f64,
    b: f64,
) -> Result<CmdResult> {
    let outcome = compute(session, op_name, a, b);
    let record = match outcome {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(operation = op_name, a, b, "Operation failed: {}", e);
            return Err(e);
        }
    };

    let precision = session.config().precision;
    let value = record.result();
    let notified = session.commit(Mutation::Append(record.clone()));

    let mut result = CmdResult::default()
        .with_value(value)
        .with_affected_records(vec![record]);
    result.add_message(CmdMessage::success(format!(
        "Result: {}",
        format_result(value, precision)
    )));
    Ok(result.with_notify_outcome(notified))
}

/// Same as [`run`] but operands come in as user-typed text.
pub fn run_input<S: DataStore>(
    session: &mut Session<S>,
    op_name: &str,
    a: &str,
    b: &str,
) -> Result<CmdResult> {
    let parsed = parse_operand(a, session.config())
        .and_then(|a| Ok((a, parse_operand(b, session.config())?)));
    match parsed {
        Ok((a, b)) => run(session, op_name, a, b),
        Err(e) => {
            tracing::error!(operation = op_name, "Validation error: {}", e);
            Err(e)
        }
    }
}

fn compute<S: DataStore>(
    session: &Session<S>,
    op_name: &str,
    a: f64,
    b: f64,
) -> Result<CalculationRecord> {
    let config = session.config();
    let operation = session.registry().resolve(op_name)?;
    let a = validate_operand(a, config)?;
    let b = validate_operand(b, config)?;
    let value = operations::apply(operation, a, b, config.precision)?;
    Ok(CalculationRecord::new(operation.display_name(), a, b, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalcConfig;
    use crate::error::CalcError;
    use crate::store::memory::InMemoryStore;

    fn session() -> Session<InMemoryStore> {
        let mut config = CalcConfig::new(".");
        config.max_input_value = 1e6;
        Session::new(config, InMemoryStore::new())
    }

    #[test]
    fn appends_record_with_display_name() {
        let mut session = session();
        let result = run(&mut session, "add", 5.0, 3.0).unwrap();

        assert_eq!(result.value, Some(8.0));
        assert_eq!(result.messages[0].content, "Result: 8");
        let entries = session.history().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].to_string(), "Addition(5, 3) = 8");
    }

    #[test]
    fn failures_leave_history_untouched() {
        let mut session = session();

        assert!(matches!(
            run(&mut session, "divide", 1.0, 0.0),
            Err(CalcError::DivisionByZero)
        ));
        assert!(matches!(
            run(&mut session, "sqrt", 1.0, 0.0),
            Err(CalcError::UnknownOperation(_))
        ));
        assert!(matches!(
            run(&mut session, "add", 2e6, 1.0),
            Err(CalcError::InputOutOfRange { .. })
        ));

        assert!(session.history().is_empty());
        assert!(!session.undo_manager().can_undo());
    }

    #[test]
    fn text_operands_are_validated() {
        let mut session = session();
        let result = run_input(&mut session, "Multiplication", " 2.5", "4 ").unwrap();
        assert_eq!(result.value, Some(10.0));

        assert!(matches!(
            run_input(&mut session, "add", "two", "3"),
            Err(CalcError::InvalidInput(_))
        ));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn respects_configured_precision() {
        let mut config = CalcConfig::new(".");
        config.precision = 3;
        let mut session = Session::new(config, InMemoryStore::new());

        let result = run(&mut session, "divide", 2.0, 3.0).unwrap();
        assert_eq!(result.value, Some(0.667));
    }
}
