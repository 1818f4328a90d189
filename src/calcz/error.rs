use thiserror::Error;

/// A single subscriber failure collected during a notify pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    pub subscriber: String,
    pub message: String,
}

/// Aggregate of every observer that failed during one notify pass.
///
/// The mutation that triggered the notification has already been applied
/// when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} observer(s) failed: {}", .failures.len(), describe_failures(.failures))]
pub struct ObserverError {
    pub failures: Vec<ObserverFailure>,
}

impl ObserverError {
    pub fn failed_subscribers(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.subscriber.as_str()).collect()
    }
}

fn describe_failures(failures: &[ObserverFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.subscriber, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation already registered: {0}")]
    DuplicateOperation(String),

    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Value {value} exceeds the maximum allowed limit ({max})")]
    InputOutOfRange { value: f64, max: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Observer(#[from] ObserverError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_error_names_each_failure() {
        let err = ObserverError {
            failures: vec![ObserverFailure {
                subscriber: "autosave".into(),
                message: "disk full".into(),
            }],
        };
        assert_eq!(err.to_string(), "1 observer(s) failed: autosave (disk full)");
        assert_eq!(err.failed_subscribers(), vec!["autosave"]);
    }

    #[test]
    fn out_of_range_message_includes_limit() {
        let err = CalcError::InputOutOfRange {
            value: 2000.0,
            max: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "Value 2000 exceeds the maximum allowed limit (1000)"
        );
    }
}
