use crate::error::ObserverError;
use crate::model::CalculationRecord;
use crate::registry::OperationInfo;

pub mod evaluate;
pub mod history;
pub mod ops;
pub mod persist;
pub mod undo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The computed value, for `evaluate`.
    pub value: Option<f64>,
    pub affected_records: Vec<CalculationRecord>,
    pub listed_records: Vec<CalculationRecord>,
    pub operations: Vec<OperationInfo>,
    /// Set when the command's mutation succeeded but subscribers failed.
    pub observer_error: Option<ObserverError>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_affected_records(mut self, records: Vec<CalculationRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<CalculationRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_operations(mut self, operations: Vec<OperationInfo>) -> Self {
        self.operations = operations;
        self
    }

    /// Record the outcome of a notify pass. Failures become a warning; the
    /// command itself still succeeds.
    pub fn with_notify_outcome(mut self, outcome: Result<(), ObserverError>) -> Self {
        if let Err(err) = outcome {
            tracing::warn!(error = %err, "Observers failed after commit");
            self.add_message(CmdMessage::warning(format!("Warning: {}", err)));
            self.observer_error = Some(err);
        }
        self
    }
}
