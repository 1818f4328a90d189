//! Built-in change observers: logging and autosave.

use crate::error::Result;
use crate::notify::{Change, ChangeEvent, Observer};
use crate::store::DataStore;

/// Logs every committed change at `info`.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LoggingObserver {
    fn name(&self) -> &str {
        "logger"
    }

    fn on_change(&mut self, event: &ChangeEvent<'_>) -> Result<()> {
        match event.change {
            Change::Appended(record) => tracing::info!(
                operation = record.operation(),
                a = record.operand_a(),
                b = record.operand_b(),
                result = record.result(),
                "Performed operation: {}",
                record
            ),
            Change::Cleared => tracing::info!("History cleared"),
        }
        Ok(())
    }
}

/// Persists the full history after every committed change.
pub struct AutoSaveObserver<S: DataStore> {
    store: S,
}

impl<S: DataStore> AutoSaveObserver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: DataStore> Observer for AutoSaveObserver<S> {
    fn name(&self) -> &str {
        "autosave"
    }

    fn on_change(&mut self, event: &ChangeEvent<'_>) -> Result<()> {
        self.store.save(event.entries)?;
        tracing::info!(
            entries = event.entries.len(),
            path = %self.store.location(),
            "History auto-saved"
        );
        Ok(())
    }
}
