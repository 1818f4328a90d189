//! # Session State
//!
//! [`Session`] owns every piece of mutable calculator state for one process:
//! the operation registry, the bounded history, the undo/redo stacks, the
//! subscriber registry and the persistence store. Commands borrow it
//! mutably, one at a time.
//!
//! [`Session::commit`] is the only path by which history changes forward.
//! It snapshots, mutates, clears redo, and then notifies subscribers exactly
//! once. Undo and redo restore snapshots without notifying.

use crate::config::CalcConfig;
use crate::error::{ObserverError, Result};
use crate::history::History;
use crate::model::CalculationRecord;
use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::registry::OperationRegistry;
use crate::store::DataStore;
use crate::undo::{Mutation, UndoRedoManager};

pub struct Session<S: DataStore> {
    config: CalcConfig,
    registry: OperationRegistry,
    history: History,
    undo: UndoRedoManager,
    notifier: ChangeNotifier,
    store: S,
}

impl<S: DataStore> Session<S> {
    /// A session with the built-in operations, an empty history and no
    /// subscribers.
    pub fn new(config: CalcConfig, store: S) -> Self {
        let history = History::new(config.max_history_size);
        let undo = UndoRedoManager::with_depth_limit(config.max_undo_depth);
        Self {
            config,
            registry: OperationRegistry::with_builtins(),
            history,
            undo,
            notifier: ChangeNotifier::new(),
            store,
        }
    }

    /// Apply a forward mutation and notify subscribers once.
    ///
    /// The mutation is kept even when observers fail.
    pub fn commit(&mut self, mutation: Mutation) -> std::result::Result<(), ObserverError> {
        let appended = matches!(mutation, Mutation::Append(_));
        self.undo.commit(&mut self.history, mutation);

        let entries = self.history.entries();
        let event = match (appended, entries.last()) {
            (true, Some(record)) => ChangeEvent::appended(record, entries),
            _ => ChangeEvent::cleared(entries),
        };
        self.notifier.notify(&event)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.undo.undo(&mut self.history)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.undo.redo(&mut self.history)
    }

    /// Swap in a whole new history (e.g. from disk). Undo/redo snapshots
    /// refer to the old timeline and are dropped.
    pub fn replace_history(&mut self, records: Vec<CalculationRecord>) {
        self.history.replace(records);
        self.undo.reset();
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn undo_manager(&self) -> &UndoRedoManager {
        &self.undo
    }

    pub fn notifier_mut(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Persist the current history through the session's store.
    pub fn save(&mut self) -> Result<()> {
        self.store.save(self.history.entries())
    }
}
