//! Snapshot-based undo/redo.
//!
//! Every commit pushes the pre-mutation snapshot onto the undo stack and
//! drops all pending redo snapshots. History is linear: there is no
//! branching, a commit after an undo discards the undone future.
//!
//! The undo stack is unbounded unless a depth limit is set, in which case
//! the oldest snapshot is dropped once the limit is exceeded. The redo
//! stack never outgrows the undo stack it was filled from.

use crate::error::{CalcError, Result};
use crate::history::{History, Snapshot};
use crate::model::CalculationRecord;

/// A history mutation eligible for undo.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Append(CalculationRecord),
    Clear,
}

#[derive(Debug, Default)]
pub struct UndoRedoManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    depth_limit: Option<usize>,
}

impl UndoRedoManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager keeping at most `limit` undo snapshots, or all of them
    /// when `limit` is `None`.
    pub fn with_depth_limit(limit: Option<usize>) -> Self {
        Self {
            depth_limit: limit,
            ..Self::default()
        }
    }

    /// Apply `mutation` to `history`, recording the prior state for undo.
    pub fn commit(&mut self, history: &mut History, mutation: Mutation) {
        self.push_undo(history.snapshot());
        match mutation {
            Mutation::Append(record) => history.append(record),
            Mutation::Clear => history.clear(),
        }
        self.redo_stack.clear();
    }

    pub fn undo(&mut self, history: &mut History) -> Result<()> {
        let previous = self.undo_stack.pop().ok_or(CalcError::NothingToUndo)?;
        self.redo_stack.push(history.snapshot());
        history.restore(previous);
        Ok(())
    }

    pub fn redo(&mut self, history: &mut History) -> Result<()> {
        let next = self.redo_stack.pop().ok_or(CalcError::NothingToRedo)?;
        self.push_undo(history.snapshot());
        history.restore(next);
        Ok(())
    }

    /// Drop both stacks, e.g. after the history was replaced wholesale.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if let Some(limit) = self.depth_limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
    }
}
