use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::DataStore;

/// Restore the history to the state before the last commit.
///
/// Restores are not re-notified, so autosave does not run here.
pub fn undo<S: DataStore>(session: &mut Session<S>) -> Result<CmdResult> {
    session.undo()?;
    tracing::info!(entries = session.history().len(), "Undo performed");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Operation undone."));
    Ok(result)
}

pub fn redo<S: DataStore>(session: &mut Session<S>) -> Result<CmdResult> {
    session.redo()?;
    tracing::info!(entries = session.history().len(), "Redo performed");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Operation redone."));
    Ok(result)
}
