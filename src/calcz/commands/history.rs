use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::DataStore;
use crate::undo::Mutation;

pub fn list<S: DataStore>(session: &Session<S>) -> Result<CmdResult> {
    let records = session.history().entries().to_vec();
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No calculations yet."));
    }
    Ok(result.with_listed_records(records))
}

/// Clear the history as a single undoable commit.
pub fn clear<S: DataStore>(session: &mut Session<S>) -> Result<CmdResult> {
    let cleared = session.history().entries().to_vec();
    let notified = session.commit(Mutation::Clear);

    let mut result = CmdResult::default().with_affected_records(cleared);
    result.add_message(CmdMessage::success("History cleared."));
    Ok(result.with_notify_outcome(notified))
}
