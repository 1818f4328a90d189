use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CalcError, Result};
use crate::model::CalculationRecord;
use crate::operations;
use crate::session::Session;
use crate::store::DataStore;

pub fn save<S: DataStore>(session: &mut Session<S>) -> Result<CmdResult> {
    if let Err(e) = session.save() {
        tracing::error!("Failed to save history: {}", e);
        return Err(e);
    }
    let count = session.history().len();
    tracing::info!(
        entries = count,
        path = %session.store().location(),
        "History saved"
    );
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("History saved successfully."));
    Ok(result)
}

/// Replace the in-memory history with what the store holds.
///
/// Every stored record must name a registered operation. Its result is
/// recomputed at the current precision; a stored result that differs is
/// replaced and reported as a warning.
///
/// This is not a commit: subscribers are not notified and the undo/redo
/// stacks are reset.
pub fn load<S: DataStore>(session: &mut Session<S>) -> Result<CmdResult> {
    let loaded = session.store().load().and_then(|stored| revalidate(session, stored));
    let (records, recomputed) = match loaded {
        Ok(checked) => checked,
        Err(e) => {
            tracing::error!("Failed to load history: {}", e);
            return Err(e);
        }
    };
    session.replace_history(records);

    let count = session.history().len();
    tracing::info!(
        entries = count,
        path = %session.store().location(),
        "Loaded {} calculations from history",
        count
    );
    let mut result = CmdResult::default();
    if recomputed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} stored result(s) did not match their operation and were recomputed.",
            recomputed
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "History loaded successfully ({} calculations).",
        count
    )));
    Ok(result.with_listed_records(session.history().entries().to_vec()))
}

/// Resolve each record's operation and recompute its result. Returns the
/// checked records and how many of them had a different stored result.
fn revalidate<S: DataStore>(
    session: &Session<S>,
    stored: Vec<CalculationRecord>,
) -> Result<(Vec<CalculationRecord>, usize)> {
    let precision = session.config().precision;
    let mut records = Vec::with_capacity(stored.len());
    let mut recomputed = 0;

    for record in stored {
        let operation = session
            .registry()
            .resolve(record.operation())
            .map_err(|_| {
                CalcError::Persistence(format!(
                    "Unknown operation in history: {}",
                    record.operation()
                ))
            })?;
        let (a, b) = (record.operand_a(), record.operand_b());
        let computed = operations::apply(operation, a, b, precision).map_err(|e| {
            CalcError::Persistence(format!("Invalid calculation data for {}: {}", record, e))
        })?;

        if computed == record.result() {
            records.push(record);
            continue;
        }
        tracing::warn!(
            operation = record.operation(),
            "Loaded result {} differs from computed result {}",
            record.result(),
            computed
        );
        recomputed += 1;
        records.push(CalculationRecord::with_timestamp(
            record.operation(),
            a,
            b,
            computed,
            record.timestamp(),
        ));
    }

    Ok((records, recomputed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{evaluate, undo, MessageLevel};
    use crate::config::CalcConfig;
    use crate::store::memory::InMemoryStore;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn save_writes_current_entries() {
        let store = InMemoryStore::new();
        let mut session = Session::new(CalcConfig::new("."), store.clone());
        evaluate::run(&mut session, "add", 5.0, 3.0).unwrap();

        save(&mut session).unwrap();
        assert_eq!(store.records(), session.history().entries());
    }

    #[test]
    fn save_failure_is_persistence_error() {
        let fixture = StoreFixture::new().failing();
        let mut session = Session::new(CalcConfig::new("."), fixture.store.clone());
        assert!(matches!(
            save(&mut session),
            Err(CalcError::Persistence(_))
        ));
    }

    #[test]
    fn load_replaces_history_and_resets_undo() {
        let fixture = StoreFixture::new().with_additions(3);
        let mut session = Session::new(CalcConfig::new("."), fixture.store.clone());
        evaluate::run(&mut session, "multiply", 7.0, 6.0).unwrap();

        let result = load(&mut session).unwrap();
        assert_eq!(result.listed_records.len(), 3);
        assert_eq!(session.history().entries()[2].result(), 6.0);
        assert!(matches!(
            undo::undo(&mut session),
            Err(CalcError::NothingToUndo)
        ));
    }

    #[test]
    fn load_truncates_to_max_history_size() {
        let fixture = StoreFixture::new().with_additions(5);
        let mut config = CalcConfig::new(".");
        config.max_history_size = 2;
        let mut session = Session::new(config, fixture.store.clone());

        load(&mut session).unwrap();
        let values: Vec<f64> = session.history().entries().iter().map(|r| r.result()).collect();
        assert_eq!(values, vec![8.0, 10.0]);
    }

    #[test]
    fn load_rejects_unknown_operations() {
        let store = InMemoryStore::with_records(vec![
            CalculationRecord::new("Addition", 1.0, 1.0, 2.0),
            CalculationRecord::new("NoSuchOp", 1.0, 2.0, 999.0),
        ]);
        let mut session = Session::new(CalcConfig::new("."), store);
        evaluate::run(&mut session, "add", 5.0, 3.0).unwrap();

        let err = load(&mut session).unwrap_err();
        assert!(matches!(err, CalcError::Persistence(ref m) if m.contains("NoSuchOp")));
        // The current history is left alone
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().entries()[0].result(), 8.0);
    }

    #[test]
    fn load_recomputes_mismatched_results() {
        let store = InMemoryStore::with_records(vec![
            CalculationRecord::new("Addition", 2.0, 3.0, 42.0),
            CalculationRecord::new("Multiplication", 2.0, 3.0, 6.0),
        ]);
        let mut session = Session::new(CalcConfig::new("."), store);

        let result = load(&mut session).unwrap();
        let values: Vec<f64> = session.history().entries().iter().map(|r| r.result()).collect();
        assert_eq!(values, vec![5.0, 6.0]);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.starts_with("1 stored")));
    }

    #[test]
    fn load_rejects_records_the_operation_cannot_compute() {
        let store =
            InMemoryStore::with_records(vec![CalculationRecord::new("Division", 1.0, 0.0, 0.0)]);
        let mut session = Session::new(CalcConfig::new("."), store);

        assert!(matches!(
            load(&mut session),
            Err(CalcError::Persistence(ref m)) if m.contains("Division(1, 0)")
        ));
    }
}
