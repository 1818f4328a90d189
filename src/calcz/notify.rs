//! # Change Notification
//!
//! [`ChangeNotifier`] is a synchronous observer registry. The session calls
//! [`ChangeNotifier::notify`] exactly once per committed mutation (append or
//! clear), never for undo or redo.
//!
//! Notification is fail-open: every subscriber runs even if an earlier one
//! fails, and the failures are reported together afterwards as an
//! [`ObserverError`].

use crate::error::{ObserverError, ObserverFailure, Result};
use crate::model::CalculationRecord;

/// The committed change that triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change<'a> {
    Appended(&'a CalculationRecord),
    Cleared,
}

/// What observers receive: the change plus a read-only view of the history
/// after it was applied.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub change: Change<'a>,
    pub entries: &'a [CalculationRecord],
}

impl<'a> ChangeEvent<'a> {
    pub fn appended(record: &'a CalculationRecord, entries: &'a [CalculationRecord]) -> Self {
        Self {
            change: Change::Appended(record),
            entries,
        }
    }

    pub fn cleared(entries: &'a [CalculationRecord]) -> Self {
        Self {
            change: Change::Cleared,
            entries,
        }
    }

    pub fn record(&self) -> Option<&'a CalculationRecord> {
        match self.change {
            Change::Appended(record) => Some(record),
            Change::Cleared => None,
        }
    }
}

pub trait Observer {
    /// Used to identify this subscriber in an [`ObserverError`].
    fn name(&self) -> &str;

    fn on_change(&mut self, event: &ChangeEvent<'_>) -> Result<()>;
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F> {
    name: String,
    func: F,
}

impl<F> FnObserver<F>
where
    F: FnMut(&ChangeEvent<'_>) -> Result<()>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Observer for FnObserver<F>
where
    F: FnMut(&ChangeEvent<'_>) -> Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_change(&mut self, event: &ChangeEvent<'_>) -> Result<()> {
        (self.func)(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<(SubscriberId, Box<dyn Observer>)>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(observer)));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored; returns whether
    /// anything was removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber in subscription order.
    pub fn notify(&mut self, event: &ChangeEvent<'_>) -> std::result::Result<(), ObserverError> {
        let mut failures = Vec::new();
        for (_, observer) in self.subscribers.iter_mut() {
            if let Err(e) = observer.on_change(event) {
                failures.push(ObserverFailure {
                    subscriber: observer.name().to_string(),
                    message: e.to_string(),
                });
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ObserverError { failures })
        }
    }

    pub fn subscriber_names(&self) -> Vec<&str> {
        self.subscribers.iter().map(|(_, o)| o.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
