use super::DataStore;
use crate::error::{CalcError, Result};
use crate::model::CalculationRecord;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Clones share state, so the same store can back both the API and an
/// autosave observer.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: Rc<RefCell<Vec<CalculationRecord>>>,
    saves: Rc<Cell<usize>>,
    fail_saves: Rc<Cell<bool>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CalculationRecord>) -> Self {
        let store = Self::new();
        *store.records.borrow_mut() = records;
        store
    }

    /// Make every subsequent `save` fail with a persistence error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn records(&self) -> Vec<CalculationRecord> {
        self.records.borrow().clone()
    }
}

impl DataStore for InMemoryStore {
    fn save(&mut self, entries: &[CalculationRecord]) -> Result<()> {
        if self.fail_saves.get() {
            return Err(CalcError::Persistence("in-memory store rejected save".into()));
        }
        *self.records.borrow_mut() = entries.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<Vec<CalculationRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Persist `count` additions `i + i = 2i`, oldest first.
        pub fn with_additions(self, count: usize) -> Self {
            let mut records = self.store.records();
            for i in 1..=count {
                let n = i as f64;
                records.push(CalculationRecord::new("Addition", n, n, n + n));
            }
            *self.store.records.borrow_mut() = records;
            self
        }

        pub fn failing(self) -> Self {
            self.store.set_fail_saves(true);
            self
        }
    }
}
