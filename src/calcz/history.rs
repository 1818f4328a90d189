use crate::model::CalculationRecord;

/// Deep copy of the history sequence at one point in time.
///
/// Snapshots never share storage with the live [`History`], so later
/// mutation of the history cannot alter a stored snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    records: Vec<CalculationRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ordered, size-bounded calculation history (most recent last).
///
/// `len() <= max_size` always holds; appending past the bound evicts the
/// oldest record first.
#[derive(Debug, Clone)]
pub struct History {
    records: Vec<CalculationRecord>,
    max_size: usize,
}

impl History {
    /// `max_size` is clamped to at least 1.
    pub fn new(max_size: usize) -> Self {
        Self {
            records: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Build a history from persisted records, keeping only the most recent
    /// `max_size` of them.
    pub fn from_records(records: Vec<CalculationRecord>, max_size: usize) -> Self {
        let mut history = Self::new(max_size);
        history.replace(records);
        history
    }

    pub fn append(&mut self, record: CalculationRecord) {
        if self.records.len() >= self.max_size {
            let overflow = self.records.len() + 1 - self.max_size;
            self.records.drain(..overflow);
        }
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.records = snapshot.records;
    }

    /// Replace all entries, applying the size bound.
    pub fn replace(&mut self, records: Vec<CalculationRecord>) {
        let skip = records.len().saturating_sub(self.max_size);
        self.records = records.into_iter().skip(skip).collect();
    }

    pub fn entries(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&CalculationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32) -> CalculationRecord {
        CalculationRecord::new("Addition", n as f64, 0.0, n as f64)
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut history = History::new(10);
        history.append(record(1));
        history.append(record(2));

        let results: Vec<f64> = history.entries().iter().map(|r| r.result()).collect();
        assert_eq!(results, vec![1.0, 2.0]);
        assert_eq!(history.last().unwrap().result(), 2.0);
    }

    #[test]
    fn append_evicts_oldest_past_the_bound() {
        let mut history = History::new(3);
        for n in 1..=7 {
            history.append(record(n));
        }

        assert_eq!(history.len(), 3);
        let results: Vec<f64> = history.entries().iter().map(|r| r.result()).collect();
        assert_eq!(results, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn snapshot_is_not_aliased() {
        let mut history = History::new(10);
        history.append(record(1));
        let snap = history.snapshot();

        history.append(record(2));
        history.clear();

        assert_eq!(snap.len(), 1);
        history.restore(snap);
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].result(), 1.0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut history = History::new(10);
        history.append(record(1));
        history.append(record(2));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn from_records_keeps_most_recent() {
        let records = (1..=5).map(record).collect();
        let history = History::from_records(records, 2);
        let results: Vec<f64> = history.entries().iter().map(|r| r.result()).collect();
        assert_eq!(results, vec![4.0, 5.0]);
    }

    #[test]
    fn zero_bound_is_clamped() {
        let mut history = History::new(0);
        history.append(record(1));
        history.append(record(2));
        assert_eq!(history.max_size(), 1);
        assert_eq!(history.len(), 1);
    }
}
