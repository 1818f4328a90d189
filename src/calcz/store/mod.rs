//! # Storage Layer
//!
//! This module defines the persistence port for calculation history. The
//! [`DataStore`] trait lets the engine work with different backends.
//!
//! ## Implementations
//!
//! - [`fs::CsvStore`]: Production file-based storage
//!   - One CSV file, one row per record
//!   - Header: `operation,operand1,operand2,result,timestamp`
//!   - Columns are matched by header name, so reordered files still load
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Clones share the same records, so a test can hand one clone to the
//!     autosave observer and inspect another
//!
//! ## Storage Format
//!
//! For `CsvStore`:
//! ```text
//! history/
//! └── calculator_history.csv
//!
//! operation,operand1,operand2,result,timestamp
//! Addition,5,3,8,2025-10-06T14:03:11+00:00
//! Power,2,4,16,2025-10-06T14:03:20+00:00
//! ```
//!
//! Persistence calls block on the calling thread.

use crate::error::Result;
use crate::model::CalculationRecord;

pub mod fs;
pub mod memory;

/// Abstract interface for history persistence.
pub trait DataStore {
    /// Overwrite the persisted history with `entries`.
    fn save(&mut self, entries: &[CalculationRecord]) -> Result<()>;

    /// Read the persisted history, oldest first. A store that has never
    /// been written loads as empty.
    fn load(&self) -> Result<Vec<CalculationRecord>>;

    /// Where the data lives, for log and user messages.
    fn location(&self) -> String;
}
