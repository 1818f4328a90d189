use crate::error::{CalcError, Result};
use crate::operations::{self, Operation};
use std::collections::HashMap;

/// Summary of a registered operation, used for help and `ops` listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
}

/// Maps operation names to implementations.
///
/// Names are unique and matched case-insensitively. Registration order is
/// preserved for listings.
#[derive(Default)]
pub struct OperationRegistry {
    operations: Vec<Box<dyn Operation>>,
    by_name: HashMap<String, usize>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in operation.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for op in operations::builtins() {
            // Built-in names are distinct, a clash here is a programming error
            if let Err(e) = registry.register(op) {
                debug_assert!(false, "{}", e);
            }
        }
        registry
    }

    pub fn register<O: Operation + 'static>(&mut self, operation: O) -> Result<()> {
        let key = normalize(operation.name());
        if key.is_empty() {
            return Err(CalcError::InvalidInput(
                "Operation name cannot be empty".into(),
            ));
        }
        if self.by_name.contains_key(&key) {
            return Err(CalcError::DuplicateOperation(key));
        }
        self.by_name.insert(key, self.operations.len());
        self.operations.push(Box::new(operation));
        Ok(())
    }

    /// Look up an operation by registered name, falling back to its display
    /// name (so `Addition` resolves to `add`).
    pub fn resolve(&self, name: &str) -> Result<&dyn Operation> {
        let key = normalize(name);
        if let Some(&idx) = self.by_name.get(&key) {
            return Ok(self.operations[idx].as_ref());
        }
        self.operations
            .iter()
            .find(|op| normalize(op.display_name()) == key)
            .map(|op| op.as_ref())
            .ok_or_else(|| CalcError::UnknownOperation(name.trim().to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    pub fn operations(&self) -> Vec<OperationInfo> {
        self.operations
            .iter()
            .map(|op| OperationInfo {
                name: op.name().to_string(),
                display_name: op.display_name().to_string(),
                description: op.description().to_string(),
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
