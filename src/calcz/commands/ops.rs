use crate::commands::CmdResult;
use crate::error::Result;
use crate::session::Session;
use crate::store::DataStore;

/// List registered operations in registration order.
pub fn run<S: DataStore>(session: &Session<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_operations(session.registry().operations()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalcConfig;
    use crate::error::Result;
    use crate::operations::Operation;
    use crate::store::memory::InMemoryStore;

    struct Average;

    impl Operation for Average {
        fn name(&self) -> &str {
            "avg"
        }

        fn display_name(&self) -> &str {
            "Average"
        }

        fn description(&self) -> &str {
            "Mean of a and b"
        }

        fn execute(&self, a: f64, b: f64) -> Result<f64> {
            Ok((a + b) / 2.0)
        }
    }

    #[test]
    fn newly_registered_operations_are_listed() {
        let mut session = Session::new(CalcConfig::new("."), InMemoryStore::new());
        session.registry_mut().register(Average).unwrap();

        let result = run(&session).unwrap();
        let last = result.operations.last().unwrap();
        assert_eq!(last.name, "avg");
        assert_eq!(last.description, "Mean of a and b");
        assert!(result.operations.iter().any(|o| o.name == "add"));
    }
}
