//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for calculator operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Wires** the session: built-in operations, the logging observer and,
//!   when `auto_save` is on, the autosave observer
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O to the terminal**: No stdout, stderr, or formatting
//!
//! ## Generic Over DataStore
//!
//! `CalcApi<S: DataStore>` is generic over the persistence backend:
//! - Production: `CalcApi<CsvStore>`
//! - Testing: `CalcApi<InMemoryStore>`
//!
//! The store is cloned once for the autosave observer, so `S` must be
//! `Clone`; both shipped stores are cheap handles.

use crate::commands;
use crate::config::CalcConfig;
use crate::error::Result;
use crate::model::CalculationRecord;
use crate::notify::{Observer, SubscriberId};
use crate::observers::{AutoSaveObserver, LoggingObserver};
use crate::operations::Operation;
use crate::session::Session;
use crate::store::DataStore;

pub struct CalcApi<S: DataStore> {
    session: Session<S>,
}

impl<S: DataStore + Clone + 'static> CalcApi<S> {
    pub fn new(config: CalcConfig, store: S) -> Self {
        let auto_save = config.auto_save;
        let mut session = Session::new(config, store.clone());
        session.notifier_mut().subscribe(LoggingObserver::new());
        if auto_save {
            session
                .notifier_mut()
                .subscribe(AutoSaveObserver::new(store));
        }
        Self { session }
    }

    /// Load persisted history at startup. Never fails: on a persistence
    /// error the engine keeps an empty history and reports a warning. A
    /// successful restore only reports warnings, such as recomputed results.
    pub fn restore_on_startup(&mut self) -> commands::CmdResult {
        match commands::persist::load(&mut self.session) {
            Ok(mut result) => {
                result
                    .messages
                    .retain(|m| m.level == commands::MessageLevel::Warning);
                result
            }
            Err(e) => {
                tracing::warn!("Could not load existing history: {}", e);
                let mut result = commands::CmdResult::default();
                result.add_message(commands::CmdMessage::warning(format!(
                    "Could not load existing history: {}",
                    e
                )));
                result
            }
        }
    }

    pub fn evaluate(&mut self, op_name: &str, a: f64, b: f64) -> Result<commands::CmdResult> {
        commands::evaluate::run(&mut self.session, op_name, a, b)
    }

    pub fn evaluate_input(
        &mut self,
        op_name: &str,
        a: &str,
        b: &str,
    ) -> Result<commands::CmdResult> {
        commands::evaluate::run_input(&mut self.session, op_name, a, b)
    }

    pub fn undo(&mut self) -> Result<commands::CmdResult> {
        commands::undo::undo(&mut self.session)
    }

    pub fn redo(&mut self) -> Result<commands::CmdResult> {
        commands::undo::redo(&mut self.session)
    }

    pub fn get_history(&self) -> Result<commands::CmdResult> {
        commands::history::list(&self.session)
    }

    pub fn clear_history(&mut self) -> Result<commands::CmdResult> {
        commands::history::clear(&mut self.session)
    }

    pub fn save_history(&mut self) -> Result<commands::CmdResult> {
        commands::persist::save(&mut self.session)
    }

    pub fn load_history(&mut self) -> Result<commands::CmdResult> {
        commands::persist::load(&mut self.session)
    }

    pub fn operations(&self) -> Result<commands::CmdResult> {
        commands::ops::run(&self.session)
    }

    pub fn register_operation<O: Operation + 'static>(&mut self, operation: O) -> Result<()> {
        self.session.registry_mut().register(operation)
    }

    pub fn is_operation(&self, name: &str) -> bool {
        self.session.registry().contains(name)
    }

    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) -> SubscriberId {
        self.session.notifier_mut().subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.session.notifier_mut().unsubscribe(id);
    }

    pub fn entries(&self) -> &[CalculationRecord] {
        self.session.history().entries()
    }

    pub fn config(&self) -> &CalcConfig {
        self.session.config()
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::registry::OperationInfo;
