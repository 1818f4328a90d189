//! # Calcz Architecture
//!
//! Calcz is a **UI-agnostic calculator engine** with a bounded, undoable,
//! observable and persistent history. The REPL in `main.rs` is one client
//! of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the REPL, formats output          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Wires the logging and autosave observers                 │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Evaluate, undo/redo, history, persistence                │
//! │  - Operates on a `Session`, returns `CmdResult`             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (session, registry, history, undo, notify)          │
//! │  - Operation lookup, bounded history, snapshot undo/redo    │
//! │  - Change notification to subscribers                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - CsvStore (production), InMemoryStore (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit Model
//!
//! Every forward change to history (a new calculation, a clear) goes
//! through [`session::Session::commit`]: snapshot for undo, mutate, drop
//! the redo stack, notify subscribers once. Subscriber failures never roll
//! the change back; they come back to the caller as an
//! [`error::ObserverError`] attached to the command result.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! Diagnostics go through `tracing`; the binary decides where they land
//! (see [`logging`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Logic for each command
//! - [`operations`]: The `Operation` trait and the built-in set
//! - [`registry`]: Name to operation lookup
//! - [`history`]: Bounded record list and snapshots
//! - [`undo`]: Snapshot-based undo/redo
//! - [`notify`]: Subscriber registry and change events
//! - [`observers`]: Logging and autosave subscribers
//! - [`session`]: The state one process operates on
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `CalculationRecord` and result rounding
//! - [`validate`]: Operand parsing and range checks
//! - [`config`]: Configuration management
//! - [`logging`]: Log file setup
//! - [`error`]: Error types
//! - `cli`: Argument parsing, the REPL loop and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod model;
pub mod notify;
pub mod observers;
pub mod operations;
pub mod registry;
pub mod session;
pub mod store;
pub mod undo;
pub mod validate;
