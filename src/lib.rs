//! Core library surface for the student registry TUI.
//!
//! The binary only glues these pieces together: settings and logging, the
//! SQLite-backed store, the controller that validates form input, and the
//! Ratatui front-end.
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod store;
pub mod ui;

pub use config::Settings;
pub use controller::{average, Controller};
pub use db::SqliteStore;
pub use error::{RegistryError, StoreError, ValidationError};
pub use lookup::{LookupState, StudentLookup};
pub use models::Student;
pub use store::{MemoryStore, StudentStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
