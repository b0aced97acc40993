//! SQLite persistence split across logical submodules.

mod connection;
mod store;
mod students;

pub use store::SqliteStore;
