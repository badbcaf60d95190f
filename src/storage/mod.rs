//! Storage backends for charts
//!
//! Charts are persisted through the `ChartStore` trait. `JsonFileStore`
//! keeps the flat `users.json` layout, `SqliteStore` is the database
//! option, and `MemoryStore` backs tests.

mod json;
mod memory;
mod sqlite;
mod traits;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ChartStore, StorageError, StorageResult};
