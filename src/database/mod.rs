//! PantryChef database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! key-value local storage used for recipe history.
//!
//! # Usage
//!
//! ```no_run
//! use pantrychef::database::{Database, KeyValueStore};
//!
//! let db = Database::open("pantrychef.db").expect("failed to open database");
//! db.set("greeting", "hello").expect("write failed");
//! assert_eq!(db.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

pub mod connection;
pub mod local_storage;
pub mod migrations;

pub use connection::Database;
pub use local_storage::{KeyValueStore, MemoryStore};
