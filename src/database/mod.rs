//! ImageBrowser database layer.
//!
//! Provides SQLite connection management, schema migrations, and the sorted
//! result set that reports committed bookmark changes.
//!
//! # Usage
//!
//! ```no_run
//! use imagebrowser::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("bookmarks.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! ```

pub mod connection;
pub mod fetched_results;
pub mod migrations;

pub use connection::Database;
pub use fetched_results::{ChangeKind, FetchedResults, PersistenceChange};
