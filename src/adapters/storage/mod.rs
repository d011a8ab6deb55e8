//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Per-user sessions in memory for the process lifetime
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionStore;
//!
//! let store = InMemorySessionStore::with_history_capacity(5);
//! let handle = store.session(&user_id).await;
//! ```

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
