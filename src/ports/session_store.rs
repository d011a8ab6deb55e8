//! Session Store Port - Interface for per-user conversation sessions.
//!
//! Sessions live for the process lifetime. Each one sits behind its own
//! async mutex so a user's events are handled one at a time while other
//! users proceed in parallel.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::UserId;
use crate::domain::prompt::Session;

/// Shared, lockable handle to one user's session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port for looking up sessions by user
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user's session, creating it in `MainMenu` on first contact.
    async fn session(&self, user_id: &UserId) -> SessionHandle;
}
