//! In-memory session store with a defined lifecycle
//!
//! Sessions are created on first message and evicted after an idle TTL by a
//! background sweeper task.

pub mod store;

pub use store::{Session, SessionStore};
