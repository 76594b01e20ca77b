//! Session storage module.
//!
//! Provides Redis-backed storage for auth token sessions.

mod auth_session;

pub use auth_session::{AuthSessionData, AuthSessionStore};
