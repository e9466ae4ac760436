//! Session management for the ProBem client.
//!
//! The [`SessionManager`] is the single source of truth for "who is logged
//! in". It mediates between the credential store and the rest of the
//! application, and publishes every state change as a [`Session`] snapshot
//! that consumers subscribe to.

mod manager;
mod session;

pub use manager::SessionManager;
pub use session::Session;
