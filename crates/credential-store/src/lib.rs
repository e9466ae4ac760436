//! Credential persistence for the ProBem client.
//!
//! This crate owns the durable side of the authenticated session: exactly
//! three keys (access token, refresh token, serialized user) behind a
//! pluggable backend. The file backend stands in for the phone's key-value
//! store; the in-memory backend backs tests.

mod backend;
mod file;
mod keys;
mod store;
mod user;

pub use backend::{CredentialBackend, MemoryBackend};
pub use file::FileBackend;
pub use keys::StorageKeys;
pub use store::{AuthData, CredentialStore};
pub use user::{StoredUser, UserRole};

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Backend storage error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
