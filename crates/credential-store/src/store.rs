//! High-level API for the persisted session tuple.

use crate::{CredentialBackend, StorageError, StorageKeys, StorageResult, StoredUser};

/// The session tuple as loaded from durable storage. Missing keys load as
/// `None`; they never fail the load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthData {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<StoredUser>,
}

impl AuthData {
    /// True when enough of the tuple is present to restore a session.
    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Persistence facade for the three session keys.
pub struct CredentialStore {
    backend: Box<dyn CredentialBackend>,
}

impl CredentialStore {
    /// Create a store over the given backend.
    pub fn new(backend: Box<dyn CredentialBackend>) -> Self {
        Self { backend }
    }

    /// Persist the full session tuple.
    ///
    /// Callers treat this as all-or-nothing, but the keys are written one by
    /// one; a backend fault mid-way can leave a partial tuple. Known gap.
    pub fn save(
        &self,
        access_token: &str,
        refresh_token: &str,
        user: &StoredUser,
    ) -> StorageResult<()> {
        let user_json =
            serde_json::to_string(user).map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.backend.set(StorageKeys::ACCESS_TOKEN, access_token)?;
        self.backend.set(StorageKeys::REFRESH_TOKEN, refresh_token)?;
        self.backend.set(StorageKeys::USER, &user_json)?;
        Ok(())
    }

    /// Load the session tuple.
    ///
    /// Storage faults degrade to the empty tuple rather than propagating, so
    /// a fault is indistinguishable from "never logged in". Observed
    /// behavior, kept and logged.
    pub fn load(&self) -> AuthData {
        match self.try_load() {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load stored credentials, treating as signed out");
                AuthData::default()
            }
        }
    }

    fn try_load(&self) -> StorageResult<AuthData> {
        let access_token = self.backend.get(StorageKeys::ACCESS_TOKEN)?;
        let refresh_token = self.backend.get(StorageKeys::REFRESH_TOKEN)?;
        let user = match self.backend.get(StorageKeys::USER)? {
            Some(json) => Some(
                serde_json::from_str(&json).map_err(|e| StorageError::Encoding(e.to_string()))?,
            ),
            None => None,
        };

        Ok(AuthData {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Delete all three keys. Individual delete failures are ignored.
    pub fn clear(&self) -> StorageResult<()> {
        let _ = self.backend.delete(StorageKeys::ACCESS_TOKEN);
        let _ = self.backend.delete(StorageKeys::REFRESH_TOKEN);
        let _ = self.backend.delete(StorageKeys::USER);
        Ok(())
    }

    /// Read just the access token. Faults degrade to `None`.
    pub fn access_token(&self) -> Option<String> {
        match self.backend.get(StorageKeys::ACCESS_TOKEN) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read access token");
                None
            }
        }
    }

    /// Whether an access token is currently stored.
    pub fn has_session(&self) -> bool {
        self.access_token().is_some()
    }
}
