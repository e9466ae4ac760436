//! The session manager.

use crate::Session;
use credential_store::{CredentialStore, StorageResult, StoredUser};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Single source of truth for the authenticated session.
///
/// One instance exists per process, constructed at start-up and handed by
/// reference to everything that needs it. Every operation persists first and
/// only then publishes the new snapshot, so `user` and `access_token` always
/// come from the same call. Concurrent `sign_in`s are last-write-wins; the
/// operations are plain overwrites with no queuing.
pub struct SessionManager {
    store: Arc<CredentialStore>,
    tx: watch::Sender<Session>,
}

impl SessionManager {
    /// Create a manager over the given store. The session starts empty with
    /// `loading` set until [`initialize`](Self::initialize) runs.
    pub fn new(store: Arc<CredentialStore>) -> Self {
        let (tx, _rx) = watch::channel(Session {
            loading: true,
            ..Session::default()
        });
        Self { store, tx }
    }

    /// Hydrate the session from the credential store.
    ///
    /// Called once at process start. Clears `loading` whatever the outcome;
    /// storage faults already degrade to the empty tuple inside the store,
    /// so this never fails outward.
    pub fn initialize(&self) {
        let data = self.store.load();
        debug!(has_token = data.access_token.is_some(), has_user = data.user.is_some(), "Hydrating session from storage");

        self.tx.send_modify(|session| {
            if data.is_complete() {
                session.user = data.user.clone();
                session.access_token = data.access_token.clone();
            }
            session.loading = false;
        });

        if self.snapshot().signed() {
            info!("Restored signed-in session from storage");
        }
    }

    /// Persist and activate a new session.
    ///
    /// Safe to call repeatedly in quick succession (e.g. a deep-link login
    /// racing a manual one); whichever persistence write lands last wins.
    pub fn sign_in(
        &self,
        access_token: &str,
        refresh_token: &str,
        user: StoredUser,
    ) -> StorageResult<()> {
        self.store.save(access_token, refresh_token, &user)?;

        info!(user_id = user.id, "Signed in");
        self.tx.send_modify(|session| {
            session.user = Some(user);
            session.access_token = Some(access_token.to_string());
        });
        Ok(())
    }

    /// Clear the stored tuple and reset the in-memory session. Idempotent.
    pub fn sign_out(&self) -> StorageResult<()> {
        self.store.clear()?;

        info!("Signed out");
        self.tx.send_modify(|session| {
            session.user = None;
            session.access_token = None;
            session.volunteer_approved = false;
        });
        Ok(())
    }

    /// Replace the user object, keeping the current tokens.
    ///
    /// Tokens are re-read from the store rather than from memory; an absent
    /// token re-persists as empty, mirroring the source passing the raw
    /// stored value through.
    pub fn update_user(&self, user: StoredUser) -> StorageResult<()> {
        let data = self.store.load();
        if data.access_token.is_none() {
            warn!("update_user called without a stored access token");
        }
        self.store.save(
            data.access_token.as_deref().unwrap_or_default(),
            data.refresh_token.as_deref().unwrap_or_default(),
            &user,
        )?;

        self.tx.send_modify(|session| {
            session.user = Some(user);
        });
        Ok(())
    }

    /// Set the derived volunteer flag. In-memory only; collaborators
    /// recompute it on every relevant screen focus.
    pub fn set_volunteer_approved(&self, approved: bool) {
        self.tx.send_modify(|session| {
            session.volunteer_approved = approved;
        });
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Subscribe to session changes. Each operation publishes the new
    /// snapshot synchronously after its write completes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}
