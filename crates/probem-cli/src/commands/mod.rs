//! Command implementations.

pub mod account;
pub mod google;
pub mod login;
pub mod logout;
pub mod status;

use std::sync::Arc;

use api_gateway::ApiClient;
use app_core::Config;
use credential_store::CredentialStore;
use session_engine::SessionManager;
use tracing::warn;

/// Everything a command needs, built once in `main`.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<CredentialStore>,
    pub session: Arc<SessionManager>,
    pub client: ApiClient,
}

/// Recompute the volunteer flag from the backend.
///
/// The flag is never persisted; signed-in commands refresh it on entry, the
/// way the app recomputes it on screen focus. Failures only log: the flag
/// then stays at its last value.
pub(crate) async fn refresh_volunteer_flag(ctx: &AppContext) {
    let Some(user) = ctx.session.snapshot().user else {
        return;
    };
    match ctx.client.volunteer_status(user.id).await {
        Ok(status) => ctx.session.set_volunteer_approved(status.is_volunteer),
        Err(err) => warn!(error = %err, "Could not refresh volunteer status"),
    }
}
