//! The deep-link handshake driver.

use crate::{parse_callback, CallbackParse};
use credential_store::StoredUser;
use session_engine::SessionManager;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// How long the initiating screen keeps its own loading indicator up after
/// the browser is dismissed without a redirect, in seconds. A heuristic,
/// not a cancellation of the handshake.
pub const LOADING_FALLBACK_SECS: u64 = 3;

/// How the external browser session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserResult {
    /// The redirect fired; the callback URI arrives through the deep-link
    /// channel.
    Redirected,
    /// The browser closed itself (common when the deep link worked).
    Dismissed,
    /// The user closed the browser without completing the login.
    Cancelled,
}

/// Capability to open and dismiss the external browser session.
///
/// Injected so the handshake can be driven in tests without a real browser.
pub trait BrowserLauncher: Send + Sync {
    /// Open the authorization URL. The returned channel resolves when the
    /// browser session ends.
    fn open(&self, auth_url: &str, redirect_uri: &str) -> oneshot::Receiver<BrowserResult>;

    /// Dismiss any lingering browser UI.
    fn dismiss(&self);
}

/// Handshake lifecycle as visible to the initiating screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Idle,
    BrowserOpened,
}

/// What one incoming URI did to the handshake.
#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeOutcome {
    /// URI was not an OAuth2 callback; nothing happened.
    Ignored,
    /// Callback was missing required fields; dropped without surfacing an
    /// error, since the same handler also sees unrelated deep links.
    Rejected { missing: Vec<&'static str> },
    /// Valid callback: browser dismissed, session signed in.
    SignedIn(StoredUser),
}

/// Bridges the external OAuth2 login back into the [`SessionManager`].
///
/// Incoming URIs reach [`handle_uri`](Self::handle_uri) on both code paths —
/// a URL event while the app runs, or the initial URL on cold start — with
/// identical parsing. Receiving the same callback twice is safe: `sign_in`
/// overwrites with the same values.
pub struct DeepLinkHandshake {
    launcher: Arc<dyn BrowserLauncher>,
    session: Arc<SessionManager>,
    scheme: String,
    state: Mutex<HandshakeState>,
}

impl DeepLinkHandshake {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        session: Arc<SessionManager>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            launcher,
            session,
            scheme: scheme.into(),
            state: Mutex::new(HandshakeState::Idle),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandshakeState {
        *self.state.lock().unwrap()
    }

    /// Open the external browser on the authorization URL.
    ///
    /// Starting a second browser session while one is pending is not guarded
    /// against; the new one simply replaces the pending state and whichever
    /// callback arrives wins. Known gap.
    pub fn begin(&self, auth_url: &str, redirect_uri: &str) -> oneshot::Receiver<BrowserResult> {
        let mut state = self.state.lock().unwrap();
        if *state == HandshakeState::BrowserOpened {
            warn!("Starting a browser session while another is pending");
        }
        *state = HandshakeState::BrowserOpened;
        drop(state);

        info!(url = %auth_url, "Opening external browser for OAuth2 login");
        self.launcher.open(auth_url, redirect_uri)
    }

    /// Return to idle without a callback, e.g. after the user cancelled the
    /// browser.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = HandshakeState::Idle;
    }

    /// Feed one incoming deep-link URI through the handshake.
    ///
    /// On a valid callback the browser is dismissed *before* `sign_in`, so
    /// the browser UI is gone before the session change is observable.
    pub fn handle_uri(&self, uri: &str) -> HandshakeOutcome {
        match parse_callback(uri, &self.scheme) {
            CallbackParse::Unrelated => {
                debug!(uri = %uri, "Ignoring deep link unrelated to OAuth2 callback");
                HandshakeOutcome::Ignored
            }
            CallbackParse::Rejected { missing } => {
                warn!(?missing, "OAuth2 callback missing required fields, dropping");
                HandshakeOutcome::Rejected { missing }
            }
            CallbackParse::Valid(creds) => {
                self.launcher.dismiss();

                if let Err(e) = self.session.sign_in(
                    &creds.access_token,
                    &creds.refresh_token,
                    creds.user.clone(),
                ) {
                    warn!(error = %e, "Failed to persist session from OAuth2 callback");
                    return HandshakeOutcome::Rejected { missing: vec![] };
                }

                *self.state.lock().unwrap() = HandshakeState::Idle;
                info!(user_id = creds.user.id, "OAuth2 handshake complete");
                HandshakeOutcome::SignedIn(creds.user)
            }
        }
    }

    /// Process the URL the app was launched with, if any. Cold start and
    /// warm redirect go through the same handler.
    pub fn handle_initial_uri(&self, uri: Option<&str>) -> HandshakeOutcome {
        match uri {
            Some(uri) => self.handle_uri(uri),
            None => HandshakeOutcome::Ignored,
        }
    }

    /// Drive the handshake from a stream of incoming URIs until the source
    /// closes. Dropping the sender tears the subscription down.
    pub async fn run(&self, mut uris: mpsc::Receiver<String>) {
        while let Some(uri) = uris.recv().await {
            self.handle_uri(&uri);
        }
        debug!("Deep-link source closed, handshake listener stopping");
    }
}
