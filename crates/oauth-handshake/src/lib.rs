//! OAuth2 deep-link handshake for the ProBem client.
//!
//! Bridges an external browser-based OAuth2 login back into the session
//! manager. The browser is opened on a fixed authorization URL with the
//! app's custom URI scheme registered as the redirect target; the operating
//! system later delivers the redirect URI back to the application, either
//! while it is running or on cold start. Both paths feed the same handler.

mod callback;
mod handshake;

pub use callback::{parse_callback, CallbackParse, HandshakeCredentials};
pub use handshake::{
    BrowserLauncher, BrowserResult, DeepLinkHandshake, HandshakeOutcome, HandshakeState,
    LOADING_FALLBACK_SECS,
};
