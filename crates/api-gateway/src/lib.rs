//! Authenticated HTTP gateway for the ProBem backend.
//!
//! One configured client used by every feature area. Before each outbound
//! request the current access token is read from the credential store (not
//! from the in-memory session, which may not be initialized yet) and
//! attached as a bearer credential. Failed responses are classified once,
//! uniformly, at this boundary; callers always observe the failure.

mod auth;
mod client;
mod error;
mod validate;
mod volunteer;

pub use auth::{LoginResponse, VerifyEmailResponse};
pub use client::{ApiClient, REQUEST_TIMEOUT_SECS};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use validate::{is_valid_email, validate_email, validate_password, MIN_PASSWORD_LEN};
pub use volunteer::VolunteerStatus;
