//! The persisted user object.

use serde::{Deserialize, Serialize};

/// Role reported by the backend for the authenticated user.
///
/// The server sends a plain string; anything beyond the two roles this
/// client reasons about is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    #[default]
    Unset,
    User,
    Volunteer,
    Other(String),
}

impl From<String> for UserRole {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "" => UserRole::Unset,
            "USER" => UserRole::User,
            "VOLUNTEER" => UserRole::Volunteer,
            _ => UserRole::Other(raw),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Unset => String::new(),
            UserRole::User => "USER".to_string(),
            UserRole::Volunteer => "VOLUNTEER".to_string(),
            UserRole::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Unset => write!(f, "unset"),
            UserRole::User => write!(f, "USER"),
            UserRole::Volunteer => write!(f, "VOLUNTEER"),
            UserRole::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// The authenticated user as mirrored to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}
