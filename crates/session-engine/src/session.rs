//! The in-memory session snapshot.

use credential_store::StoredUser;

/// Snapshot of the authenticated session.
///
/// `user` and `access_token` are always set or cleared together; observers
/// never see one without the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// The authenticated user, if any.
    pub user: Option<StoredUser>,
    /// Bearer credential for authenticated calls.
    pub access_token: Option<String>,
    /// True only while the initial hydration from storage is in progress.
    pub loading: bool,
    /// Derived volunteer flag, recomputed by collaborators. Not persisted.
    pub volunteer_approved: bool,
}

impl Session {
    /// Whether a user is signed in.
    pub fn signed(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credential_store::UserRole;

    #[test]
    fn test_signed_requires_both_fields() {
        let mut session = Session::default();
        assert!(!session.signed());

        session.access_token = Some("tAAA".to_string());
        assert!(!session.signed());

        session.user = Some(StoredUser {
            id: 1,
            nome: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            role: UserRole::User,
        });
        assert!(session.signed());

        session.access_token = None;
        assert!(!session.signed());
    }
}
