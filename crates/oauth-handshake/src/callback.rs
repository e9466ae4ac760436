//! Callback URI parsing.

use credential_store::{StoredUser, UserRole};
use std::collections::HashMap;
use url::Url;

/// Credentials assembled from a valid callback URI.
#[derive(Debug, Clone, PartialEq)]
pub struct HandshakeCredentials {
    pub access_token: String,
    pub refresh_token: String,
    pub user: StoredUser,
}

/// Outcome of inspecting one incoming URI.
///
/// The same handler observes every deep link the OS delivers, so a URI that
/// is not the OAuth2 callback is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackParse {
    /// Not an OAuth2 callback for our scheme; ignore without parsing.
    Unrelated,
    /// Callback URI missing required fields; dropped, log only.
    Rejected { missing: Vec<&'static str> },
    /// Valid callback payload.
    Valid(HandshakeCredentials),
}

/// Parse a deep-link URI as an OAuth2 callback.
///
/// The callback carries `token`, `refreshToken`, `email`, `role`, `id` and
/// `nome` in the query string, percent-encoded. `token`, `refreshToken` and
/// `email` must all be non-empty; `id` is a decimal integer (0 when absent
/// or malformed, it is not in the required set); `nome` falls back to the
/// local part of the e-mail.
pub fn parse_callback(uri: &str, scheme: &str) -> CallbackParse {
    let Ok(url) = Url::parse(uri) else {
        return CallbackParse::Unrelated;
    };

    // <scheme>://oauth2/callback — anything else is some other deep link.
    if url.scheme() != scheme || url.host_str() != Some("oauth2") || url.path() != "/callback" {
        return CallbackParse::Unrelated;
    }

    let params: HashMap<_, _> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let token = params.get("token").map(String::as_str).unwrap_or("");
    let refresh_token = params.get("refreshToken").map(String::as_str).unwrap_or("");
    let email = params.get("email").map(String::as_str).unwrap_or("");

    let mut missing = Vec::new();
    if token.is_empty() {
        missing.push("token");
    }
    if refresh_token.is_empty() {
        missing.push("refreshToken");
    }
    if email.is_empty() {
        missing.push("email");
    }
    if !missing.is_empty() {
        return CallbackParse::Rejected { missing };
    }

    let id = params
        .get("id")
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0);

    let nome = params
        .get("nome")
        .filter(|n| !n.is_empty())
        .cloned()
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

    let role = UserRole::from(params.get("role").cloned().unwrap_or_default());

    CallbackParse::Valid(HandshakeCredentials {
        access_token: token.to_string(),
        refresh_token: refresh_token.to_string(),
        user: StoredUser {
            id,
            nome,
            email: email.to_string(),
            role,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEME: &str = "app";

    #[test]
    fn test_valid_callback_with_percent_encoding() {
        let uri = "app://oauth2/callback?token=t1&refreshToken=r1&email=a%40b.com&id=3&nome=Jo%C3%A3o";

        let CallbackParse::Valid(creds) = parse_callback(uri, SCHEME) else {
            panic!("expected valid callback");
        };
        assert_eq!(creds.access_token, "t1");
        assert_eq!(creds.refresh_token, "r1");
        assert_eq!(creds.user.id, 3);
        assert_eq!(creds.user.nome, "João");
        assert_eq!(creds.user.email, "a@b.com");
        assert_eq!(creds.user.role, UserRole::Unset);
    }

    #[test]
    fn test_role_carried_through() {
        let uri = "app://oauth2/callback?token=t&refreshToken=r&email=a%40b.com&role=VOLUNTEER&id=1";

        let CallbackParse::Valid(creds) = parse_callback(uri, SCHEME) else {
            panic!("expected valid callback");
        };
        assert_eq!(creds.user.role, UserRole::Volunteer);
    }

    #[test]
    fn test_nome_falls_back_to_email_local_part() {
        let uri = "app://oauth2/callback?token=t&refreshToken=r&email=maria%40x.com&id=5";

        let CallbackParse::Valid(creds) = parse_callback(uri, SCHEME) else {
            panic!("expected valid callback");
        };
        assert_eq!(creds.user.nome, "maria");
    }

    #[test]
    fn test_missing_id_parses_as_zero() {
        let uri = "app://oauth2/callback?token=t&refreshToken=r&email=a%40b.com";

        let CallbackParse::Valid(creds) = parse_callback(uri, SCHEME) else {
            panic!("expected valid callback");
        };
        assert_eq!(creds.user.id, 0);
    }

    #[test]
    fn test_missing_refresh_token_rejected() {
        let uri = "app://oauth2/callback?token=t&email=a%40b.com&id=1";

        assert_eq!(
            parse_callback(uri, SCHEME),
            CallbackParse::Rejected {
                missing: vec!["refreshToken"],
            }
        );
    }

    #[test]
    fn test_empty_required_field_rejected() {
        let uri = "app://oauth2/callback?token=&refreshToken=r&email=a%40b.com";

        assert_eq!(
            parse_callback(uri, SCHEME),
            CallbackParse::Rejected {
                missing: vec!["token"],
            }
        );
    }

    #[test]
    fn test_unrelated_path_ignored() {
        assert_eq!(
            parse_callback("app://evento/detalhe?id=12", SCHEME),
            CallbackParse::Unrelated
        );
    }

    #[test]
    fn test_wrong_scheme_ignored() {
        assert_eq!(
            parse_callback(
                "other://oauth2/callback?token=t&refreshToken=r&email=a%40b.com",
                SCHEME
            ),
            CallbackParse::Unrelated
        );
    }

    #[test]
    fn test_garbage_uri_ignored() {
        assert_eq!(parse_callback("not a uri at all", SCHEME), CallbackParse::Unrelated);
    }
}
