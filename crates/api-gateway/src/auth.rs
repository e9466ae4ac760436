//! Authentication endpoints.

use crate::{validate_email, validate_password, ApiClient, ApiError, ApiResult};
use credential_store::{StoredUser, UserRole};
use serde::Deserialize;
use serde_json::{json, Value};

/// Payload returned by `POST /auth/login` and `POST /auth/login-otp`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    pub id: i64,
    pub nome: String,
}

impl LoginResponse {
    /// Split into the token tuple and the user object for `sign_in`.
    pub fn into_parts(self) -> (String, String, StoredUser) {
        let user = StoredUser {
            id: self.id,
            nome: self.nome,
            email: self.email,
            role: UserRole::from(self.role),
        };
        (self.token, self.refresh_token, user)
    }
}

/// Payload returned by `POST /auth/verify-email-modern`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub user: StoredUser,
}

impl ApiClient {
    /// Register a new account; the backend follows up with a verification
    /// e-mail.
    pub async fn register(&self, nome: &str, email: &str, senha: &str) -> ApiResult<Value> {
        if nome.trim().is_empty() {
            return Err(ApiError::validation("Nome é obrigatório"));
        }
        validate_email(email)?;
        validate_password(senha)?;

        self.post_json(
            "/auth/register-modern",
            &json!({ "nome": nome, "email": email, "senha": senha }),
        )
        .await
    }

    /// Confirm the verification code sent by e-mail; yields the first
    /// session tuple.
    pub async fn verify_email(&self, email: &str, codigo: &str) -> ApiResult<VerifyEmailResponse> {
        self.post_json(
            "/auth/verify-email-modern",
            &json!({ "email": email, "codigo": codigo }),
        )
        .await
    }

    /// Password login.
    pub async fn login(&self, email: &str, senha: &str) -> ApiResult<LoginResponse> {
        validate_email(email)?;
        self.post_json("/auth/login", &json!({ "email": email, "senha": senha }))
            .await
    }

    /// Ask for a one-time login code by e-mail.
    pub async fn request_otp(&self, email: &str) -> ApiResult<Value> {
        validate_email(email)?;
        match self
            .post_json("/auth/request-otp", &json!({ "email": email }))
            .await
        {
            // The backend rate-limits this endpoint aggressively; give the
            // throttled case its own message.
            Err(err) if err.status == Some(429) => Err(ApiError::with_status(
                err.kind,
                "Muitas tentativas. Aguarde alguns minutos.",
                429,
            )),
            other => other,
        }
    }

    /// Exchange a one-time code for a session.
    pub async fn login_otp(&self, email: &str, codigo: &str) -> ApiResult<LoginResponse> {
        self.post_json("/auth/login-otp", &json!({ "email": email, "token": codigo }))
            .await
    }

    /// Start the password recovery flow.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<Value> {
        validate_email(email)?;
        self.post_json("/auth/request-password-reset", &json!({ "email": email }))
            .await
    }

    /// Set a new password using the recovery token.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        nova_senha: &str,
    ) -> ApiResult<Value> {
        validate_password(nova_senha)?;
        self.post_json(
            "/auth/reset-password",
            &json!({ "email": email, "token": token, "novaSenha": nova_senha }),
        )
        .await
    }

    /// Probe the current session; bearer-authenticated like every other
    /// call.
    pub async fn token_status(&self) -> ApiResult<Value> {
        self.get_json("/auth/token-status").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use credential_store::{CredentialStore, MemoryBackend};
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        let store = Arc::new(CredentialStore::new(Box::new(MemoryBackend::new())));
        ApiClient::new(server.uri(), store)
    }

    #[tokio::test]
    async fn test_login_deserializes_token_tuple() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"email": "ana@x.com", "senha": "segredo1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "tAAA",
                "refreshToken": "rBBB",
                "email": "ana@x.com",
                "role": "USER",
                "id": 7,
                "nome": "Ana"
            })))
            .mount(&server)
            .await;

        let response = client(&server).login("ana@x.com", "segredo1").await.unwrap();
        let (token, refresh, user) = response.into_parts();
        assert_eq!(token, "tAAA");
        assert_eq!(refresh, "rBBB");
        assert_eq!(user.id, 7);
        assert_eq!(user.nome, "Ana");
        assert_eq!(user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email_before_network() {
        let server = MockServer::start().await;
        // No mock mounted: a request would fail the test via an unexpected
        // error kind.
        let err = client(&server).login("nao-e-email", "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_validates_password_length() {
        let server = MockServer::start().await;
        let err = client(&server)
            .register("Ana", "ana@x.com", "123")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verify_email_returns_session_tuple() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/verify-email-modern"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "tAAA",
                "refreshToken": "rBBB",
                "user": {"id": 7, "nome": "Ana", "email": "ana@x.com", "role": "USER"}
            })))
            .mount(&server)
            .await;

        let response = client(&server)
            .verify_email("ana@x.com", "123456")
            .await
            .unwrap();
        assert_eq!(response.access_token, "tAAA");
        assert_eq!(response.user.nome, "Ana");
    }

    #[tokio::test]
    async fn test_request_otp_throttled_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/request-otp"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server).request_otp("ana@x.com").await.unwrap_err();
        assert_eq!(err.status, Some(429));
        assert_eq!(err.message, "Muitas tentativas. Aguarde alguns minutos.");
    }
}
