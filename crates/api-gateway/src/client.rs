//! The configured HTTP client and response classification.

use crate::{ApiError, ApiResult, ErrorKind};
use credential_store::CredentialStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Client-side request timeout, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

pub(crate) const MSG_NETWORK: &str =
    "Erro de conexão. Verifique sua internet e tente novamente.";
pub(crate) const MSG_TIMEOUT: &str = "A requisição demorou muito. Tente novamente.";
pub(crate) const MSG_SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";
pub(crate) const MSG_FORBIDDEN: &str = "Você não tem permissão para realizar esta ação.";
pub(crate) const MSG_NOT_FOUND: &str = "Recurso não encontrado.";
pub(crate) const MSG_SERVER: &str = "Erro no servidor. Tente novamente mais tarde.";
pub(crate) const MSG_UNAVAILABLE: &str =
    "Serviço temporariamente indisponível. Tente novamente mais tarde.";
pub(crate) const MSG_UNEXPECTED: &str = "Ocorreu um erro inesperado. Tente novamente.";
pub(crate) const MSG_BAD_RESPONSE: &str = "Resposta inválida do servidor.";

/// The single configured HTTP client used by every feature area.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<CredentialStore>,
}

impl ApiClient {
    /// Create a client for the given API base URL.
    pub fn new(base_url: impl Into<String>, store: Arc<CredentialStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(method = "GET", path = %path, "Outbound request");
        let builder = self.http.get(self.url(path));
        self.send(builder).await
    }

    /// POST a JSON body, expecting a JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(method = "POST", path = %path, "Outbound request");
        let builder = self.http.post(self.url(path)).json(body);
        self.send(builder).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> ApiResult<T> {
        // Token comes from the store, not the in-memory session: the
        // session manager may not be initialized yet.
        let builder = match self.store.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(classify_transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let server_msg = extract_server_message(&body);
            error!(status = %status, "Request failed");
            return Err(self.classify_status(status.as_u16(), server_msg));
        }

        debug!(status = %status, "Response ok");
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to decode response body");
            ApiError::new(ErrorKind::Other, MSG_BAD_RESPONSE)
        })
    }

    /// Classify a non-success status into an [`ApiError`].
    ///
    /// A 401 also clears the stored session: the token is no longer good,
    /// and no silent refresh is attempted. The error is built here, once,
    /// and never mutated further down the stack.
    fn classify_status(&self, status: u16, server_msg: Option<String>) -> ApiError {
        match status {
            401 => {
                warn!("Session expired, clearing stored credentials");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear credentials after 401");
                }
                ApiError::with_status(ErrorKind::SessionExpired, MSG_SESSION_EXPIRED, status)
            }
            403 => ApiError::with_status(ErrorKind::Forbidden, MSG_FORBIDDEN, status),
            404 => ApiError::with_status(ErrorKind::NotFound, MSG_NOT_FOUND, status),
            500 => ApiError::with_status(ErrorKind::Server, MSG_SERVER, status),
            503 => ApiError::with_status(ErrorKind::Unavailable, MSG_UNAVAILABLE, status),
            _ => ApiError::with_status(
                ErrorKind::Other,
                server_msg.unwrap_or_else(|| MSG_UNEXPECTED.to_string()),
                status,
            ),
        }
    }
}

fn classify_transport(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::new(ErrorKind::Timeout, MSG_TIMEOUT)
    } else {
        ApiError::new(ErrorKind::Network, MSG_NETWORK)
    }
}

/// Pull `message` or `error` out of a JSON error body, when present.
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for field in ["message", "error"] {
        if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
            if !msg.is_empty() {
                return Some(msg.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use credential_store::{CredentialStore, MemoryBackend, StoredUser, UserRole};
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_with_session() -> Arc<CredentialStore> {
        let store = Arc::new(CredentialStore::new(Box::new(MemoryBackend::new())));
        store
            .save(
                "tAAA",
                "rBBB",
                &StoredUser {
                    id: 7,
                    nome: "Ana".to_string(),
                    email: "ana@x.com".to_string(),
                    role: UserRole::User,
                },
            )
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_bearer_attached_when_token_stored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/evento/listar"))
            .and(header("authorization", "Bearer tAAA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), store_with_session());
        let result: ApiResult<Value> = client.get_json("/evento/listar").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_no_bearer_when_signed_out() {
        let server = MockServer::start().await;
        // Matcher succeeds only without an Authorization header; wiremock
        // returns 404 for unmatched requests, which would fail the assert.
        Mock::given(method("GET"))
            .and(path("/evento/listar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = Arc::new(CredentialStore::new(Box::new(MemoryBackend::new())));
        let client = ApiClient::new(server.uri(), store);
        let result: ApiResult<Value> = client.get_json("/evento/listar").await;
        assert!(result.is_ok());

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_401_clears_stored_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/token-status"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = store_with_session();
        let client = ApiClient::new(server.uri(), store.clone());

        let result: ApiResult<Value> = client.get_json("/auth/token-status").await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionExpired);
        assert_eq!(err.message, MSG_SESSION_EXPIRED);

        // All three keys are gone, regardless of prior state.
        let data = store.load();
        assert!(data.access_token.is_none());
        assert!(data.refresh_token.is_none());
        assert!(data.user.is_none());
    }

    #[tokio::test]
    async fn test_403_classified_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/voluntario/tornar"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), store_with_session());
        let result: ApiResult<Value> = client.get_json("/voluntario/tornar").await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.message, MSG_FORBIDDEN);
    }

    #[tokio::test]
    async fn test_500_and_503_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), store_with_session());

        let err = client.get_json::<Value>("/a").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.message, MSG_SERVER);

        let err = client.get_json::<Value>("/b").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unavailable);
        assert_eq!(err.message, MSG_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_other_status_preserves_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Credenciais inválidas"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), store_with_session());
        let err = client
            .post_json::<_, Value>("/auth/login", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Other);
        assert_eq!(err.message, "Credenciais inválidas");
        assert_eq!(err.status, Some(400));
    }

    #[tokio::test]
    async fn test_other_status_without_body_gets_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(ResponseTemplate::new(418))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), store_with_session());
        let err = client.get_json::<Value>("/x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Other);
        assert_eq!(err.message, MSG_UNEXPECTED);
    }

    #[tokio::test]
    async fn test_network_failure_classified() {
        // Nothing listens on this port.
        let store = Arc::new(CredentialStore::new(Box::new(MemoryBackend::new())));
        let client = ApiClient::new("http://127.0.0.1:9", store);

        let err = client.get_json::<Value>("/evento/listar").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.message, MSG_NETWORK);
    }

    #[test]
    fn test_extract_server_message() {
        assert_eq!(
            extract_server_message(r#"{"message":"Nope"}"#),
            Some("Nope".to_string())
        );
        assert_eq!(
            extract_server_message(r#"{"error":"Bad"}"#),
            Some("Bad".to_string())
        );
        assert_eq!(extract_server_message("not json"), None);
        assert_eq!(extract_server_message(r#"{"message":""}"#), None);
    }
}
