//! API client speaking the backend contract over an [`HttpTransport`].
//!
//! Attaches the bearer token from the [`TokenStore`] to every request and
//! refuses to call protected endpoints when no token is stored.

use metricboard_domain::error::{ApiError, HttpError};
use metricboard_domain::metrics::{MetricsPage, MetricsQuery, MetricsSummary};
use metricboard_domain::session::{Credentials, TokenResponse};
use metricboard_domain::user::User;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ports::{HttpRequest, HttpResponse, HttpTransport, Method, TokenStore};

/// The only endpoint callable without a session token.
pub const LOGIN_ENDPOINT: &str = "/token";
const CURRENT_USER_ENDPOINT: &str = "/users/me";
const SUMMARY_ENDPOINT: &str = "/metrics/summary";
const METRICS_ENDPOINT: &str = "/metrics";
const HEALTH_ENDPOINT: &str = "/health";

const CONTENT_TYPE: &str = "Content-Type";
const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Message used when a failed response carries no `detail`.
pub const REQUEST_FALLBACK_MESSAGE: &str = "API request failed";
/// Message used when a failed login carries no `detail`.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Check your credentials.";

/// JSON error body returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

/// `detail` is a plain message, or a list of validation issues.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

#[derive(Deserialize)]
struct ValidationIssue {
    msg: String,
}

/// Extract the server-provided message from an error body, if any.
fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body).ok()?.detail {
        ErrorDetail::Message(message) if !message.is_empty() => Some(message),
        ErrorDetail::Message(_) => None,
        ErrorDetail::Issues(issues) => issues.into_iter().next().map(|issue| issue.msg),
    }
}

/// Check the response status, then decode the JSON body.
fn decode<R: DeserializeOwned>(response: &HttpResponse, fallback: &str) -> Result<R, ApiError> {
    if !response.is_success() {
        let message = error_message(&response.body).unwrap_or_else(|| fallback.to_string());
        return Err(HttpError {
            status: response.status,
            message,
        }
        .into());
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Percent-encode `key=value` pairs into a query string.
fn encode_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Backend health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Typed client for the metrics backend.
#[derive(Debug, Clone)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    tokens: S,
}

impl<T, S> ApiClient<T, S> {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, transport: T, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            tokens,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads the bearer token from.
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

impl<T: HttpTransport, S: TokenStore> ApiClient<T, S> {
    /// Call `endpoint` and decode its JSON response.
    ///
    /// Attaches `Authorization: Bearer <token>` when a token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] without touching the network when
    /// no token is stored and `endpoint` is not [`LOGIN_ENDPOINT`];
    /// [`ApiError::Http`] carrying the server's `detail` on non-2xx;
    /// [`ApiError::Transport`] or [`ApiError::Decode`] on network or parse
    /// failures.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<R, ApiError> {
        let token = self.tokens.load()?;
        if token.is_none() && endpoint != LOGIN_ENDPOINT {
            tracing::warn!(path = endpoint, "no session token, refusing protected request");
            return Err(ApiError::MissingToken);
        }

        let mut headers = vec![(CONTENT_TYPE.to_string(), JSON.to_string())];
        if let Some(token) = &token {
            headers.push(("Authorization".to_string(), token.bearer()));
        }
        let body = body.map(serde_json::to_string).transpose()?;

        let request = HttpRequest {
            method,
            url: self.url(endpoint),
            headers,
            body,
        };
        let response = self.send(endpoint, request).await?;
        decode(&response, REQUEST_FALLBACK_MESSAGE)
    }

    async fn send(&self, path: &str, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        tracing::debug!(%method, path, "sending request");
        let response = self
            .transport
            .send(request)
            .await
            .inspect_err(|err| tracing::warn!(%method, path, error = %err, "request failed"))?;
        if response.is_success() {
            tracing::debug!(%method, path, status = response.status, "received response");
        } else {
            tracing::warn!(%method, path, status = response.status, "server rejected request");
        }
        Ok(response)
    }

    /// Exchange credentials for an access token (`POST /token`, form-encoded).
    ///
    /// Does not store the token; that is the auth controller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with the server's `detail` (or a generic
    /// login message) when the credentials are rejected.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let body = encode_pairs(&[
            ("username", credentials.username()),
            ("password", credentials.password()),
        ]);
        let request = HttpRequest {
            method: Method::Post,
            url: self.url(LOGIN_ENDPOINT),
            headers: vec![(CONTENT_TYPE.to_string(), FORM.to_string())],
            body: Some(body),
        };
        let response = self.send(LOGIN_ENDPOINT, request).await?;
        decode(&response, LOGIN_FALLBACK_MESSAGE)
    }

    /// Fetch the identity behind the stored token (`GET /users/me`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request(CURRENT_USER_ENDPOINT, Method::Get, None).await
    }

    /// Fetch dataset-wide metadata (`GET /metrics/summary`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn metrics_summary(&self) -> Result<MetricsSummary, ApiError> {
        self.request(SUMMARY_ENDPOINT, Method::Get, None).await
    }

    /// Fetch one page of metrics (`GET /metrics?...`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn metrics_data(&self, query: &MetricsQuery) -> Result<MetricsPage, ApiError> {
        let endpoint = format!("{METRICS_ENDPOINT}?{}", encode_pairs(&query.query_pairs()));
        self.request(&endpoint, Method::Get, None).await
    }

    /// Probe the backend (`GET /health`). Needs no token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the backend is unreachable.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.url(HEALTH_ENDPOINT),
            headers: Vec::new(),
            body: None,
        };
        let response = self.send(HEALTH_ENDPOINT, request).await?;
        decode(&response, REQUEST_FALLBACK_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BASE_URL, FakeTransport, MemoryTokenStore, page_json, summary_json};
    use metricboard_domain::filter::SortOrder;
    use serde_json::json;

    fn client(
        transport: &FakeTransport,
        tokens: &MemoryTokenStore,
    ) -> ApiClient<FakeTransport, MemoryTokenStore> {
        ApiClient::new(format!("{BASE_URL}/"), transport.clone(), tokens.clone())
    }

    #[tokio::test]
    async fn should_refuse_protected_request_without_token() {
        let transport = FakeTransport::new();
        let api = client(&transport, &MemoryTokenStore::default());

        let result = api.metrics_summary().await;

        assert!(matches!(result, Err(ApiError::MissingToken)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn should_attach_bearer_token() {
        let transport = FakeTransport::new();
        transport.on(Method::Get, "/users/me", 200, json!({"username": "user1", "role": "admin"}));
        let api = client(&transport, &MemoryTokenStore::with_token("tok-1"));

        let user = api.current_user().await.unwrap();

        assert_eq!(user.username, "user1");
        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://api.test/users/me");
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-1"));
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn should_login_with_form_body_and_no_token() {
        let transport = FakeTransport::new();
        transport.on(
            Method::Post,
            "/token",
            200,
            json!({"access_token": "abc", "token_type": "bearer"}),
        );
        let api = client(&transport, &MemoryTokenStore::default());
        let creds = Credentials::new("user 1", "p&ss=").unwrap();

        let token = api.login(&creds).await.unwrap();

        assert_eq!(token.access_token.as_str(), "abc");
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(
            sent.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(sent.header("Authorization"), None);
        assert_eq!(
            sent.body.as_deref(),
            Some("username=user%201&password=p%26ss%3D")
        );
    }

    #[tokio::test]
    async fn should_surface_server_detail_on_failed_login() {
        let transport = FakeTransport::new();
        transport.on(
            Method::Post,
            "/token",
            401,
            json!({"detail": "Incorrect username or password"}),
        );
        let api = client(&transport, &MemoryTokenStore::default());
        let creds = Credentials::new("user1", "wrong").unwrap();

        let err = api.login(&creds).await.unwrap_err();

        assert!(matches!(&err, ApiError::Http(HttpError { status: 401, .. })));
        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn should_fall_back_to_generic_message_without_detail() {
        let transport = FakeTransport::new();
        transport.on_text(Method::Get, "/metrics/summary", 502, "<html>bad gateway</html>");
        let api = client(&transport, &MemoryTokenStore::with_token("tok"));

        let err = api.metrics_summary().await.unwrap_err();

        assert_eq!(err.to_string(), REQUEST_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn should_use_first_validation_issue_as_message() {
        let transport = FakeTransport::new();
        transport.on(
            Method::Get,
            "/metrics",
            422,
            json!({"detail": [{"loc": ["query", "page"], "msg": "value is not a valid integer"}]}),
        );
        let api = client(&transport, &MemoryTokenStore::with_token("tok"));

        let err = api.metrics_data(&MetricsQuery::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "value is not a valid integer");
    }

    #[tokio::test]
    async fn should_build_metrics_query_string() {
        let transport = FakeTransport::new();
        transport.on(Method::Get, "/metrics", 200, page_json(2, 3, 1));
        let api = client(&transport, &MemoryTokenStore::with_token("tok"));
        let query = MetricsQuery {
            date_filter: Some("2024-08-16".to_string()),
            sort_by: Some("cost_micros".to_string()),
            sort_order: SortOrder::Desc,
            page: 2,
            page_size: 100,
        };

        let page = api.metrics_data(&query).await.unwrap();

        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/metrics?sort_order=desc&page=2&page_size=100&date_filter=2024-08-16&sort_by=cost_micros"
        );
    }

    #[tokio::test]
    async fn should_decode_summary() {
        let transport = FakeTransport::new();
        transport.on(Method::Get, "/metrics/summary", 200, summary_json(true));
        let api = client(&transport, &MemoryTokenStore::with_token("tok"));

        let summary = api.metrics_summary().await.unwrap();

        assert_eq!(summary.total_records, 12345);
        assert!(summary.user_permissions.can_see_cost_micros);
    }

    #[tokio::test]
    async fn should_report_decode_error_for_unexpected_shape() {
        let transport = FakeTransport::new();
        transport.on(Method::Get, "/users/me", 200, json!({"name": "nope"}));
        let api = client(&transport, &MemoryTokenStore::with_token("tok"));

        let err = api.current_user().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn should_propagate_transport_errors() {
        let transport = FakeTransport::new();
        transport.fail(Method::Get, "/users/me", "connection refused");
        let api = client(&transport, &MemoryTokenStore::with_token("tok"));

        let err = api.current_user().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[tokio::test]
    async fn should_check_health_without_token() {
        let transport = FakeTransport::new();
        transport.on(Method::Get, "/health", 200, json!({"status": "healthy"}));
        let api = client(&transport, &MemoryTokenStore::default());

        let health = api.health().await.unwrap();

        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn should_trim_trailing_slash_from_base_url() {
        let api = ApiClient::new("http://api.test//", (), ());
        assert_eq!(api.base_url(), "http://api.test");
    }
}
