//! `HttpTransport` implementation over a shared `reqwest::Client`.

use std::future::Future;
use std::time::Duration;

use metricboard_app::ports::{HttpRequest, HttpResponse, HttpTransport, Method};
use metricboard_domain::error::TransportError;

use crate::error::HttpClientError;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends requests with `reqwest`. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Build`] if the TLS backend cannot be
    /// initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("metricboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HttpClientError::Build)?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}

async fn execute(
    client: reqwest::Client,
    request: HttpRequest,
) -> Result<HttpResponse, HttpClientError> {
    let mut builder = client.request(to_reqwest(request.method), &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(HttpResponse { status, body })
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        let client = self.client.clone();
        async move {
            execute(client, request).await.map_err(|err| {
                tracing::debug!(error = %err, "reqwest transport error");
                TransportError::from(err)
            })
        }
    }
}
