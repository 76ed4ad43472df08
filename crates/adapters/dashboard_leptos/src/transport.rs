//! `HttpTransport` over the browser `fetch` API via `gloo-net`.

use std::future::Future;

use gloo_net::http::{Request, RequestBuilder};
use metricboard_app::ports::{HttpRequest, HttpResponse, HttpTransport, Method};
use metricboard_domain::error::TransportError;

/// Sends requests with `fetch`. Stateless; the browser owns the connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
    }
}

async fn execute(request: HttpRequest) -> Result<HttpResponse, gloo_net::Error> {
    let mut builder = builder(request.method, &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let response = match request.body {
        Some(body) => builder.body(body)?.send().await?,
        None => builder.send().await?,
    };
    let status = response.status();
    let body = response.text().await?;
    Ok(HttpResponse { status, body })
}

impl HttpTransport for GlooTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        async move {
            execute(request).await.map_err(|err| {
                tracing::debug!(error = %err, "fetch failed");
                TransportError::new(err.to_string())
            })
        }
    }
}
