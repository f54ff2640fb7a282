//! Transport seam: the thing that actually moves bytes.
//!
//! # Design
//! `Transport` is the narrow interface the executor depends on. A transport
//! receives a fully resolved `HttpRequest` plus a `CancellationToken`, and
//! eventually reports one of:
//! - `Ok(Some(response))` with a status code and body,
//! - `Ok(None)` when it finished without a usable response,
//! - `Err(TransportError)`, where `is_cancelled()` marks a cancellation it
//!   observed through the token.
//!
//! `UreqTransport` is the production implementation. ureq is blocking, so
//! each call runs on tokio's blocking pool and is raced against the token.
//! A cancelled call's thread runs until the response arrives or a timeout
//! fires (connect timeout while connecting, global timeout after); its result
//! is discarded.
//!
//! The transport owns the process-wide `ClientConfig`; the executor reads
//! headers from it so timeouts and headers always come from one place.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync + 'static {
    /// Configuration this transport was built from.
    fn config(&self) -> &ClientConfig;

    fn issue(
        &self,
        request: HttpRequest,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Option<HttpResponse>, TransportError>> + Send;
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl UreqTransport {
    /// Build the agent once. Every status code, redirects included, is
    /// returned as data so the executor can classify it.
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_global(Some(config.timeout()))
            .timeout_connect(Some(config.connect_timeout()))
            .build()
            .new_agent();
        Self { agent, config }
    }
}

impl Transport for UreqTransport {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn issue(
        &self,
        request: HttpRequest,
        cancel: CancellationToken,
    ) -> Result<Option<HttpResponse>, TransportError> {
        if cancel.is_cancelled() {
            return Err(TransportError::cancelled());
        }

        let agent = self.agent.clone();
        let call = tokio::task::spawn_blocking(move || send_blocking(&agent, &request));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::cancelled()),
            joined = call => match joined {
                Ok(result) => result,
                Err(e) => Err(TransportError::other(e.to_string())),
            },
        }
    }
}

fn send_blocking(
    agent: &ureq::Agent,
    request: &HttpRequest,
) -> Result<Option<HttpResponse>, TransportError> {
    let url = request.url.as_str();
    let headers = request.headers.as_slice();

    let result = match request.method {
        HttpMethod::Get => with_headers(agent.get(url), headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(url), headers).call(),
        HttpMethod::Post => with_headers(agent.post(url), headers).send_empty(),
        HttpMethod::Put => with_headers(agent.put(url), headers).send_empty(),
    };

    let mut response = result?;
    let status = response.status().as_u16();
    // No size cap: a large success body is still a success.
    let body = response.body_mut().with_config().limit(u64::MAX).read_to_vec()?;
    Ok(Some(HttpResponse { status, body }))
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
