//! Request executor: resolve, dispatch, classify, decode.
//!
//! # Design
//! `Executor` is an explicit value holding its transport and a tokio runtime
//! handle; callers construct it once and clone it where needed. Headers and
//! timeouts both come from the transport's `ClientConfig`. Each call is
//! attempted exactly once and yields exactly one of: a value, a
//! `RequestError`, or nothing at all when the transport reports that the call
//! was cancelled.
//!
//! Classification order for a finished call:
//! 1. transport error (a cancellation is swallowed, anything else is
//!    `RequestError::Request`),
//! 2. no response (`RequestError::NoResponse`),
//! 3. status code: 200..=299 succeeds, anything else is
//!    `RequestError::ServerError`.
//!
//! The callback API (`perform`, `perform_raw`) spawns onto the runtime and
//! returns immediately. Apart from a cancellation, a callback is skipped only
//! when the runtime shuts down before the call finishes; that drop is logged.
//! The async API (`fetch`, `fetch_raw`) runs the same pipeline inline and
//! returns `None` for a cancelled call.

use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::domain::{resolve, Domain};
use crate::error::{RequestError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::request::Request;
use crate::task::TaskHandle;
use crate::transport::Transport;

/// Optional listener for call lifecycle events.
///
/// The executor keeps only a weak reference; dropping the observer detaches
/// it.
pub trait SessionObserver: Send + Sync {
    fn will_send(&self, _request: &HttpRequest) {}

    fn did_receive(&self, _request: &HttpRequest, _status: u16) {}

    fn did_fail(&self, _request: &HttpRequest, _error: &TransportError) {}
}

pub struct Executor<T> {
    transport: Arc<T>,
    headers: Arc<[(String, String)]>,
    runtime: Handle,
    observer: Option<Weak<dyn SessionObserver>>,
}

impl<T> Clone for Executor<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            headers: Arc::clone(&self.headers),
            runtime: self.runtime.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl<T: Transport> Executor<T> {
    /// Default headers are read from the transport's own configuration.
    pub fn new(transport: T, runtime: Handle) -> Self {
        let headers = transport.config().default_headers().into();
        Self {
            transport: Arc::new(transport),
            headers,
            runtime,
            observer: None,
        }
    }

    pub fn with_observer<O: SessionObserver + 'static>(mut self, observer: &Arc<O>) -> Self {
        let weak = Arc::downgrade(observer);
        let weak: Weak<dyn SessionObserver> = weak;
        self.observer = Some(weak);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Send `request` to `domain` and decode the JSON body into `V`.
    ///
    /// When the URL cannot be built, `callback` runs synchronously with
    /// `RequestError::InvalidUrl` and `None` is returned: no task exists.
    pub fn perform<V, D, F>(&self, request: &Request, domain: &D, callback: F) -> Option<TaskHandle>
    where
        V: DeserializeOwned + Send + 'static,
        D: Domain + ?Sized,
        F: FnOnce(Result<V, RequestError>) + Send + 'static,
    {
        let url = match resolve(domain, request.path()) {
            Ok(url) => url,
            Err(error) => {
                debug!(path = request.path(), %error, "invalid URL");
                callback(Err(error));
                return None;
            }
        };

        let handle = self.perform_raw(url, request.method(), move |result| {
            callback(result.and_then(|body| decode(&body)));
        });
        Some(handle)
    }

    /// Send a call and deliver the raw body of a successful response.
    ///
    /// Never blocks. `callback` runs at most once, on a runtime worker.
    pub fn perform_raw<F>(&self, url: Url, method: HttpMethod, callback: F) -> TaskHandle
    where
        F: FnOnce(Result<Vec<u8>, RequestError>) + Send + 'static,
    {
        let token = CancellationToken::new();
        let executor = self.clone();
        let cancel = token.clone();
        let delivery = Delivery {
            callback: Some(callback),
            url: url.clone(),
        };

        self.runtime.spawn(async move {
            let outcome = executor.fetch_raw(url, method, cancel).await;
            if let (Some(result), Some(callback)) = (outcome, delivery.settle()) {
                callback(result);
            }
        });

        TaskHandle::new(token)
    }

    /// Async form of [`Executor::perform`]. `None` means the transport
    /// reported that `cancel` fired.
    pub async fn fetch<V, D>(
        &self,
        request: &Request,
        domain: &D,
        cancel: CancellationToken,
    ) -> Option<Result<V, RequestError>>
    where
        V: DeserializeOwned,
        D: Domain + ?Sized,
    {
        let url = match resolve(domain, request.path()) {
            Ok(url) => url,
            Err(error) => {
                debug!(path = request.path(), %error, "invalid URL");
                return Some(Err(error));
            }
        };

        let result = self.fetch_raw(url, request.method(), cancel).await?;
        Some(result.and_then(|body| decode(&body)))
    }

    /// Async form of [`Executor::perform_raw`].
    pub async fn fetch_raw(
        &self,
        url: Url,
        method: HttpMethod,
        cancel: CancellationToken,
    ) -> Option<Result<Vec<u8>, RequestError>> {
        let request = HttpRequest {
            method,
            url,
            headers: self.headers.to_vec(),
        };

        debug!(%method, url = %request.url, "perform");
        #[cfg(debug_assertions)]
        trace!(curl = %request.to_curl(), "outbound request");

        if let Some(observer) = self.observer() {
            observer.will_send(&request);
        }

        let outcome = self.transport.issue(request.clone(), cancel).await;
        self.classify(&request, outcome)
    }

    fn classify(
        &self,
        request: &HttpRequest,
        outcome: Result<Option<HttpResponse>, TransportError>,
    ) -> Option<Result<Vec<u8>, RequestError>> {
        let observer = self.observer();

        match outcome {
            Err(error) => {
                if let Some(observer) = &observer {
                    observer.did_fail(request, &error);
                }
                if error.is_cancelled() {
                    debug!(url = %request.url, "cancelled");
                    return None;
                }
                debug!(url = %request.url, %error, "request failure");
                Some(Err(RequestError::Request(error.description().to_string())))
            }
            Ok(None) => {
                debug!(url = %request.url, "no response");
                Some(Err(RequestError::NoResponse))
            }
            Ok(Some(response)) => {
                if let Some(observer) = &observer {
                    observer.did_receive(request, response.status);
                }
                if response.is_success() {
                    trace!(status = response.status, bytes = response.body.len(), "success");
                    Some(Ok(response.body))
                } else {
                    debug!(url = %request.url, status = response.status, "server error");
                    Some(Err(RequestError::ServerError(response.status)))
                }
            }
        }
    }

    fn observer(&self) -> Option<Arc<dyn SessionObserver>> {
        self.observer.as_ref().and_then(Weak::upgrade)
    }
}

/// Callback owned by a spawned call. Dropping it unsettled means the task was
/// torn down before it could finish.
struct Delivery<F> {
    callback: Option<F>,
    url: Url,
}

impl<F> Delivery<F> {
    fn settle(mut self) -> Option<F> {
        self.callback.take()
    }
}

impl<F> Drop for Delivery<F> {
    fn drop(&mut self) {
        if self.callback.is_some() {
            debug!(url = %self.url, "call dropped before completion, callback not invoked");
        }
    }
}

fn decode<V: DeserializeOwned>(body: &[u8]) -> Result<V, RequestError> {
    serde_json::from_slice(body).map_err(|e| {
        let description = e.to_string();
        debug!(%description, "decoding failure");
        RequestError::Decoding(description)
    })
}
