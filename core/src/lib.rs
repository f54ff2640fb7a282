//! Client-side request execution core.
//!
//! # Overview
//! Turns a declarative endpoint description (method + encoded path) and a
//! target domain into one outbound HTTP call, classifies the outcome, and
//! decodes successful JSON bodies into typed values.
//!
//! # Design
//! - `EndpointPath` percent-encodes every interpolated value; literals are
//!   trusted.
//! - `Request` pairs an `HttpMethod` with a rendered path and is only built
//!   through per-verb factories.
//! - `Executor` owns its transport and configuration explicitly. Each call is
//!   attempted once and reports exactly one outcome, or none if the transport
//!   reports a cancellation.
//! - `Transport` is the I/O seam. `UreqTransport` is the production
//!   implementation; tests script their own.
//! - `reachability::is_connected` is a side-effect-free route probe.

pub mod config;
pub mod domain;
pub mod error;
pub mod executor;
pub mod http;
pub mod path;
pub mod reachability;
pub mod request;
pub mod task;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
pub use domain::{Domain, HttpsHost};
pub use error::{ConfigError, RequestError, TransportError, TransportErrorKind};
pub use executor::{Executor, SessionObserver};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use path::{EndpointPath, Segment};
pub use reachability::is_connected;
pub use request::Request;
pub use task::TaskHandle;
pub use transport::{Transport, UreqTransport};
pub use tokio_util::sync::CancellationToken;
