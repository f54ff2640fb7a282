//! Error types for the request executor.
//!
//! # Design
//! `RequestError` is the closed set of outcomes a caller can receive instead
//! of a value. `InvalidUrl` is the only pre-flight kind: it is produced before
//! any network resource is allocated. Every other kind means an attempt was
//! made and failed in a named way.
//!
//! `TransportError` is what a `Transport` reports. The executor turns it into
//! `RequestError::Request`, except for cancellations, which never reach the
//! caller.

use thiserror::Error;

/// Failure delivered to a request callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The domain and path did not form a usable URL. No call was made.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport finished without an error but also without a response.
    #[error("no response")]
    NoResponse,

    /// The transport failed (DNS, TLS, connection reset, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a status outside 200..=299.
    #[error("server error: HTTP {0}")]
    ServerError(u16),

    /// The body arrived with a success status but did not decode.
    #[error("decoding failed: {0}")]
    Decoding(String),
}

impl RequestError {
    /// True when no network attempt was made.
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, RequestError::InvalidUrl(_))
    }

    /// True when an attempt was made and failed.
    pub fn is_first_chance(&self) -> bool {
        !self.is_pre_flight()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::ServerError(code) => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Cancelled,
    Timeout,
    Connect,
    Io,
    Other,
}

/// Failure reported by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct TransportError {
    kind: TransportErrorKind,
    description: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(TransportErrorKind::Cancelled, "cancelled")
    }

    pub fn timeout(description: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, description)
    }

    pub fn connect(description: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, description)
    }

    pub fn io(description: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Io, description)
    }

    pub fn other(description: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, description)
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == TransportErrorKind::Cancelled
    }
}

impl From<ureq::Error> for TransportError {
    fn from(error: ureq::Error) -> Self {
        let kind = match &error {
            ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
            ureq::Error::Io(_) => TransportErrorKind::Io,
            _ => TransportErrorKind::Other,
        };
        Self::new(kind, error.to_string())
    }
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
