//! HTTP wire types exchanged with the transport.
//!
//! # Design
//! These types describe the outbound call and its response as plain data.
//! The executor builds an `HttpRequest`, hands it to a `Transport`, and
//! classifies the `HttpResponse` it gets back. Keeping them free of any
//! client library's types lets tests script transports without sockets.

use std::fmt;

use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound HTTP call, fully resolved.
///
/// Headers come from the process-wide `ClientConfig`; they are not set per
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Render an equivalent `curl` command line, for diagnostics.
    pub fn to_curl(&self) -> String {
        let mut curl = format!("curl --insecure -X {}", self.method);
        for (name, value) in &self.headers {
            curl.push_str(&format!(" -H {}", shell_quote(&format!("{name}: {value}"))));
        }
        curl.push(' ');
        curl.push_str(&shell_quote(self.url.as_str()));
        curl
    }
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// A response as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Inclusive 200..=299 check.
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

pub(crate) fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}
