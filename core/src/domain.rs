//! Target domains and URL resolution.

use std::borrow::Cow;

use url::Url;

use crate::error::RequestError;

/// Something that renders itself as a base URL (`scheme://host[/prefix]`).
pub trait Domain {
    fn base_url(&self) -> Cow<'_, str>;
}

impl Domain for str {
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Domain for String {
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Domain for Url {
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<D: Domain + ?Sized> Domain for &D {
    fn base_url(&self) -> Cow<'_, str> {
        (**self).base_url()
    }
}

/// A bare host name served over https, e.g. `HttpsHost("api.example.com")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpsHost(pub String);

impl Domain for HttpsHost {
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Owned(format!("https://{}", self.0))
    }
}

/// Concatenate `domain` and `path` and validate the result.
///
/// Trailing slashes on the base are dropped when the path brings its own
/// leading slash. Anything that does not parse as an absolute http(s) URL
/// with a host is rejected.
pub fn resolve<D: Domain + ?Sized>(domain: &D, path: &str) -> Result<Url, RequestError> {
    let base = domain.base_url();
    let base = if path.starts_with('/') {
        base.trim_end_matches('/')
    } else {
        base.as_ref()
    };
    let candidate = format!("{base}{path}");

    let url = Url::parse(&candidate).map_err(|_| RequestError::InvalidUrl(candidate.clone()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(RequestError::InvalidUrl(candidate));
    }
    Ok(url)
}
