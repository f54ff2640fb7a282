//! Request descriptors: an HTTP method paired with an endpoint path.

use crate::http::HttpMethod;
use crate::path::EndpointPath;

/// An intended call, independent of the domain it will be sent to.
///
/// Only constructible through the per-verb factories, so every descriptor's
/// path has already been through `EndpointPath` encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: HttpMethod,
    path: String,
}

impl Request {
    pub fn get(path: impl Into<EndpointPath>) -> Self {
        Self::new(HttpMethod::Get, path.into())
    }

    pub fn post(path: impl Into<EndpointPath>) -> Self {
        Self::new(HttpMethod::Post, path.into())
    }

    pub fn put(path: impl Into<EndpointPath>) -> Self {
        Self::new(HttpMethod::Put, path.into())
    }

    pub fn delete(path: impl Into<EndpointPath>) -> Self {
        Self::new(HttpMethod::Delete, path.into())
    }

    fn new(method: HttpMethod, path: EndpointPath) -> Self {
        Self {
            method,
            path: path.into_string(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_factory_sets_its_verb() {
        assert_eq!(Request::get("/a").method(), HttpMethod::Get);
        assert_eq!(Request::post("/a").method(), HttpMethod::Post);
        assert_eq!(Request::put("/a").method(), HttpMethod::Put);
        assert_eq!(Request::delete("/a").method(), HttpMethod::Delete);
    }

    #[test]
    fn path_is_taken_from_rendered_endpoint() {
        let request = Request::get(EndpointPath::literal("/users/").value("a b"));
        assert_eq!(request.path(), "/users/a%20b");
    }
}
