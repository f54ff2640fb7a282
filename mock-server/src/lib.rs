use std::time::Duration;

use axum::{
    extract::{OriginalUri, Path, Query},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

/// Request line as the server received it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Deserialize)]
pub struct SlowParams {
    #[serde(default = "default_delay_ms")]
    pub ms: u64,
}

fn default_delay_ms() -> u64 {
    1_000
}

#[derive(Deserialize)]
pub struct BytesParams {
    #[serde(default)]
    pub n: usize,
}

/// The only user the fixtures know about.
pub const KNOWN_USER_ID: u32 = 42;

pub fn app() -> Router {
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/status/{code}", get(status).post(status).put(status).delete(status))
        .route("/malformed", get(malformed))
        .route("/slow", get(slow))
        .route("/echo", get(echo).post(echo).put(echo).delete(echo))
        .route("/echo/{*rest}", get(echo))
        .route("/bytes", get(bytes))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// User 42 is "x"; any other id is a 404 with an empty body.
async fn get_user(Path(id): Path<u32>) -> Result<Json<User>, StatusCode> {
    if id != KNOWN_USER_ID {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(User {
        id,
        name: "x".to_string(),
    }))
}

/// Reply with the requested status and an empty body.
async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn malformed() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "{\"id\": 42, \"name\":",
    )
}

async fn slow(Query(params): Query<SlowParams>) -> Json<User> {
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    Json(User {
        id: 0,
        name: "slow".to_string(),
    })
}

async fn echo(method: axum::http::Method, OriginalUri(uri): OriginalUri, headers: HeaderMap) -> Json<Echo> {
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    })
}

/// `n` bytes of `a`, for bodies larger than a client's default read cap.
async fn bytes(Query(params): Query<BytesParams>) -> Vec<u8> {
    vec![b'a'; params.n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_json() {
        let user = User {
            id: 42,
            name: "x".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 42, "name": "x"}));
    }

    #[test]
    fn slow_defaults_to_one_second() {
        let params: SlowParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.ms, 1_000);
    }

    #[test]
    fn bytes_defaults_to_empty() {
        let params: BytesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.n, 0);
    }

    #[test]
    fn echo_accepts_missing_query() {
        let echo: Echo =
            serde_json::from_str(r#"{"method":"GET","path":"/echo","query":null,"user_agent":null}"#).unwrap();
        assert_eq!(echo.path, "/echo");
        assert!(echo.query.is_none());
    }
}
