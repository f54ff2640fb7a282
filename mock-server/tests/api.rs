use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- users ---

#[tokio::test]
async fn seeded_user_is_served() {
    let resp = app().oneshot(request("GET", "/users/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(
        user,
        User {
            id: 42,
            name: "x".to_string()
        }
    );
}

#[tokio::test]
async fn unknown_user_returns_404_with_empty_body() {
    let resp = app().oneshot(request("GET", "/users/7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

// --- fixtures ---

#[tokio::test]
async fn status_route_replies_with_requested_code() {
    for code in [200u16, 301, 302, 304, 404, 418, 503] {
        let resp = app()
            .oneshot(request("GET", &format!("/status/{code}")))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), code);
    }
}

#[tokio::test]
async fn malformed_body_is_not_json() {
    let resp = app().oneshot(request("GET", "/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<User>(&bytes).is_err());
}

#[tokio::test]
async fn slow_waits_for_requested_delay() {
    let started = std::time::Instant::now();
    let resp = app().oneshot(request("GET", "/slow?ms=50")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
}

#[tokio::test]
async fn bytes_route_serves_requested_length() {
    let resp = app().oneshot(request("GET", "/bytes?n=4096")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(bytes.len(), 4096);
    assert!(bytes.iter().all(|b| *b == b'a'));
}

#[tokio::test]
async fn redirect_status_carries_no_location() {
    let resp = app().oneshot(request("GET", "/status/301")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert!(resp.headers().get("location").is_none());
}

#[tokio::test]
async fn echo_reports_raw_path_and_query() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo/a%20b?q=a%20b%26c")
                .header("user-agent", "client/1.0")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/a%20b");
    assert_eq!(echo.query.as_deref(), Some("q=a%20b%26c"));
    assert_eq!(echo.user_agent.as_deref(), Some("client/1.0"));
}
