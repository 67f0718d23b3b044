#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use errkit::{DocsConfig, ErrorsConfig, JsonApiErrors};
use errkit_demo::routes::router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

fn app() -> Router {
    router(JsonApiErrors::new(ErrorsConfig {
        docs: DocsConfig::new("https://docs.example.com/errors"),
    }))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn existing_book_is_returned() {
    let (status, _, body) = send(app(), get("/books/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Programming Rust");
}

#[tokio::test]
async fn unknown_book_is_not_found() {
    let (status, _, body) = send(app(), get("/books/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "404");
    assert_eq!(body["code"], "book-not-found");
    assert_eq!(body["detail"], "book 42 does not exist");
    assert_eq!(
        body["links"]["about"],
        "https://docs.example.com/errors/book-not-found"
    );
}

#[tokio::test]
async fn malformed_id_points_at_the_parameter() {
    let (status, _, body) = send(app(), get("/books/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["source"]["parameter"], "id");
    assert_eq!(body["source"]["pointer"], "");
    assert_eq!(body["detail"], "'abc' is not a book id");
}

#[tokio::test]
async fn missing_field_points_at_the_attribute() {
    let (status, _, body) = send(app(), post("/books", r#"{ "title": "Dune" }"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "author-required");
    assert_eq!(body["source"]["pointer"], "/data/attributes/author");
    assert_eq!(body["detail"], "author is required");
}

#[tokio::test]
async fn invalid_json_is_a_bad_request() {
    let (status, _, body) = send(app(), post("/books", "{ nope")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-json");
    assert_eq!(body["title"], "Malformed request body");
}

#[tokio::test]
async fn valid_book_is_created() {
    let (status, _, body) = send(
        app(),
        post("/books", r#"{ "title": "Dune", "author": "Frank Herbert" }"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["author"], "Frank Herbert");
}

#[tokio::test]
async fn admin_challenges_missing_credentials() {
    let (status, headers, body) = send(app(), get("/admin")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers[header::WWW_AUTHENTICATE], r#"Bearer realm="errkit-demo""#);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn admin_rejects_wrong_token() {
    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, "Bearer guess")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        headers[header::WWW_AUTHENTICATE],
        r#"Bearer realm="errkit-demo", error="invalid token""#
    );
    assert_eq!(body["detail"], "invalid token");
}

#[tokio::test]
async fn admin_accepts_the_token() {
    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, "Bearer letmein")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "welcome");
}

#[tokio::test]
async fn outage_hides_the_cause() {
    let (status, _, body) = send(app(), get("/outage")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Service Unavailable");
    assert!(!body.to_string().contains("5432"));
}

#[tokio::test]
async fn every_kind_is_reachable_by_name() {
    for spec in &errkit::KIND_TABLE {
        let (status, _, body) = send(app(), get(&format!("/errors/{}", spec.name))).await;
        let expected = match spec.status {
            Some(code) => code,
            None if spec.name == "create" => 499,
            None => 500,
        };
        assert_eq!(status.as_u16(), expected, "{}", spec.name);
        assert_eq!(body["status"], expected.to_string(), "{}", spec.name);
    }
}

#[tokio::test]
async fn unknown_kind_is_a_bad_request() {
    let (status, _, body) = send(app(), get("/errors/boom")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "unknown error kind 'boom'");
    assert_eq!(body["source"]["parameter"], "kind");
}
