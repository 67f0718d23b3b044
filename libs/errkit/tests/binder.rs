#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use errkit::{
    APPLICATION_VND_API_JSON, DispatchError, DocsConfig, Document, ErrorKind, ErrorResponder,
    ErrorsConfig, InvocationOptions, JsonApiErrors, args, bind_errors,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`
use tracing_test::traced_test;

fn app(errors: JsonApiErrors) -> Router {
    Router::new()
        .route("/missing", get(missing))
        .route("/login", get(login))
        .route("/crash", get(crash))
        .route("/by-name/{kind}", get(by_name))
        .route("/document", get(document))
        .route("/bad-create", get(bad_create))
        .layer(middleware::from_fn_with_state(errors, bind_errors))
}

async fn missing(errors: ErrorResponder) -> Result<Response, DispatchError> {
    errors.not_found(args![
        InvocationOptions::default()
            .with_err(std::io::Error::other("no such book"))
            .with_code("book-404")
    ])
}

async fn login(errors: ErrorResponder) -> Result<Response, DispatchError> {
    errors.unauthorized(args!["expired", "Bearer", json!({ "realm": "books" })])
}

async fn crash(errors: ErrorResponder) -> Result<Response, DispatchError> {
    errors.internal(args![
        "db failure",
        Box::new(std::io::Error::other("connection refused")) as errkit_http::BoxError
    ])
}

async fn by_name(
    axum::extract::Path(kind): axum::extract::Path<String>,
    errors: ErrorResponder,
) -> Result<Response, DispatchError> {
    match kind.parse::<ErrorKind>() {
        Ok(kind) => errors.send(kind, args![format!("{kind} requested")]),
        Err(_) => errors.bad_request(args![format!("unknown kind {kind}")]),
    }
}

async fn bad_create(errors: ErrorResponder) -> Response {
    match errors.create(args!["x"]) {
        Ok(response) => response,
        Err(e) => (StatusCode::IM_A_TEAPOT, e.to_string()).into_response(),
    }
}

async fn document(errors: ErrorResponder) -> Document {
    let err = errors.errors().conflict(args!["duplicate"]).unwrap();
    Document::from(err)
}

async fn call(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, serde_json::from_slice(&bytes).unwrap())
}

fn docs_errors() -> JsonApiErrors {
    JsonApiErrors::new(ErrorsConfig {
        docs: DocsConfig::new("https://docs.example.com/errors"),
    })
}

#[tokio::test]
async fn bound_method_sends_status_and_payload() {
    let (status, headers, body) = call(app(docs_errors()), "/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["status"], "404");
    assert_eq!(body["detail"], "no such book");
    assert_eq!(body["code"], "book-404");
    assert_eq!(body["links"]["about"], "https://docs.example.com/errors/book-404");
}

#[tokio::test]
async fn challenge_header_is_sent() {
    let (status, headers, body) = call(app(JsonApiErrors::default()), "/login").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        headers[header::WWW_AUTHENTICATE],
        r#"Bearer realm="books", error="expired""#
    );
    assert_eq!(body["attributes"], json!({ "realm": "books", "error": "expired" }));
}

#[tokio::test]
async fn server_errors_hide_internal_message() {
    let (status, _, body) = call(app(JsonApiErrors::default()), "/crash").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "An internal server error occurred");
    assert_eq!(body["detail"], "Internal Server Error");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn send_by_kind_name() {
    let (status, _, body) = call(app(JsonApiErrors::default()), "/by-name/teapot").await;
    assert_eq!(status, StatusCode::IM_A_TEAPOT);
    assert_eq!(body["detail"], "teapot requested");

    let (status, _, body) = call(app(JsonApiErrors::default()), "/by-name/nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "unknown kind nope");
}

#[tokio::test]
async fn docs_url_changes_reach_bound_methods() {
    let errors = JsonApiErrors::default();
    let router = app(errors.clone());
    errors.set_docs_url("https://new.example.com");

    let (_, _, body) = call(router, "/missing").await;
    assert_eq!(body["links"]["about"], "https://new.example.com/book-404");
}

#[tokio::test]
async fn document_response() {
    let (status, headers, body) = call(app(JsonApiErrors::default()), "/document").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(headers[header::CONTENT_TYPE], APPLICATION_VND_API_JSON);
    assert_eq!(body["errors"][0]["detail"], "duplicate");
    assert!(body.get("statusCode").is_none());
}

#[tokio::test]
async fn handler_sees_rejected_arguments() {
    let response = app(JsonApiErrors::default())
        .oneshot(Request::builder().uri("/bad-create").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"First argument must be a number (400+): x");
}

#[tokio::test]
#[traced_test]
async fn returned_dispatch_error_is_logged_as_internal() {
    async fn broken(errors: ErrorResponder) -> Result<Response, DispatchError> {
        errors.create(args![200])
    }

    let router = Router::new()
        .route("/broken", get(broken))
        .layer(middleware::from_fn_with_state(JsonApiErrors::default(), bind_errors));
    let (status, _, body) = call(router, "/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal Server Error");
    assert!(logs_contain("failed to build error response"));
}

#[tokio::test]
#[traced_test]
async fn responder_without_middleware_is_an_internal_error() {
    let router = Router::new().route("/missing", get(missing));
    let (status, _, body) = call(router, "/missing").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "500");
    assert!(logs_contain("error binder misconfigured"));
}

#[tokio::test]
#[should_panic(expected = "error responder already installed on this request")]
async fn double_installation_fails_fast() {
    let errors = JsonApiErrors::default();
    let router = Router::new()
        .route("/missing", get(missing))
        .layer(middleware::from_fn_with_state(errors.clone(), bind_errors))
        .layer(middleware::from_fn_with_state(errors, bind_errors));

    router
        .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();
}
