//! HTTP routes of the book catalog

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use errkit::{
    DispatchError, ErrorKind, ErrorResponder, InvocationOptions, JsonApiErrors, Source, args,
    bind_errors,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

const REALM: &str = "errkit-demo";
const ADMIN_TOKEN: &str = "Bearer letmein";

#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: u32,
    pub title: &'static str,
    pub author: &'static str,
}

pub static BOOKS: [Book; 3] = [
    Book {
        id: 1,
        title: "The Rust Programming Language",
        author: "Steve Klabnik",
    },
    Book {
        id: 2,
        title: "Programming Rust",
        author: "Jim Blandy",
    },
    Book {
        id: 3,
        title: "Rust for Rustaceans",
        author: "Jon Gjengset",
    },
];

#[derive(Debug, Error)]
#[error("book {id} does not exist")]
struct BookNotFound {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct NewBook {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
}

/// Catalog routes behind the error binder.
#[must_use]
pub fn router(errors: JsonApiErrors) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book))
        .route("/admin", get(admin))
        .route("/outage", get(outage))
        .route("/errors/{kind}", get(error_by_kind))
        .layer(middleware::from_fn_with_state(errors, bind_errors))
}

async fn list_books() -> Json<Value> {
    Json(json!({ "data": BOOKS }))
}

async fn get_book(
    Path(id): Path<String>,
    errors: ErrorResponder,
) -> Result<Response, DispatchError> {
    let Ok(id) = id.parse::<u32>() else {
        return errors.bad_request(args![InvocationOptions::default()
            .with_err(std::io::Error::other(format!("'{id}' is not a book id")))
            .with_code("invalid-id")
            .with_source(Source::parameter("id"))]);
    };

    match BOOKS.iter().find(|book| book.id == id) {
        Some(book) => Ok(Json(json!({ "data": book })).into_response()),
        None => errors.not_found(args![InvocationOptions::default()
            .with_err(BookNotFound { id })
            .with_code("book-not-found")]),
    }
}

async fn create_book(errors: ErrorResponder, body: Bytes) -> Result<Response, DispatchError> {
    let book: NewBook = match serde_json::from_slice(&body) {
        Ok(book) => book,
        Err(e) => {
            return errors.bad_request(args![InvocationOptions::default()
                .with_err(e)
                .with_code("invalid-json")
                .with_title("Malformed request body")]);
        }
    };

    let missing = [("title", &book.title), ("author", &book.author)]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
    if let Some((field, _)) = missing {
        return errors.bad_data(args![json!({
            "err": { "message": format!("{field} is required") },
            "code": format!("{field}-required"),
            "source": { "pointer": format!("/data/attributes/{field}") },
        })]);
    }

    tracing::info!(title = %book.title, "book accepted");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": { "title": book.title, "author": book.author } })),
    )
        .into_response())
}

async fn admin(headers: HeaderMap, errors: ErrorResponder) -> Result<Response, DispatchError> {
    let realm = json!({ "realm": REALM });
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        None => errors.unauthorized(args![Value::Null, "Bearer", realm]),
        Some(ADMIN_TOKEN) => Ok(Json(json!({ "data": "welcome" })).into_response()),
        Some(_) => errors.unauthorized(args!["invalid token", "Bearer", realm]),
    }
}

async fn outage(errors: ErrorResponder) -> Result<Response, DispatchError> {
    let cause: errkit_http::BoxError =
        Box::new(std::io::Error::other("connection refused (db:5432)"));
    errors.server_unavailable(args!["catalog store unreachable", cause])
}

async fn error_by_kind(
    Path(name): Path<String>,
    errors: ErrorResponder,
) -> Result<Response, DispatchError> {
    let kind = match name.parse::<ErrorKind>() {
        Ok(kind) => kind,
        Err(e) => {
            return errors.bad_request(args![InvocationOptions::default()
                .with_err(e)
                .with_source(Source::parameter("kind"))]);
        }
    };

    match kind {
        ErrorKind::Wrap => {
            let cause: errkit_http::BoxError =
                Box::new(std::io::Error::other("wrapped on request"));
            errors.wrap(args![cause])
        }
        ErrorKind::Create => errors.create(args![499, "custom status requested"]),
        other => errors.send(other, args![format!("{other} requested")]),
    }
}
