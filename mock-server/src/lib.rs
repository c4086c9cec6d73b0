use std::collections::BTreeMap;

use axum::{
    extract::{Path, RawQuery},
    http::{header, HeaderMap, Method, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// The first bytes of a PNG file; served as the binary fixture.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0xff, 0x00,
];

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/text", get(text))
        .route("/json", get(json_document))
        .route("/binary", get(binary))
        .route("/octet", get(octet))
        .route("/cookies", get(cookies))
        .route("/echo", any(echo))
        .route("/redirect", get(redirect))
        .route("/status/{code}", get(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn text() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "hello")
}

async fn json_document() -> Json<Value> {
    Json(json!({ "id": 1, "title": "delectus aut autem", "completed": false }))
}

async fn binary() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES)
}

async fn octet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        b"hi".as_slice(),
    )
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, "a=1"), (header::SET_COOKIE, "b=2")]),
        "cookies",
    )
}

async fn echo(
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let mut joined: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        joined
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    tracing::debug!(%method, "echo");
    Json(Echo {
        method: method.to_string(),
        query,
        headers: joined,
        body,
    })
}

async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/text")])
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}
