//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The maximum number of bytes of a request or response body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Some(body_text) = read_body_text(body).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let Some(body_text) = read_body_text(body).await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body) -> Option<String> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("Could not read body: {error}"))
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
}

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate_body(body: &str) -> &str {
    let end = body
        .char_indices()
        .map(|(index, c)| index + c.len_utf8())
        .take_while(|&end| end <= LOG_BODY_LENGTH_LIMIT)
        .last()
        .unwrap_or(0);

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}
