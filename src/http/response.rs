//! Fixed responses produced outside of handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body of the fallback response for unmatched requests.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// The response returned when no route matches: 404 with a plain-text body.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// Generic answer of the server when a handler or middleware fails.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_plain_404() {
        let res = not_found();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Not Found");
    }
}
