//! Header-based access control.
//!
//! Rejects requests lacking a header before any route is matched. Only
//! presence is checked; validating the value belongs to the handler or a
//! dedicated middleware.

use axum::extract::Request;
use axum::http::{HeaderName, StatusCode};

use crate::routing::{Flow, Middleware};

/// Short-circuit with 401 Unauthorized when `header` is missing.
pub fn require_header(header: HeaderName) -> impl Middleware {
    move |req: Request| {
        let present = req.headers().contains_key(&header);
        if !present {
            tracing::debug!(
                header = %header,
                path = %req.uri().path(),
                "Rejecting request without required header"
            );
        }
        async move {
            if present {
                Flow::Continue(req)
            } else {
                Flow::respond((StatusCode::UNAUTHORIZED, "Unauthorized"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::AUTHORIZATION;

    fn request(auth: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/books/1");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let middleware = require_header(AUTHORIZATION);
        match Middleware::call(&middleware, request(None)).await.unwrap() {
            Flow::Respond(res) => assert_eq!(res.status(), StatusCode::UNAUTHORIZED),
            Flow::Continue(_) => panic!("request without header must be rejected"),
        }
    }

    #[tokio::test]
    async fn present_header_continues() {
        let middleware = require_header(AUTHORIZATION);
        let flow = Middleware::call(&middleware, request(Some("Bearer token")))
            .await
            .unwrap();
        assert!(flow.is_continue());
    }
}
