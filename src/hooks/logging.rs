//! Request logging middleware.

use axum::extract::Request;

use crate::http::request::RequestIdExt;
use crate::routing::{Flow, Middleware};

/// Log method, URI and request ID of every request, then continue.
pub fn log_requests() -> impl Middleware {
    |req: Request| async move {
        tracing::info!(
            request_id = req.request_id().unwrap_or("unknown"),
            method = %req.method(),
            uri = %req.uri(),
            "Incoming request"
        );
        Flow::Continue(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn always_continues() {
        let middleware = log_requests();
        let req = axum::http::Request::builder()
            .uri("/books/1?full=true")
            .body(Body::empty())
            .unwrap();
        let flow = Middleware::call(&middleware, req).await.unwrap();
        match flow {
            Flow::Continue(req) => assert_eq!(req.uri().path(), "/books/1"),
            Flow::Respond(_) => panic!("logger must not answer requests"),
        }
    }
}
