//! `tower::Service` adapter around the router.
//!
//! This is the seam where a server library hosts the router. Failures that
//! the router passes through are turned into a generic 500 here, the same
//! way any HTTP server treats an unhandled error.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::Response;
use futures_util::future::{BoxFuture, FutureExt};
use tower::Service;

use crate::http::request::RequestIdExt;
use crate::http::response::internal_error;
use crate::routing::Router;

/// A cloneable, infallible service dispatching through a shared [`Router`].
#[derive(Debug, Clone)]
pub struct DispatchService {
    router: Arc<Router>,
}

impl DispatchService {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl Router {
    /// Freeze the router and wrap it in a [`DispatchService`].
    pub fn into_service(self) -> DispatchService {
        DispatchService::new(Arc::new(self))
    }
}

impl Service<Request> for DispatchService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let router = Arc::clone(&self.router);
        async move {
            let request_id = req.request_id().unwrap_or("unknown").to_string();
            let method = req.method().clone();
            let path = req.uri().path().to_string();

            match router.serve(req).await {
                Ok(response) => Ok(response),
                Err(e) => {
                    tracing::error!(
                        request_id = %request_id,
                        method = %method,
                        path = %path,
                        error = %e,
                        "Request failed"
                    );
                    Ok(internal_error())
                }
            }
        }
        .boxed()
    }
}
