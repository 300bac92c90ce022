//! Global pre-routing hooks.
//!
//! A middleware takes ownership of the request and either hands it back
//! ([`Flow::Continue`]) or answers it ([`Flow::Respond`]). Answering stops the
//! chain: later middlewares and route matching are skipped.

use std::future::Future;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

use crate::error::BoxError;

/// A middleware's verdict.
#[derive(Debug)]
pub enum Flow {
    /// Keep processing with this request.
    Continue(Request),
    /// Stop and return this response.
    Respond(Response),
}

impl Flow {
    /// Short-circuit with `response`.
    pub fn respond(response: impl IntoResponse) -> Self {
        Flow::Respond(response.into_response())
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Flow::Continue(_))
    }
}

/// A pre-processing hook run before route matching.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture<'static, Result<Flow, BoxError>>;
}

impl<F, Fut, R> Middleware for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoFlow,
{
    fn call(&self, req: Request) -> BoxFuture<'static, Result<Flow, BoxError>> {
        let fut = (self)(req);
        async move { fut.await.into_flow() }.boxed()
    }
}

/// Conversion from a middleware's output into a [`Flow`].
pub trait IntoFlow {
    fn into_flow(self) -> Result<Flow, BoxError>;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(self)
    }
}

impl<E: Into<BoxError>> IntoFlow for Result<Flow, E> {
    fn into_flow(self) -> Result<Flow, BoxError> {
        self.map_err(Into::into)
    }
}
