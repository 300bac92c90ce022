//! Route handlers.
//!
//! A handler is anything implementing [`Handler`]. Async closures and
//! `async fn`s taking `(Request, RouteContext)` implement it automatically as
//! long as their output implements [`IntoReply`].

use std::future::Future;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;

use crate::error::BoxError;
use crate::routing::context::RouteContext;

/// What a handler resolves to.
pub type HandlerResult = Result<Response, BoxError>;

/// A route endpoint.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request, ctx: RouteContext) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request, RouteContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoReply,
{
    fn call(&self, req: Request, ctx: RouteContext) -> BoxFuture<'static, HandlerResult> {
        let fut = (self)(req, ctx);
        async move { fut.await.into_reply() }.boxed()
    }
}

/// Conversion from a handler's output into its final result.
///
/// `Err` values are passed through untouched; turning them into a response
/// is left to the server hosting the router.
pub trait IntoReply {
    fn into_reply(self) -> HandlerResult;
}

impl IntoReply for Response {
    fn into_reply(self) -> HandlerResult {
        Ok(self)
    }
}

impl IntoReply for String {
    fn into_reply(self) -> HandlerResult {
        Ok(self.into_response())
    }
}

impl IntoReply for &'static str {
    fn into_reply(self) -> HandlerResult {
        Ok(self.into_response())
    }
}

impl<T: IntoResponse> IntoReply for (StatusCode, T) {
    fn into_reply(self) -> HandlerResult {
        Ok(self.into_response())
    }
}

impl<T: Serialize> IntoReply for Json<T> {
    fn into_reply(self) -> HandlerResult {
        Ok(self.into_response())
    }
}

impl<T, E> IntoReply for Result<T, E>
where
    T: IntoReply,
    E: Into<BoxError>,
{
    fn into_reply(self) -> HandlerResult {
        self.map_err(Into::into)?.into_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::params::Params;
    use axum::body::{to_bytes, Body};

    fn ctx() -> RouteContext {
        RouteContext::new(Params::new(), "/")
    }

    async fn body_of(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn closure_returning_string_is_a_200() {
        let handler = |_req: Request, _ctx: RouteContext| async { String::from("hello") };
        let res = Handler::call(&handler, axum::http::Request::new(Body::empty()), ctx())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_of(res).await, "hello");
    }

    #[tokio::test]
    async fn status_tuple_sets_status() {
        let handler =
            |_req: Request, _ctx: RouteContext| async { (StatusCode::CREATED, "made") };
        let res = Handler::call(&handler, axum::http::Request::new(Body::empty()), ctx())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn errors_pass_through() {
        async fn failing(_req: Request, _ctx: RouteContext) -> Result<String, BoxError> {
            Err("database down".into())
        }
        let err = Handler::call(&failing, axum::http::Request::new(Body::empty()), ctx())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "database down");
    }
}
