//! Route table and dispatch.
//!
//! # Responsibilities
//! - Store routes and middlewares in registration order
//! - Compile path templates at registration time
//! - Run the middleware chain, then select the first matching route
//! - Fall back to a fixed 404 when nothing matches
//!
//! # Design Decisions
//! - Registration takes `&mut self`, dispatch takes `&self`: once the router
//!   is shared behind an `Arc` it can no longer change
//! - First match wins; overlapping routes are never reordered by specificity
//! - Handler and middleware errors are returned as-is, never recovered here

use std::fmt;
use std::time::Instant;

use axum::extract::Request;
use axum::http::Method;
use axum::response::Response;

use crate::error::{BoxError, RouterError};
use crate::http::response::not_found;
use crate::observability::metrics;
use crate::routing::context::RouteContext;
use crate::routing::handler::Handler;
use crate::routing::middleware::{Flow, Middleware};
use crate::routing::pattern::Pattern;
use crate::routing::route::Route;

/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Matched,
    ShortCircuit,
    NotFound,
    Error,
}

impl Outcome {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::ShortCircuit => "short_circuit",
            Outcome::NotFound => "not_found",
            Outcome::Error => "error",
        }
    }
}

/// An ordered route table with global middleware.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` requests whose path matches `path`.
    ///
    /// Fails if `path` is not a valid template. `method` is compared verbatim
    /// against the request method, so any string is accepted.
    pub fn register<H: Handler>(
        &mut self,
        method: impl Into<String>,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError> {
        let pattern = Pattern::compile(path)?;
        let route = Route::new(method, pattern, handler);
        tracing::debug!(
            method = %route.method(),
            pattern = %route.pattern(),
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(route);
        Ok(self)
    }

    pub fn get<H: Handler>(&mut self, path: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register(Method::GET.as_str(), path, handler)
    }

    pub fn post<H: Handler>(&mut self, path: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register(Method::POST.as_str(), path, handler)
    }

    pub fn put<H: Handler>(&mut self, path: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register(Method::PUT.as_str(), path, handler)
    }

    pub fn patch<H: Handler>(&mut self, path: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register(Method::PATCH.as_str(), path, handler)
    }

    pub fn delete<H: Handler>(&mut self, path: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.register(Method::DELETE.as_str(), path, handler)
    }

    /// Append a middleware. Middlewares run in the order they were added.
    pub fn middleware<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.middlewares.push(Box::new(middleware));
        tracing::debug!(position = self.middlewares.len() - 1, "Middleware registered");
        self
    }

    /// Registered routes as `(method, template)` in match order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes
            .iter()
            .map(|r| (r.method(), r.pattern().as_str()))
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Produce the response for one request.
    ///
    /// Errors raised by a middleware or handler are returned unchanged.
    pub async fn serve(&self, req: Request) -> Result<Response, BoxError> {
        let start = Instant::now();
        let result = self.dispatch(req).await;
        let outcome = match &result {
            Ok((outcome, _)) => *outcome,
            Err(_) => Outcome::Error,
        };
        metrics::record_dispatch(outcome.as_str(), start);
        result.map(|(_, response)| response)
    }

    async fn dispatch(&self, mut req: Request) -> Result<(Outcome, Response), BoxError> {
        for (index, middleware) in self.middlewares.iter().enumerate() {
            match Middleware::call(middleware.as_ref(), req).await? {
                Flow::Continue(next) => req = next,
                Flow::Respond(response) => {
                    tracing::trace!(middleware = index, "Middleware answered request");
                    return Ok((Outcome::ShortCircuit, response));
                }
            }
        }

        let found = self.routes.iter().find_map(|route| {
            route
                .matches(req.method().as_str(), req.uri().path())
                .map(|params| (route, params))
        });

        match found {
            Some((route, params)) => {
                tracing::trace!(
                    method = %route.method(),
                    pattern = %route.pattern(),
                    "Route matched"
                );
                let ctx = RouteContext::new(params, route.pattern().as_str());
                let response = route.handler().call(req, ctx).await?;
                Ok((Outcome::Matched, response))
            }
            None => {
                tracing::trace!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    "No route matched"
                );
                Ok((Outcome::NotFound, not_found()))
            }
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}
