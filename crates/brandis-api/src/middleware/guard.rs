// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Edge route guard middleware.
//!
//! Runs before page handlers on every path the route table protects. The
//! session comes from the request's cookie; the decision is the route
//! guard's. Paths the table does not list pass through untouched.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Redirect, Response},
};
use brandis_core::{Decision, RouteGuard};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

use crate::cookies::session_from_headers;

// =============================================================================
// GuardLayer
// =============================================================================

/// Layer that applies the route guard at the edge.
#[derive(Debug, Clone)]
pub struct GuardLayer {
    guard: Arc<RouteGuard>,
    cookie_name: Arc<str>,
}

impl GuardLayer {
    /// Creates a new guard layer reading the session from `cookie_name`.
    pub fn new(guard: Arc<RouteGuard>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            guard,
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            guard: self.guard.clone(),
            cookie_name: self.cookie_name.clone(),
        }
    }
}

// =============================================================================
// GuardMiddleware
// =============================================================================

/// Middleware that redirects navigations the route guard rejects.
#[derive(Debug, Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    guard: Arc<RouteGuard>,
    cookie_name: Arc<str>,
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();

        if !self.guard.table().is_guarded(&path) {
            let future = self.inner.call(req);
            return Box::pin(future);
        }

        let session = session_from_headers(req.headers(), &self.cookie_name);
        let decision = self.guard.authorize(&path, &session);

        let request_id = Uuid::now_v7();
        let span = tracing::debug_span!("route_guard", %request_id, path = %path);

        match decision {
            Decision::Allow => {
                span.in_scope(|| tracing::debug!(role = ?session.role(), "Navigation allowed"));
                req.extensions_mut().insert(session);
                let future = self.inner.call(req);
                Box::pin(future.instrument(span))
            }
            Decision::RedirectTo(target) => {
                span.in_scope(|| {
                    tracing::info!(
                        role = ?session.role(),
                        target = %target,
                        "Navigation redirected"
                    );
                });
                Box::pin(async move { Ok(Redirect::to(&target).into_response()) })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
