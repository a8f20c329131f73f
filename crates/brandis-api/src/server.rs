// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::GuardLayer;
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Creates the router with all routes and middleware.
    ///
    /// Every path in the route table gets a page route. The guard layer
    /// wraps the fallback too, so protected sub-paths are guarded in prefix
    /// mode. The login and unauthorized pages are served at the guard's
    /// redirect targets, which configuration validation keeps clear of the
    /// other routes.
    pub fn router(&self) -> Router {
        let guard = GuardLayer::new(self.state.guard.clone(), self.state.cookie_name());

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.state.config.request_timeout,
            ))
            .layer(guard);

        let targets = self.state.guard();

        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .route(targets.login_path(), get(handlers::login_page))
            .route("/dashboard", get(handlers::landing))
            .route(targets.unauthorized_path(), get(handlers::unauthorized))
            .route(
                "/api/session",
                get(handlers::current_session).post(handlers::login),
            )
            .route("/api/session/logout", post(handlers::logout))
            .route("/api/navigation", get(handlers::navigation));

        for rule in self.state.guard().table().rules() {
            router = router.route(&rule.path, get(handlers::page));
        }

        router
            .fallback(handlers::fallback)
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server until `shutdown_signal` resolves.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.state.config.socket_addr()
    }
}

// =============================================================================
// Tests
// =============================================================================
