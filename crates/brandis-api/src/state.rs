// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use brandis_config::BrandisConfig;
use brandis_core::RouteGuard;

use crate::config::ApiConfig;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// The edge is stateless per request: the session always comes from the
/// request's cookie, so nothing here is mutable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Route guard.
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Builds the state from a loaded configuration.
    pub fn from_config(config: &BrandisConfig) -> Self {
        Self::builder()
            .config(ApiConfig::from_config(config))
            .guard(config.guard.build_guard())
            .build()
    }

    /// Returns the route guard.
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Returns the session cookie name.
    pub fn cookie_name(&self) -> &str {
        self.config.cookie_name()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Debug, Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    guard: Option<RouteGuard>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the route guard.
    pub fn guard(mut self, guard: RouteGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Builds the state. Unset parts take their defaults.
    pub fn build(self) -> AppState {
        AppState {
            config: Arc::new(self.config.unwrap_or_default()),
            guard: Arc::new(self.guard.unwrap_or_default()),
        }
    }
}
