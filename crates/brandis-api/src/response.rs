// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brandis_core::{Landing, ResolvedEntry, Role, Session};
use serde::{Deserialize, Serialize};

// =============================================================================
// ApiResponse
// =============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful.
    pub success: bool,
    /// Response data (if successful).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response with data.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// =============================================================================
// Session
// =============================================================================

/// Session state as reported to clients. Never includes the credential.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// A credential is held.
    pub authenticated: bool,
    /// Role decoded from the credential; `null` for a present credential
    /// that carries no recognized role.
    pub role: Option<Role>,
    /// The role's dashboard.
    pub dashboard: Option<&'static str>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let role = session.role();
        Self {
            authenticated: session.is_present(),
            role,
            dashboard: role.map(|r| r.dashboard_path()),
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Menu entries for the session's role.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationResponse {
    /// Role the menu was resolved for.
    pub role: Option<Role>,
    /// Visible entries, in display order.
    pub entries: Vec<ResolvedEntry>,
}

impl NavigationResponse {
    /// Resolves the menu for an optional role. No role sees no entries.
    pub fn for_role(role: Option<Role>) -> Self {
        Self {
            role,
            entries: role
                .map(|r| brandis_core::visible_entries(r).collect())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

/// Descriptor handed to the rendering layer for a page the guard let through.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    /// Requested path.
    pub path: String,
    /// Viewer's role.
    pub role: Option<Role>,
    /// Viewer's menu.
    pub navigation: Vec<ResolvedEntry>,
}

/// Body of the landing page while it waits for a role.
#[derive(Debug, Clone, Serialize)]
pub struct LandingResponse {
    /// Landing state.
    pub landing: Landing,
    /// Text shown while waiting.
    pub message: &'static str,
}

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Response timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: crate::VERSION.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}
