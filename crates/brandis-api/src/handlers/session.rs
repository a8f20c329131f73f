// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session handlers.
//!
//! The credential itself is issued by the external authentication service.
//! These endpoints only place it in, or remove it from, the cookie channel.

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use brandis_core::Session;
use serde::Deserialize;

use crate::cookies::{clear_session_cookie, is_cookie_safe, session_cookie};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{CookieSession, ValidatedJson};
use crate::response::{ApiResponse, SessionResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Bearer credential issued by the authentication service.
    pub credential: String,
}

/// POST /api/session
///
/// Stores the credential in the session cookie and reports the role it
/// carries. A credential without a recognized role is still stored; the
/// guard will send its holder back to the login page.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, ApiResponse<SessionResponse>)> {
    let credential = request.credential.trim();
    if credential.is_empty() {
        return Err(ApiError::validation("credential", "cannot be empty"));
    }
    if !is_cookie_safe(credential) {
        return Err(ApiError::validation(
            "credential",
            "contains characters not allowed in a token",
        ));
    }

    let session = Session::from_credential(credential);
    match session.role() {
        Some(role) => tracing::info!(role = %role, "Session established"),
        None => tracing::warn!("Session established without a recognized role"),
    }

    let jar = jar.add(session_cookie(&state.config.cookie, credential));
    Ok((jar, ApiResponse::success(SessionResponse::from(&session))))
}

// =============================================================================
// Logout
// =============================================================================

/// POST /api/session/logout
///
/// Clears the session cookie. Idempotent.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<SessionResponse>) {
    tracing::info!("Session cleared");
    let jar = jar.add(clear_session_cookie(&state.config.cookie));
    (jar, ApiResponse::success(SessionResponse::from(&Session::empty())))
}

// =============================================================================
// Current Session
// =============================================================================

/// GET /api/session
///
/// Reports the role of the session carried by the request's cookie.
pub async fn current_session(
    CookieSession(session): CookieSession,
) -> ApiResponse<SessionResponse> {
    ApiResponse::success(SessionResponse::from(&session))
}
