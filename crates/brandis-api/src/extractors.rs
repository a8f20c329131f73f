// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use std::convert::Infallible;

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use brandis_core::Session;
use serde::de::DeserializeOwned;

use crate::cookies::session_from_headers;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Session Extractor
// =============================================================================

/// Extractor for the request's session.
///
/// Uses the session the route guard attached when the path is protected,
/// and otherwise reads the session cookie. Never rejects: a request without
/// a cookie carries an empty session.
///
/// ```rust,ignore
/// async fn handler(CookieSession(session): CookieSession) -> impl IntoResponse {
///     format!("{:?}", session.role())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CookieSession(pub Session);

impl FromRequestParts<AppState> for CookieSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(CookieSession(session.clone()));
        }
        Ok(CookieSession(session_from_headers(
            &parts.headers,
            state.cookie_name(),
        )))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// Extractor for JSON payloads that answers malformed input with an
/// [`ApiError`] body instead of axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        Ok(ValidatedJson(value))
    }
}
