// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Page handlers.
//!
//! Pages are rendered elsewhere. By the time a protected page handler runs,
//! the guard layer has already let the navigation through, so these only
//! describe what to render.

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use brandis_core::{Landing, UnauthorizedNotice};

use crate::cookies::clear_session_cookie;
use crate::error::ApiError;
use crate::extractors::CookieSession;
use crate::response::{LandingResponse, NavigationResponse, PageResponse};
use crate::state::AppState;

/// GET /dashboard
///
/// Sends the viewer on to their role's dashboard. Without a role the page
/// stays in its loading state.
pub async fn landing(CookieSession(session): CookieSession) -> Response {
    match Landing::for_role(session.role()) {
        Landing::Navigate(target) => Redirect::to(target).into_response(),
        pending @ Landing::Pending => Json(LandingResponse {
            landing: pending,
            message: "Loading...",
        })
        .into_response(),
    }
}

/// GET /unauthorized
///
/// Clears the session cookie and explains the denial. Reaching this page
/// always forces a fresh login.
pub async fn unauthorized(
    State(state): State<AppState>,
    CookieSession(session): CookieSession,
    jar: CookieJar,
) -> (CookieJar, Json<UnauthorizedNotice>) {
    tracing::info!(role = ?session.role(), "Unauthorized page shown, clearing session");
    let jar = jar.add(clear_session_cookie(&state.config.cookie));
    (jar, Json(UnauthorizedNotice::new(state.guard().login_path())))
}

/// GET /
///
/// The login page. Any role the request already carries is reported so the
/// client can skip the form.
pub async fn login_page(uri: Uri, CookieSession(session): CookieSession) -> Json<PageResponse> {
    Json(PageResponse {
        path: uri.path().to_string(),
        role: session.role(),
        navigation: Vec::new(),
    })
}

/// GET on a protected page.
pub async fn page(uri: Uri, CookieSession(session): CookieSession) -> Json<PageResponse> {
    let role = session.role();
    Json(PageResponse {
        path: uri.path().to_string(),
        role,
        navigation: NavigationResponse::for_role(role).entries,
    })
}

/// Fallback for unrouted paths.
///
/// In prefix mode the guard protects whole subtrees, so sub-paths of a
/// protected page are pages too.
pub async fn fallback(
    State(state): State<AppState>,
    uri: Uri,
    session: CookieSession,
) -> Response {
    if state.guard().table().is_guarded(uri.path()) {
        page(uri, session).await.into_response()
    } else {
        ApiError::not_found(uri.path()).into_response()
    }
}
