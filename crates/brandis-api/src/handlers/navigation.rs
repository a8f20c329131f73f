// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation handler.

use crate::extractors::CookieSession;
use crate::response::{ApiResponse, NavigationResponse};

/// GET /api/navigation
///
/// Menu entries visible to the session's role. Empty without a role.
pub async fn navigation(
    CookieSession(session): CookieSession,
) -> ApiResponse<NavigationResponse> {
    ApiResponse::success(NavigationResponse::for_role(session.role()))
}
