// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session cookie: the copy of the credential the edge guard reads.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use brandis_config::CookieConfig;
use brandis_core::Session;
use time::Duration;

/// Creates the session cookie carrying `credential`.
pub fn session_cookie(config: &CookieConfig, credential: &str) -> Cookie<'static> {
    Cookie::build((config.name.clone(), credential.to_string()))
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(i64::from(config.max_age_days)))
        .build()
}

/// Returns `true` if `value` can be carried verbatim as a cookie value:
/// visible ASCII other than `"`, `,`, `;` and `\`.
pub fn is_cookie_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}

/// Creates the removal cookie for the session.
pub fn clear_session_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((config.name.clone(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

/// Reads the session from a cookie jar. A missing or empty cookie is no
/// session.
pub fn session_from_jar(jar: &CookieJar, name: &str) -> Session {
    Session::from_optional(jar.get(name).map(|c| c.value()))
}

/// Reads the session from raw request headers.
pub fn session_from_headers(headers: &HeaderMap, name: &str) -> Session {
    session_from_jar(&CookieJar::from_headers(headers), name)
}
