// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Assertions with failure messages that name the path and role involved.

use axum::http::StatusCode;
use brandis_core::{Decision, Role};

use super::harness::TestResponse;

// =============================================================================
// Decision Assertions
// =============================================================================

/// Assertion extensions for guard decisions.
pub trait DecisionAssertions {
    /// Assert the navigation proceeds.
    fn assert_allowed(&self, path: &str, role: Option<Role>);

    /// Assert the navigation is redirected to `target`.
    fn assert_redirected(&self, path: &str, role: Option<Role>, target: &str);
}

impl DecisionAssertions for Decision {
    fn assert_allowed(&self, path: &str, role: Option<Role>) {
        assert_eq!(
            self,
            &Decision::Allow,
            "Expected {:?} to be allowed on {}, got {:?}",
            role,
            path,
            self
        );
    }

    fn assert_redirected(&self, path: &str, role: Option<Role>, target: &str) {
        assert_eq!(
            self.redirect_target(),
            Some(target),
            "Expected {:?} on {} to redirect to {}, got {:?}",
            role,
            path,
            target,
            self
        );
    }
}

// =============================================================================
// Response Assertions
// =============================================================================

/// Assertion extensions for HTTP responses.
pub trait ResponseAssertions {
    /// Assert a `303 See Other` to `target`.
    fn assert_see_other(&self, target: &str);

    /// Assert a `200 OK`.
    fn assert_ok(&self);

    /// Assert the session cookie is removed.
    fn assert_clears_session_cookie(&self);
}

impl ResponseAssertions for TestResponse {
    fn assert_see_other(&self, target: &str) {
        assert_eq!(
            self.status,
            StatusCode::SEE_OTHER,
            "Expected 303, got {} with body {:?}",
            self.status,
            self.body
        );
        assert_eq!(self.location(), Some(target));
    }

    fn assert_ok(&self) {
        assert_eq!(
            self.status,
            StatusCode::OK,
            "Expected 200, got {} with body {:?}",
            self.status,
            self.body
        );
    }

    fn assert_clears_session_cookie(&self) {
        let header = self
            .session_set_cookie()
            .expect("response does not touch the session cookie");
        assert_eq!(self.session_cookie_value().as_deref(), Some(""));
        assert!(
            header.contains("Max-Age=0"),
            "Expected an expiring cookie, got {}",
            header
        );
    }
}
