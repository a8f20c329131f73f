// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session-driven page behaviour: the post-login landing redirector and the
//! unauthorized page.

use serde::Serialize;
use tracing::{debug, warn};

use crate::role::Role;
use crate::session::SessionStore;

// =============================================================================
// Landing
// =============================================================================

/// What the landing page does on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "target", rename_all = "snake_case")]
pub enum Landing {
    /// Navigate to the role's dashboard.
    Navigate(&'static str),
    /// No role: stay on the loading state. Nothing ever moves the user on.
    Pending,
}

impl Landing {
    /// Resolves the landing outcome for an optional role.
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(role) => Landing::Navigate(role.dashboard_path()),
            None => Landing::Pending,
        }
    }
}

/// Resolves the landing outcome from the current session.
pub fn landing(store: &SessionStore) -> Landing {
    let outcome = Landing::for_role(store.current_role());
    debug!(?outcome, "Landing resolved");
    outcome
}

// =============================================================================
// Unauthorized
// =============================================================================

/// What the unauthorized page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnauthorizedNotice {
    /// Heading.
    pub title: &'static str,
    /// Explanation.
    pub message: &'static str,
    /// Label of the single available action.
    pub action_label: &'static str,
    /// Where the action leads.
    pub action_path: String,
}

impl UnauthorizedNotice {
    /// Builds the notice pointing back to the login path.
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            title: "Akses Ditolak",
            message: "Anda tidak memiliki izin untuk mengakses halaman ini. Silakan login kembali.",
            action_label: "Kembali ke Login",
            action_path: login_path.into(),
        }
    }
}

/// Displays the unauthorized page.
///
/// Displaying it always clears the session, even if the user would retry
/// with the same role: landing here forces a fresh login.
pub fn display_unauthorized(store: &SessionStore, login_path: &str) -> UnauthorizedNotice {
    if let Err(e) = store.logout() {
        warn!(error = %e, "Session not fully cleared on unauthorized page");
    }
    UnauthorizedNotice::new(login_path)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn credential(role: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(format!(r#"{{"role":"{role}"}}"#)))
    }

    #[test]
    fn test_landing_navigates_to_dashboard() {
        let store = SessionStore::in_memory();
        for role in Role::ALL {
            store.login(credential(role.as_str())).unwrap();
            assert_eq!(landing(&store), Landing::Navigate(role.dashboard_path()));
        }
    }

    #[test]
    fn test_landing_pending_without_role() {
        let store = SessionStore::in_memory();
        assert_eq!(landing(&store), Landing::Pending);

        store.login("not.a.token").unwrap();
        assert_eq!(landing(&store), Landing::Pending);
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let store = SessionStore::in_memory();
        store.login(credential("Manajer")).unwrap();

        let notice = display_unauthorized(&store, "/");
        assert_eq!(notice.action_path, "/");
        assert_eq!(store.current_role(), None);
        assert!(!store.snapshot().is_present());
    }

    #[test]
    fn test_landing_serialization() {
        let json = serde_json::to_string(&Landing::Navigate("/dashboard/manajer")).unwrap();
        assert_eq!(json, r#"{"state":"navigate","target":"/dashboard/manajer"}"#);
    }
}
