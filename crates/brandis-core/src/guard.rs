// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Protected route table and route guard.
//!
//! The guard decides, before any page content is produced, whether a
//! navigation proceeds or is redirected. It never mutates the session: a
//! rejection does not log anyone out. Only displaying the unauthorized page
//! does (see [`crate::pages`]).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::role::{Role, RoleSet};
use crate::session::Session;
use crate::token::decode_role;

/// Default unauthenticated redirect target.
pub const DEFAULT_LOGIN_PATH: &str = "/";

/// Default wrong-role redirect target.
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

// =============================================================================
// MatchMode
// =============================================================================

/// How request paths are matched against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Only the listed path itself is protected.
    Exact,
    /// The listed path and everything below it, at segment boundaries. The
    /// longest matching rule wins.
    #[default]
    Prefix,
}

impl MatchMode {
    /// Returns the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Prefix => "prefix",
        }
    }

    /// Parses a mode name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Some(MatchMode::Exact),
            "prefix" => Some(MatchMode::Prefix),
            _ => None,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RouteTable
// =============================================================================

/// A protected path and the roles allowed through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Protected path.
    pub path: String,
    /// Roles permitted on the path.
    pub roles: RoleSet,
}

/// Static mapping from protected path to permitted roles.
///
/// Paths that match no rule are unprotected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    mode: MatchMode,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new(mode: MatchMode) -> Self {
        Self {
            rules: Vec::new(),
            mode,
        }
    }

    /// The Brandis dashboard's protected routes.
    pub fn brandis(mode: MatchMode) -> Self {
        use Role::*;

        Self::new(mode)
            .protect("/userManagement", &[Pimpinan])
            .protect("/dashboard/pimpinan", &[Pimpinan])
            .protect("/dashboard/manajer", &[Manajer])
            .protect("/dashboard/pemasaran", &[Pemasaran])
            .protect("/dashboard/bendahara", &[Bendahara])
            .protect("/products", &[Pimpinan, Manajer, Pemasaran, Bendahara])
            .protect("/outlets", &[Pimpinan, Manajer, Pemasaran])
            .protect("/financialReports", &[Pimpinan, Bendahara])
            .protect("/inventory/stockManagement", &[Pimpinan, Manajer])
            .protect("/inventory/batchManagement", &[Pimpinan, Manajer])
            .protect("/inventory", &[Pimpinan, Manajer])
    }

    /// Adds a rule. A later rule for the same path replaces the earlier one.
    pub fn protect(mut self, path: impl Into<String>, roles: &[Role]) -> Self {
        let rule = RouteRule {
            path: path.into(),
            roles: RoleSet::of(roles),
        };
        match self.rules.iter_mut().find(|r| r.path == rule.path) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// Returns the match mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the rules in insertion order.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Finds the rule governing a path.
    pub fn lookup(&self, path: &str) -> Option<&RouteRule> {
        match self.mode {
            MatchMode::Exact => self.rules.iter().find(|r| r.path == path),
            MatchMode::Prefix => self
                .rules
                .iter()
                .filter(|r| covers(&r.path, path))
                .max_by_key(|r| r.path.len()),
        }
    }

    /// Returns `true` if the edge layer must intercept this path.
    pub fn is_guarded(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::brandis(MatchMode::default())
    }
}

fn covers(rule: &str, path: &str) -> bool {
    match path.strip_prefix(rule) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rule.ends_with('/'),
        None => false,
    }
}

// =============================================================================
// Decision
// =============================================================================

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum Decision {
    /// Let the navigation through.
    Allow,
    /// Send the navigation elsewhere.
    RedirectTo(String),
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Returns the redirect target, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(target) => Some(target),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => f.write_str("allow"),
            Decision::RedirectTo(target) => write!(f, "redirect to {target}"),
        }
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// Evaluates navigations against the route table.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: Arc<RouteTable>,
    login_path: String,
    unauthorized_path: String,
}

impl RouteGuard {
    /// Creates a guard with the default redirect targets.
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            unauthorized_path: DEFAULT_UNAUTHORIZED_PATH.to_string(),
        }
    }

    /// Sets the unauthenticated redirect target.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Sets the wrong-role redirect target.
    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }

    /// Returns the route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns the unauthenticated redirect target.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the wrong-role redirect target.
    pub fn unauthorized_path(&self) -> &str {
        &self.unauthorized_path
    }

    /// Decides whether a navigation to `path` proceeds.
    ///
    /// The role is decoded again from the session's credential rather than
    /// taken from the session, so a stale cached role cannot leak through.
    pub fn authorize(&self, path: &str, session: &Session) -> Decision {
        let Some(credential) = session.credential() else {
            debug!(path, "No credential, redirecting to login");
            return Decision::RedirectTo(self.login_path.clone());
        };

        let Some(role) = decode_role(credential.as_str()) else {
            debug!(path, "Credential has no recognized role, redirecting to login");
            return Decision::RedirectTo(self.login_path.clone());
        };

        let Some(rule) = self.table.lookup(path) else {
            return Decision::Allow;
        };

        if rule.roles.contains(role) {
            debug!(path, role = %role, rule = %rule.path, "Navigation allowed");
            Decision::Allow
        } else {
            debug!(path, role = %role, rule = %rule.path, "Role not permitted");
            Decision::RedirectTo(self.unauthorized_path.clone())
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
