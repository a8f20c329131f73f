// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Credentials shaped like the ones the authentication service issues:
//! HS256-signed, three dot-separated segments, with a `role` claim. The
//! signing key is a test constant; nothing under test verifies it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use brandis_core::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

/// Key the fixtures sign with.
pub const TEST_SIGNING_KEY: &[u8] = b"brandis-test-signing-key";

// =============================================================================
// Credential Fixtures
// =============================================================================

/// Fixture providing credentials.
pub struct CredentialFixtures;

impl CredentialFixtures {
    /// Signs an arbitrary claims object.
    pub fn signed(claims: &Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(TEST_SIGNING_KEY),
        )
        .expect("failed to sign test credential")
    }

    /// A valid credential for `role`, expiring in one hour.
    pub fn for_role(role: Role) -> String {
        Self::with_role_claim(json!(role.as_str()))
    }

    /// A credential whose `role` claim is `value`, verbatim.
    pub fn with_role_claim(value: Value) -> String {
        let now = Utc::now();
        Self::signed(&json!({
            "sub": "user-001",
            "name": "Test User",
            "role": value,
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
        }))
    }

    /// A credential for `role` that expired an hour ago.
    pub fn expired(role: Role) -> String {
        let now = Utc::now();
        Self::signed(&json!({
            "sub": "user-001",
            "role": role.as_str(),
            "iat": (now - Duration::hours(2)).timestamp(),
            "exp": (now - Duration::hours(1)).timestamp(),
        }))
    }

    /// A credential without a `role` claim.
    pub fn without_role() -> String {
        Self::signed(&json!({ "sub": "user-001" }))
    }

    /// A credential whose role is outside the business role set.
    pub fn foreign_role() -> String {
        Self::with_role_claim(json!("Administrator"))
    }

    /// Three segments whose payload is `payload`, encoded but not JSON-checked.
    pub fn raw_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    /// Strings that do not decode to any claims.
    pub fn malformed() -> Vec<String> {
        vec![
            String::new(),
            "not-a-token".to_string(),
            "only.two".to_string(),
            "a.b.c.d".to_string(),
            "header.%%%.signature".to_string(),
            Self::raw_payload("not json"),
            Self::raw_payload("[1,2,3]"),
            Self::raw_payload("\"Pimpinan\""),
        ]
    }
}

// =============================================================================
// Route Fixtures
// =============================================================================

/// Fixture providing the expected access matrix.
pub struct RouteFixtures;

impl RouteFixtures {
    /// Every protected path with the roles permitted on it.
    pub fn access_matrix() -> Vec<(&'static str, Vec<Role>)> {
        use Role::*;
        vec![
            ("/userManagement", vec![Pimpinan]),
            ("/dashboard/pimpinan", vec![Pimpinan]),
            ("/dashboard/manajer", vec![Manajer]),
            ("/dashboard/pemasaran", vec![Pemasaran]),
            ("/dashboard/bendahara", vec![Bendahara]),
            ("/products", vec![Pimpinan, Manajer, Pemasaran, Bendahara]),
            ("/outlets", vec![Pimpinan, Manajer, Pemasaran]),
            ("/financialReports", vec![Pimpinan, Bendahara]),
            ("/inventory/stockManagement", vec![Pimpinan, Manajer]),
            ("/inventory/batchManagement", vec![Pimpinan, Manajer]),
        ]
    }

    /// Paths no rule covers.
    pub fn unlisted_paths() -> Vec<&'static str> {
        vec!["/", "/unauthorized", "/settings", "/productsArchive", "/health"]
    }
}
