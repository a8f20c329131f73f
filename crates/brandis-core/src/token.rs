// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Structural credential decoding.
//!
//! The bearer credential is a three-segment `header.payload.signature`
//! string whose payload is base64url JSON. This module reads the payload and
//! nothing else. It does **not** verify the signature: the backend re-checks
//! every resource call, and the route guard built on top of this is a
//! navigation convenience rather than a security boundary.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::TokenError;
use crate::role::Role;

// =============================================================================
// Claims
// =============================================================================

/// Claims read from an unverified credential.
///
/// Only `role` matters for access control. The other fields are surfaced for
/// display; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Claims {
    /// Raw `role` claim, if it was a string.
    pub role: Option<String>,
    /// Subject. Numeric subjects are rendered as strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration (Unix timestamp). Informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    fn from_object(object: &Map<String, JsonValue>) -> Self {
        let string = |key: &str| object.get(key).and_then(|v| v.as_str()).map(str::to_owned);

        Self {
            role: string("role"),
            sub: object.get("sub").and_then(|v| match v {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            name: string("name"),
            iat: object.get("iat").and_then(JsonValue::as_i64),
            exp: object.get("exp").and_then(JsonValue::as_i64),
        }
    }

    /// Returns the role, failing closed on missing or foreign values.
    pub fn role(&self) -> Result<Role, TokenError> {
        let raw = self.role.as_deref().ok_or(TokenError::MissingRole)?;
        Role::parse(raw).ok_or(TokenError::UnknownRole)
    }

    /// Returns the expiration time, if the credential carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Returns `true` if the credential carries an expiration in the past.
    ///
    /// The guard does not consult this.
    pub fn is_expired(&self) -> bool {
        self.exp.is_some_and(|exp| Utc::now().timestamp() > exp)
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes the claims of a credential without verifying it.
///
/// # Errors
///
/// Returns a [`TokenError`] describing why the credential is not a
/// three-segment token with a base64url JSON object payload.
pub fn decode_claims(credential: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = credential.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments {
            found: segments.len(),
        });
    }

    // Some encoders keep the padding; the alphabet is the same either way.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Base64)?;

    let value: JsonValue =
        serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| TokenError::Payload("not a JSON object".into()))?;

    Ok(Claims::from_object(object))
}

/// Decodes the role of a credential.
///
/// Never panics. Returns `None` if the credential is malformed, carries no
/// role claim, or carries a value outside the role set.
pub fn decode_role(credential: &str) -> Option<Role> {
    decode_claims(credential).ok()?.role().ok()
}

// =============================================================================
// Tests
// =============================================================================
