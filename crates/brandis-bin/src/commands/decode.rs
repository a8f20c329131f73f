// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `decode` command.

use brandis_core::{decode_claims, Claims, Role};
use serde::Serialize;

use crate::cli::DecodeArgs;
use crate::commands::emit;
use crate::error::BinResult;

/// Decoded view of a credential.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// Raw claims.
    pub claims: Claims,
    /// Recognized role, if the `role` claim is one.
    pub role: Option<Role>,
    /// The `exp` claim lies in the past. Informational: access control does
    /// not look at it.
    pub expired: bool,
}

impl DecodeReport {
    /// Decodes `credential`.
    pub fn new(credential: &str) -> BinResult<Self> {
        let claims = decode_claims(credential)?;
        Ok(Self {
            role: claims.role().ok(),
            expired: claims.is_expired(),
            claims,
        })
    }

    fn render(&self) -> String {
        let mut lines = vec![format!(
            "Role claim: {}",
            self.claims.role.as_deref().unwrap_or("-")
        )];
        lines.push(match self.role {
            Some(role) => format!("Recognized: {} -> {}", role, role.dashboard_path()),
            None => "Recognized: no (treated as logged out)".to_string(),
        });
        if let Some(sub) = &self.claims.sub {
            lines.push(format!("Subject:    {}", sub));
        }
        if let Some(name) = &self.claims.name {
            lines.push(format!("Name:       {}", name));
        }
        if let Some(exp) = self.claims.expires_at() {
            lines.push(format!(
                "Expires:    {}{}",
                exp.to_rfc3339(),
                if self.expired { " (expired)" } else { "" }
            ));
        }
        lines.join("\n")
    }
}

/// Executes the `decode` command.
pub fn decode(args: DecodeArgs) -> BinResult<()> {
    let report = DecodeReport::new(&args.credential)?;
    emit(args.format, &report, DecodeReport::render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn token(payload: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_report() {
        let report =
            DecodeReport::new(&token(r#"{"role":"Bendahara","sub":7,"exp":1}"#)).unwrap();
        assert_eq!(report.role, Some(Role::Bendahara));
        assert_eq!(report.claims.sub.as_deref(), Some("7"));
        assert!(report.expired);

        let text = report.render();
        assert!(text.contains("/dashboard/bendahara"));
        assert!(text.contains("(expired)"));
    }

    #[test]
    fn test_foreign_role_is_reported_unrecognized() {
        let report = DecodeReport::new(&token(r#"{"role":"admin"}"#)).unwrap();
        assert_eq!(report.role, None);
        assert!(report.render().contains("Recognized: no"));
    }

    #[test]
    fn test_malformed_credential_is_an_error() {
        let err = DecodeReport::new("only.two").unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }
}
