// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `authorize` command.

use brandis_config::BrandisConfig;
use brandis_core::{display_unauthorized, Decision, Session};

use crate::cli::{AuthorizeArgs, OutputFormat};
use crate::commands::{open_store, to_json};
use crate::error::BinResult;

/// Evaluates the route guard for `path`.
///
/// With a credential the decision is computed for that credential alone.
/// Without one it is computed for the stored session, and a redirect to the
/// unauthorized page is followed: showing that page clears the stored
/// session, exactly as it does in the browser.
pub fn evaluate(config: &BrandisConfig, path: &str, credential: Option<&str>) -> Decision {
    let guard = config.guard.build_guard();

    let Some(credential) = credential else {
        let store = open_store(config);
        let decision = guard.authorize(path, &store.snapshot());
        if decision.redirect_target() == Some(guard.unauthorized_path()) {
            display_unauthorized(&store, guard.login_path());
        }
        return decision;
    };

    guard.authorize(path, &Session::from_credential(credential))
}

/// Executes the `authorize` command.
pub fn authorize(config: &BrandisConfig, args: AuthorizeArgs) -> BinResult<()> {
    let decision = evaluate(config, &args.path, args.credential.as_deref());

    match args.format {
        OutputFormat::Text => match &decision {
            Decision::Allow => println!("allow {}", args.path),
            Decision::RedirectTo(target) => println!("redirect {} -> {}", args.path, target),
        },
        OutputFormat::Json => println!("{}", to_json(&decision)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use brandis_core::Role;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> BrandisConfig {
        let mut config = BrandisConfig::default();
        config.session.storage_path = dir.path().join("session.json");
        config
    }

    fn credential(role: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(format!(r#"{{"role":"{role}"}}"#)))
    }

    #[test]
    fn test_explicit_credential() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        assert_eq!(
            evaluate(&config, "/outlets", Some(&credential("Pemasaran"))),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&config, "/outlets", Some(&credential("Bendahara"))),
            Decision::RedirectTo("/unauthorized".into())
        );
        assert_eq!(
            evaluate(&config, "/outlets", Some("garbage")),
            Decision::RedirectTo("/".into())
        );
    }

    #[test]
    fn test_stored_session_denial_clears_session() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        open_store(&config).login(credential("Manajer")).unwrap();

        assert_eq!(evaluate(&config, "/inventory", None), Decision::Allow);
        assert_eq!(open_store(&config).current_role(), Some(Role::Manajer));

        assert_eq!(
            evaluate(&config, "/dashboard/pimpinan", None),
            Decision::RedirectTo("/unauthorized".into())
        );
        assert_eq!(open_store(&config).current_role(), None);
    }

    #[test]
    fn test_no_stored_session() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            evaluate(&config(&dir), "/products", None),
            Decision::RedirectTo("/".into())
        );
    }
}
