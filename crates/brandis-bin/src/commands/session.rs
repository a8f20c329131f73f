// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `session` commands.

use std::path::PathBuf;

use brandis_config::BrandisConfig;
use brandis_core::{landing, Landing, Role, Session, SessionStore};
use serde::Serialize;

use crate::cli::SessionCommand;
use crate::commands::{emit, open_store};
use crate::error::BinResult;

/// What `session status` reports. The credential itself is never shown.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// A credential is stored.
    pub authenticated: bool,
    /// Role decoded from the stored credential.
    pub role: Option<Role>,
    /// Where the landing page sends this session.
    pub landing: Landing,
    /// Durable storage file.
    pub storage: PathBuf,
}

impl SessionReport {
    /// Builds the report for the store's current session.
    pub fn new(store: &SessionStore, config: &BrandisConfig) -> Self {
        let session: Session = store.snapshot();
        Self {
            authenticated: session.is_present(),
            role: session.role(),
            landing: landing(store),
            storage: config.session.storage_path.clone(),
        }
    }

    fn render(&self) -> String {
        let role = self
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let landing = match self.landing {
            Landing::Navigate(path) => path.to_string(),
            Landing::Pending => "pending".to_string(),
        };
        format!(
            "Authenticated: {}\nRole:          {}\nLanding:       {}\nStorage:       {}",
            if self.authenticated { "yes" } else { "no" },
            role,
            landing,
            self.storage.display()
        )
    }
}

/// Executes a `session` subcommand.
pub fn session(config: &BrandisConfig, command: SessionCommand) -> BinResult<()> {
    let store = open_store(config);

    match command {
        SessionCommand::Login(args) => {
            let session = store.login(args.credential)?;
            match session.role() {
                Some(role) => println!("Logged in as {} ({})", role, role.dashboard_path()),
                None => println!("Credential stored, but it carries no recognized role"),
            }
        }
        SessionCommand::Logout => {
            store.logout()?;
            println!("Logged out");
        }
        SessionCommand::Status(args) => {
            let report = SessionReport::new(&store, config);
            emit(args.format, &report, SessionReport::render)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> BrandisConfig {
        let mut config = BrandisConfig::default();
        config.session.storage_path = dir.path().join("session.json");
        config.session.mirror_path = Some(dir.path().join("cookies.json"));
        config
    }

    fn credential(role: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(format!(r#"{{"role":"{role}"}}"#)))
    }

    #[test]
    fn test_login_persists_across_invocations() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        open_store(&config).login(credential("Pemasaran")).unwrap();

        let report = SessionReport::new(&open_store(&config), &config);
        assert!(report.authenticated);
        assert_eq!(report.role, Some(Role::Pemasaran));
        assert_eq!(report.landing, Landing::Navigate("/dashboard/pemasaran"));
    }

    #[test]
    fn test_logout_clears_both_files() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        let store = open_store(&config);
        store.login(credential("Manajer")).unwrap();
        assert!(dir.path().join("cookies.json").exists());

        store.logout().unwrap();
        let report = SessionReport::new(&open_store(&config), &config);
        assert!(!report.authenticated);
        assert_eq!(report.landing, Landing::Pending);
        assert!(!dir.path().join("cookies.json").exists());
    }

    #[test]
    fn test_report_text() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let text = SessionReport::new(&open_store(&config), &config).render();
        assert!(text.contains("Authenticated: no"));
        assert!(text.contains("pending"));
    }
}
