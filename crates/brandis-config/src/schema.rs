// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for Brandis.
//!
//! # Schema Structure
//!
//! ```text
//! BrandisConfig
//! ├── server: ServerConfig
//! ├── cookie: CookieConfig
//! ├── guard: GuardConfig
//! ├── session: SessionConfig
//! └── logging: LoggingConfig
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use brandis_core::guard::{DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH};
use brandis_core::session::DEFAULT_STORAGE_KEY;
use brandis_core::{MatchMode, RouteGuard, RouteTable};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default session cookie name. Matches the durable storage key.
pub const DEFAULT_COOKIE_NAME: &str = "token";

/// Default cookie lifetime in days.
pub const DEFAULT_COOKIE_MAX_AGE_DAYS: u32 = 7;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandisConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Session cookie configuration.
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Route guard configuration.
    #[serde(default)]
    pub guard: GuardConfig,

    /// Durable session storage configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BrandisConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.cookie.validate()?;
        self.guard.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ServerConfig {
    /// Validates the server configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::validation("server.port", "cannot be zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_secs",
                "cannot be zero",
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Cookie Configuration
// =============================================================================

/// Session cookie configuration.
///
/// The cookie is the copy of the credential the edge guard reads. It is not
/// `HttpOnly` by default because client code keeps it in step with the
/// durable slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CookieConfig {
    /// Cookie name.
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Lifetime in days.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,

    /// Sets the `Secure` attribute.
    #[serde(default)]
    pub secure: bool,

    /// Sets the `HttpOnly` attribute.
    #[serde(default)]
    pub http_only: bool,
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_max_age_days() -> u32 {
    DEFAULT_COOKIE_MAX_AGE_DAYS
}

impl CookieConfig {
    /// Validates the cookie configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::validation("cookie.name", "cannot be empty"));
        }
        if self
            .name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | ',' | '='))
        {
            return Err(ConfigError::validation(
                "cookie.name",
                "contains characters not allowed in a cookie name",
            ));
        }
        if self.max_age_days == 0 {
            return Err(ConfigError::validation(
                "cookie.max_age_days",
                "cannot be zero",
            ));
        }
        Ok(())
    }

    /// Returns the cookie lifetime as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(u64::from(self.max_age_days) * 24 * 60 * 60)
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            max_age_days: DEFAULT_COOKIE_MAX_AGE_DAYS,
            secure: false,
            http_only: false,
        }
    }
}

// =============================================================================
// Guard Configuration
// =============================================================================

/// Route guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Redirect target for requests without a usable role.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Redirect target for denied requests.
    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,

    /// How request paths are matched against the route table.
    #[serde(default)]
    pub match_mode: MatchMode,
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_unauthorized_path() -> String {
    DEFAULT_UNAUTHORIZED_PATH.to_string()
}

impl GuardConfig {
    /// Validates the guard configuration.
    ///
    /// Both redirect targets are served as pages of their own, so neither
    /// may be covered by the route table or collide with a fixed endpoint.
    pub fn validate(&self) -> ConfigResult<()> {
        let table = RouteTable::brandis(self.match_mode);
        validate_redirect_target("guard.login_path", &self.login_path, &table)?;
        validate_redirect_target("guard.unauthorized_path", &self.unauthorized_path, &table)?;

        if self.login_path == self.unauthorized_path {
            return Err(ConfigError::validation(
                "guard.unauthorized_path",
                "must differ from guard.login_path",
            ));
        }
        Ok(())
    }

    /// Builds the route guard over the Brandis route table.
    pub fn build_guard(&self) -> RouteGuard {
        RouteGuard::new(RouteTable::brandis(self.match_mode))
            .with_login_path(self.login_path.clone())
            .with_unauthorized_path(self.unauthorized_path.clone())
    }
}

/// Endpoints the HTTP edge serves itself.
pub const RESERVED_PATHS: &[&str] = &["/health", "/dashboard"];

/// Prefix of the JSON endpoints.
pub const API_PREFIX: &str = "/api";

fn validate_redirect_target(field: &str, path: &str, table: &RouteTable) -> ConfigResult<()> {
    if !path.starts_with('/') {
        return Err(ConfigError::validation(field, "must start with '/'"));
    }
    if path.contains(['{', '}', '*', '?', '#']) || path.contains(char::is_whitespace) {
        return Err(ConfigError::validation(field, "must be a plain path"));
    }
    if table.is_guarded(path) {
        return Err(ConfigError::validation(
            field,
            format!("'{}' is a protected route", path),
        ));
    }
    let under_api = path == API_PREFIX || path.starts_with(&format!("{}/", API_PREFIX));
    if under_api || RESERVED_PATHS.contains(&path) {
        return Err(ConfigError::validation(
            field,
            format!("'{}' is reserved by the server", path),
        ));
    }
    Ok(())
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
            match_mode: MatchMode::default(),
        }
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Durable session storage configuration, used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// File holding the durable slot.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Key of the credential inside the storage document.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Optional file mirroring the cookie copy of the credential.
    #[serde(default)]
    pub mirror_path: Option<PathBuf>,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl SessionConfig {
    /// Validates the session configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "session.storage_key",
                "cannot be empty",
            ));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "session.storage_path",
                "cannot be empty",
            ));
        }
        if self
            .mirror_path
            .as_deref()
            .is_some_and(|mirror| same_file_path(mirror, &self.storage_path))
        {
            return Err(ConfigError::validation(
                "session.mirror_path",
                "must differ from session.storage_path",
            ));
        }
        Ok(())
    }
}

/// Compares two paths lexically, ignoring `.` components.
fn same_file_path(a: &Path, b: &Path) -> bool {
    fn significant(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<Vec<_>>()
    }
    significant(a) == significant(b)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            storage_key: default_storage_key(),
            mirror_path: None,
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::validation(
                "logging.level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
    /// Compact single-line text.
    Compact,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(ConfigError::validation(
                "logging.format",
                format!("unknown format '{}'", other),
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use brandis_core::{Decision, Session};

    #[test]
    fn test_defaults_are_valid() {
        let config = BrandisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.cookie.name, "token");
        assert_eq!(config.cookie.max_age_days, 7);
        assert!(!config.cookie.http_only);
        assert_eq!(config.guard.login_path, "/");
        assert_eq!(config.guard.unauthorized_path, "/unauthorized");
        assert_eq!(config.guard.match_mode, MatchMode::Prefix);
        assert_eq!(config.session.storage_key, "token");
    }

    #[test]
    fn test_cookie_max_age() {
        let cookie = CookieConfig::default();
        assert_eq!(cookie.max_age(), Duration::from_secs(7 * 86_400));
    }

    #[test]
    fn test_rejects_empty_cookie_name() {
        let mut config = BrandisConfig::default();
        config.cookie.name = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "cookie.name"));

        config.cookie.name = "a;b".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_relative_guard_paths() {
        let mut config = BrandisConfig::default();
        config.guard.login_path = "login".into();
        assert!(config.validate().is_err());

        let mut config = BrandisConfig::default();
        config.guard.unauthorized_path = "unauthorized".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_identical_redirect_targets() {
        let mut config = BrandisConfig::default();
        config.guard.unauthorized_path = "/".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_protected_redirect_targets() {
        let mut config = BrandisConfig::default();
        config.guard.login_path = "/products".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "guard.login_path"));

        let mut config = BrandisConfig::default();
        config.guard.unauthorized_path = "/inventory/denied".into();
        assert!(config.validate().is_err());

        config.guard.match_mode = MatchMode::Exact;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_reserved_redirect_targets() {
        for path in ["/health", "/dashboard", "/api", "/api/session", "/{id}", "/a b"] {
            let mut config = BrandisConfig::default();
            config.guard.unauthorized_path = path.into();
            assert!(config.validate().is_err(), "accepted {}", path);
        }

        let mut config = BrandisConfig::default();
        config.guard.login_path = "/login".into();
        config.guard.unauthorized_path = "/denied".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_mirror_naming_storage_slot() {
        let mut config = BrandisConfig::default();
        config.session.storage_path = "./data/session.json".into();
        config.session.mirror_path = Some("data/./session.json".into());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "session.mirror_path"));

        config.session.mirror_path = Some("data/cookies.json".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_port_zero() {
        let mut config = BrandisConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_guard_uses_configured_targets() {
        let guard = GuardConfig {
            login_path: "/login".into(),
            unauthorized_path: "/denied".into(),
            match_mode: MatchMode::Exact,
        }
        .build_guard();

        assert_eq!(guard.table().mode(), MatchMode::Exact);
        assert_eq!(
            guard.authorize("/products", &Session::empty()),
            Decision::RedirectTo("/login".into())
        );
        assert_eq!(guard.login_path(), "/login");
        assert_eq!(guard.unauthorized_path(), "/denied");
    }

    #[test]
    fn test_log_level_and_format_parse() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_deny_unknown_fields() {
        let result: Result<BrandisConfig, _> = serde_yaml::from_str("cookie:\n  nmae: x\n");
        assert!(result.is_err());
    }
}
