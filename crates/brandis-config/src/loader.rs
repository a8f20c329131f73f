// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading.
//!
//! # Loading Pipeline
//!
//! 1. Read the file and resolve `${VAR}` / `${VAR:default}` placeholders
//! 2. Parse YAML, TOML or JSON by extension
//! 3. Apply `BRANDIS_*` environment overrides
//! 4. Resolve relative session paths against the config file's directory
//! 5. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! BRANDIS_HOST=0.0.0.0
//! BRANDIS_PORT=8080
//! BRANDIS_LOG_LEVEL=debug
//! BRANDIS_MATCH_MODE=exact
//! BRANDIS_COOKIE_NAME=token
//! BRANDIS_SESSION_PATH=/var/lib/brandis/session.json
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use brandis_core::MatchMode;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::BrandisConfig;

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "BRANDIS";

// =============================================================================
// ConfigFormat
// =============================================================================

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader.
///
/// ```no_run
/// use brandis_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load("brandis.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base directory for resolving relative paths.
    base_path: Option<PathBuf>,

    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to resolve environment variables.
    resolve_env_vars: bool,

    /// Whether to resolve relative paths.
    resolve_paths: bool,
}

impl ConfigLoader {
    /// Creates a loader with default settings.
    pub fn new() -> Self {
        Self {
            base_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
            resolve_paths: true,
        }
    }

    /// Sets the base path for resolving relative paths.
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment variable resolution.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Enables or disables relative path resolution.
    pub fn with_path_resolution(mut self, enabled: bool) -> Self {
        self.resolve_paths = enabled;
        self
    }

    /// Loads configuration from a file.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<BrandisConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let base_path = self.base_path.clone().unwrap_or_else(|| {
            path.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        });

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;
        let mut config = self.parse_content(&content, format, path)?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        if self.resolve_paths {
            self.resolve_relative_paths(&mut config, &base_path);
        }

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!(
            addr = %config.server.socket_addr(),
            match_mode = %config.guard.match_mode,
            cookie = %config.cookie.name,
            "Effective configuration"
        );

        Ok(config)
    }

    /// Loads configuration from a file if given, otherwise from defaults.
    ///
    /// Environment overrides apply in both cases.
    pub fn load_or_default(&self, path: Option<&Path>) -> ConfigResult<BrandisConfig> {
        match path {
            Some(path) => self.load(path),
            None => {
                let mut config = BrandisConfig::default();
                if self.resolve_env_vars {
                    self.apply_env_overrides(&mut config)?;
                }
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<BrandisConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)
        } else {
            content.to_string()
        };
        let mut config = parse_str(&content, format)?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<BrandisConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)
        } else {
            content.to_string()
        };

        parse_str(&content, format).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })
    }

    /// Resolves `${VAR_NAME}` and `${VAR_NAME:default}` placeholders.
    ///
    /// An unset variable without a default keeps its placeholder.
    fn resolve_env_placeholders(&self, content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("${") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                result.push_str(&rest[start..]);
                return result;
            };

            let inner = &after[..end];
            let (name, default) = match inner.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (inner, None),
            };

            match (env::var(name), default) {
                (Ok(value), _) => result.push_str(&value),
                (Err(_), Some(default)) => result.push_str(default),
                (Err(_), None) => {
                    warn!("Environment variable '{}' not found", name);
                    result.push_str(&rest[start..start + 2 + end + 1]);
                }
            }

            rest = &after[end + 1..];
        }

        result.push_str(rest);
        result
    }

    fn var(&self, suffix: &str) -> (String, Option<String>) {
        let name = format!("{}_{}", self.env_prefix, suffix);
        let value = env::var(&name).ok();
        (name, value)
    }

    /// Applies `<PREFIX>_*` environment overrides.
    fn apply_env_overrides(&self, config: &mut BrandisConfig) -> ConfigResult<()> {
        if let (name, Some(value)) = self.var("HOST") {
            config.server.host = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(name, "expected IP address"))?;
        }

        if let (name, Some(value)) = self.var("PORT") {
            config.server.port = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(name, "expected valid port number"))?;
        }

        if let (name, Some(value)) = self.var("LOG_LEVEL") {
            config.logging.level = value
                .parse()
                .map_err(|e: ConfigError| ConfigError::invalid_env_var(name, e.to_string()))?;
        }

        if let (name, Some(value)) = self.var("MATCH_MODE") {
            config.guard.match_mode = MatchMode::parse(&value).ok_or_else(|| {
                ConfigError::invalid_env_var(name, "expected 'exact' or 'prefix'")
            })?;
        }

        if let (_, Some(value)) = self.var("COOKIE_NAME") {
            config.cookie.name = value;
        }

        if let (_, Some(value)) = self.var("SESSION_PATH") {
            config.session.storage_path = PathBuf::from(value);
        }

        if let (name, Some(value)) = self.var("COOKIE_SECURE") {
            config.cookie.secure = parse_bool(&value)
                .ok_or_else(|| ConfigError::invalid_env_var(name, "expected boolean"))?;
        }

        Ok(())
    }

    fn resolve_relative_paths(&self, config: &mut BrandisConfig, base_path: &Path) {
        if config.session.storage_path.is_relative() {
            config.session.storage_path = base_path.join(&config.session.storage_path);
        }
        if let Some(mirror) = config.session.mirror_path.as_mut() {
            if mirror.is_relative() {
                *mirror = base_path.join(&*mirror);
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<BrandisConfig> {
    match format {
        // An empty YAML document means "all defaults".
        ConfigFormat::Yaml if content.trim().is_empty() => Ok(BrandisConfig::default()),
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

/// Parses a boolean from common spellings.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default loader settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<BrandisConfig> {
    ConfigLoader::new().load(path)
}

/// Serializes a configuration to YAML.
pub fn to_yaml(config: &BrandisConfig) -> ConfigResult<String> {
    serde_yaml::to_string(config).map_err(|e| ConfigError::serialization(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
