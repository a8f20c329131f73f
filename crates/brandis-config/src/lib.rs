// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # brandis-config
//!
//! Configuration management for the Brandis services.
//!
//! Configuration is read from YAML, TOML or JSON, every section has defaults,
//! and `BRANDIS_*` environment variables override individual values.
//!
//! ```yaml
//! server:
//!   host: 127.0.0.1
//!   port: 3000
//! cookie:
//!   name: token
//!   max_age_days: 7
//! guard:
//!   match_mode: prefix
//! session:
//!   storage_path: ./data/session.json
//! logging:
//!   level: info
//!   format: text
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, to_yaml, ConfigFormat, ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::{
    BrandisConfig, CookieConfig, GuardConfig, LogFormat, LogLevel, LoggingConfig, ServerConfig,
    SessionConfig,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
