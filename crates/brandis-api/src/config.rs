// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use brandis_config::{BrandisConfig, CookieConfig};

// =============================================================================
// ApiConfig
// =============================================================================

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Session cookie settings.
    pub cookie: CookieConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: brandis_config::schema::DEFAULT_PORT,
            request_timeout: Duration::from_secs(
                brandis_config::schema::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            cookie: CookieConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the API configuration from the loaded file configuration.
    pub fn from_config(config: &BrandisConfig) -> Self {
        Self {
            host: config.server.host,
            port: config.server.port,
            request_timeout: config.server.request_timeout(),
            cookie: config.cookie.clone(),
        }
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the session cookie settings.
    pub fn with_cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = cookie;
        self
    }

    /// Returns the session cookie name.
    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }
}
