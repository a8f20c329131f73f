// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # brandis-api
//!
//! HTTP edge for the Brandis dashboard.
//!
//! Every request to a protected page passes through [`GuardLayer`], which
//! reads the session cookie and either forwards the request or answers with
//! a `303 See Other` to the login or unauthorized page. The JSON endpoints
//! manage the cookie and expose the session's role and menu.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod cookies;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use middleware::{GuardLayer, GuardMiddleware};
pub use server::ApiServer;
pub use state::{AppState, AppStateBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
