// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # brandis-bin
//!
//! Command-line entry point for Brandis access control.
//!
//! ```text
//!   main.rs ──► cli.rs ──► commands ──► brandis-api (serve)
//!                  │           └──────► brandis-core (session, authorize, nav, decode)
//!                  └──► logging
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP edge (default command)
//! brandis -c brandis.yaml
//!
//! # Store a credential, then check where it may go
//! brandis session login "$TOKEN"
//! brandis authorize /financialReports
//!
//! # Show the menu a role sees
//! brandis nav --role Bendahara
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
