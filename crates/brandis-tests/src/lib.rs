// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Brandis Integration Tests
//!
//! Integration tests for the Brandis access control workspace, with the
//! fixtures and helpers they share.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: signed credentials for every role, plus malformed ones
//!   - `mocks`: credential channels that fail on demand
//!   - `harness`: an in-process HTTP client over the API router
//!   - `assertions`: decision and response assertions
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p brandis-tests
//!
//! # Run specific test suite
//! cargo test -p brandis-tests --test integration_core
//! cargo test -p brandis-tests --test integration_config
//! cargo test -p brandis-tests --test integration_api
//! ```
//!
//! ## Test Categories
//!
//! ### Core Tests (`integration_core.rs`)
//!
//! - Credential decoding over signed and malformed credentials
//! - Session lifecycle across restarts and channel failures
//! - Every protected path against every role
//! - Navigation and landing scenarios
//!
//! ### Config Tests (`integration_config.rs`)
//!
//! - Loading files, environment overrides, and building the guard
//!
//! ### API Tests (`integration_api.rs`)
//!
//! - The edge guard, session cookie endpoints and pages over HTTP

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, temp_test_dir, unique_test_id};
}
