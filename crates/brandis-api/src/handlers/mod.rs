// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`health`]: liveness
//! - [`session`]: cookie session login, logout and status
//! - [`navigation`]: role-filtered menu
//! - [`pages`]: landing, unauthorized and protected pages

mod health;
mod navigation;
mod pages;
mod session;

pub use health::*;
pub use navigation::*;
pub use pages::*;
pub use session::*;
