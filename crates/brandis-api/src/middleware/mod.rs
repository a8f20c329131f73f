// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! - [`GuardLayer`]: route guard at the edge, driven by the session cookie

mod guard;

pub use guard::{GuardLayer, GuardMiddleware};
