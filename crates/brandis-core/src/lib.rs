// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # brandis-core
//!
//! Access control for the Brandis inventory and distribution dashboard.
//!
//! - [`token`]: structural (unverified) credential decoding
//! - [`session`]: the session, its store and its storage channels
//! - [`guard`]: the protected route table and the route guard
//! - [`navigation`]: role-filtered menu entries
//! - [`pages`]: landing redirector and unauthorized page
//!
//! Nothing here verifies signatures. The guard steers navigation; the
//! backend enforces access on every resource call.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod guard;
pub mod navigation;
pub mod pages;
pub mod role;
pub mod session;
pub mod token;

pub use error::{CoreError, SessionError, StorageError, TokenError, UnknownRole};
pub use guard::{Decision, MatchMode, RouteGuard, RouteRule, RouteTable};
pub use navigation::{visible_entries, NavigationEntry, ResolvedEntry, VisibleEntries};
pub use pages::{display_unauthorized, landing, Landing, UnauthorizedNotice};
pub use role::{dashboard_path_for, Role, RoleSet};
pub use session::{
    Credential, CredentialChannel, FileChannel, MemoryChannel, Session, SessionStore,
    UnavailableChannel,
};
pub use token::{decode_claims, decode_role, Claims};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
