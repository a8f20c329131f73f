// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session model.
//!
//! This module provides:
//! - [`Session`]: a credential and the role derived from it
//! - [`SessionStore`]: the process-wide session and its lifecycle
//! - [`CredentialChannel`]: the slots the credential is persisted to

mod channel;
mod store;

pub use channel::{
    CredentialChannel, FileChannel, MemoryChannel, UnavailableChannel, DEFAULT_STORAGE_KEY,
};
pub use store::{Credential, Session, SessionStore};
