// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for brandis-core.
//!
//! None of these reach the route guard's callers: the guard turns every
//! failure into a redirect. They exist for the session lifecycle, the CLI,
//! and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CoreError
// =============================================================================

/// Umbrella error for brandis-core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credential could not be decoded.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Credential storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Session lifecycle failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A role name outside the role set.
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
}

// =============================================================================
// TokenError
// =============================================================================

/// Reasons a credential fails structural decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not three dot-separated segments.
    #[error("expected 3 segments, found {found}")]
    Segments {
        /// Number of segments found.
        found: usize,
    },

    /// Payload segment is not base64url.
    #[error("payload is not valid base64url")]
    Base64,

    /// Payload is not a JSON object of the expected shape.
    #[error("payload is not a valid claims object: {0}")]
    Payload(String),

    /// The role claim is missing.
    #[error("missing claim: role")]
    MissingRole,

    /// The role claim is not a known role.
    #[error("unrecognized role claim")]
    UnknownRole,
}

// =============================================================================
// StorageError
// =============================================================================

/// Credential storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage in this context (e.g. server-side rendering).
    #[error("credential storage is unavailable")]
    Unavailable,

    /// Filesystem error.
    #[error("storage I/O failed for '{path}': {source}")]
    Io {
        /// Storage file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stored document is unreadable.
    #[error("storage document '{path}' is corrupt: {message}")]
    Corrupt {
        /// Storage file path.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a corrupt document error.
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if storage simply does not exist in this context.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable)
    }
}

// =============================================================================
// SessionError
// =============================================================================

/// Session lifecycle failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A channel could not be written during login. Nothing was changed.
    #[error("failed to persist credential to '{channel}': {source}")]
    Persist {
        /// Channel name.
        channel: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },

    /// A channel could not be cleared during logout. Memory was cleared.
    #[error("failed to clear credential from '{channel}': {source}")]
    Clear {
        /// Channel name.
        channel: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}

// =============================================================================
// UnknownRole
// =============================================================================

/// A role name outside the role set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected Pimpinan, Manajer, Pemasaran or Bendahara)")]
pub struct UnknownRole(pub String);
