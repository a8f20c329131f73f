// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session state and lifecycle.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::channel::{CredentialChannel, MemoryChannel};
use crate::error::{SessionError, StorageError};
use crate::role::Role;
use crate::token::decode_role;

// =============================================================================
// Credential
// =============================================================================

/// An opaque bearer credential.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a credential string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the owned credential.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<redacted, {} bytes>)", self.0.len())
    }
}

// =============================================================================
// Session
// =============================================================================

/// A credential together with the role derived from it.
///
/// The only constructors derive the role from the credential, so a session
/// can never hold a role that does not belong to its credential. A credential
/// whose role does not decode is kept: the session is then present but
/// unauthorized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credential: Option<Credential>,
    role: Option<Role>,
}

impl Session {
    /// The empty session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a session from a credential, deriving its role.
    pub fn from_credential(credential: impl Into<String>) -> Self {
        let credential = credential.into();
        let role = decode_role(&credential);
        Self {
            credential: Some(Credential(credential)),
            role,
        }
    }

    /// Builds a session from an optional credential. Empty strings count as
    /// absent.
    pub fn from_optional(credential: Option<&str>) -> Self {
        match credential.filter(|c| !c.is_empty()) {
            Some(c) => Self::from_credential(c),
            None => Self::empty(),
        }
    }

    /// Returns the credential, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Returns the derived role, if any.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns `true` if a credential is present, whatever its role.
    pub fn is_present(&self) -> bool {
        self.credential.is_some()
    }

    /// Returns `true` if the credential decoded to a known role.
    pub fn is_authorized(&self) -> bool {
        self.role.is_some()
    }
}

// =============================================================================
// SessionStore
// =============================================================================

/// The process-wide session.
///
/// Holds the in-memory session and the channels it is persisted to: one
/// durable slot that [`rehydrate`](Self::rehydrate) reads, plus any number of
/// mirrors (the cookie read by the edge layer) that are written and cleared
/// in lockstep with it.
///
/// Credential and role sit behind a single lock, so readers always see a
/// matching pair.
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn CredentialChannel>,
    mirrors: Vec<Arc<dyn CredentialChannel>>,
}

impl SessionStore {
    /// Creates a store persisting to the given durable slot.
    pub fn new(storage: Arc<dyn CredentialChannel>) -> Self {
        Self {
            state: RwLock::new(Session::empty()),
            storage,
            mirrors: Vec::new(),
        }
    }

    /// Creates a store with in-memory storage and no mirrors.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryChannel::new("storage")))
    }

    /// Adds a mirror channel.
    pub fn with_mirror(mut self, mirror: Arc<dyn CredentialChannel>) -> Self {
        self.mirrors.push(mirror);
        self
    }

    fn channels(&self) -> impl Iterator<Item = &Arc<dyn CredentialChannel>> {
        std::iter::once(&self.storage).chain(self.mirrors.iter())
    }

    /// Establishes a session.
    ///
    /// Every channel is written before the in-memory session changes, and
    /// the write lock is held throughout, so no reader sees the new
    /// credential without its role.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persist`] if a channel rejects the write. The
    /// channels already written are restored to the previous credential and
    /// the in-memory session is left as it was.
    pub fn login(&self, credential: impl Into<String>) -> Result<Session, SessionError> {
        let next = Session::from_credential(credential);
        let mut state = self.state.write();

        let value = next.credential().map(Credential::as_str).unwrap_or_default();
        let mut written: Vec<&Arc<dyn CredentialChannel>> = Vec::new();

        for channel in self.channels() {
            if let Err(source) = channel.store(value) {
                warn!(channel = channel.name(), error = %source, "Credential write failed, rolling back");
                restore(&written, state.credential());
                return Err(SessionError::Persist {
                    channel: channel.name().to_string(),
                    source,
                });
            }
            written.push(channel);
        }

        *state = next.clone();

        match next.role() {
            Some(role) => info!(role = %role, "Session established"),
            None => warn!("Session established without a recognized role"),
        }

        Ok(next)
    }

    /// Ends the session.
    ///
    /// Memory is cleared first and unconditionally. Calling this with no
    /// session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Clear`] for the first channel that could not be
    /// cleared. Channels that do not exist in this context are skipped.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.state.write();
        let was_present = state.is_present();
        *state = Session::empty();

        let mut first_error = None;
        for channel in self.channels() {
            match channel.clear() {
                Ok(()) => {}
                Err(StorageError::Unavailable) => {
                    debug!(channel = channel.name(), "No storage to clear");
                }
                Err(source) => {
                    warn!(channel = channel.name(), error = %source, "Credential clear failed");
                    first_error.get_or_insert(SessionError::Clear {
                        channel: channel.name().to_string(),
                        source,
                    });
                }
            }
        }

        if was_present {
            info!("Session cleared");
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Returns the current role.
    pub fn current_role(&self) -> Option<Role> {
        self.state.read().role()
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    /// Restores the session from the durable slot.
    ///
    /// The role is always re-derived from the stored credential. Unavailable
    /// or unreadable storage leaves the session empty; this never fails.
    pub fn rehydrate(&self) -> Session {
        let loaded = match self.storage.load() {
            Ok(credential) => Session::from_optional(credential.as_deref()),
            Err(StorageError::Unavailable) => {
                debug!("No credential storage in this context, session stays empty");
                Session::empty()
            }
            Err(e) => {
                warn!(channel = self.storage.name(), error = %e, "Credential storage unreadable, session stays empty");
                Session::empty()
            }
        };

        self.check_mirrors(&loaded);

        let mut state = self.state.write();
        *state = loaded.clone();
        debug!(present = loaded.is_present(), role = ?loaded.role(), "Session rehydrated");
        loaded
    }

    fn check_mirrors(&self, loaded: &Session) {
        let expected = loaded.credential().map(Credential::as_str);
        for mirror in &self.mirrors {
            if let Ok(value) = mirror.load() {
                if value.as_deref().filter(|v| !v.is_empty()) != expected {
                    warn!(channel = mirror.name(), "Mirror channel diverges from durable storage");
                }
            }
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.state.read())
            .field("storage", &self.storage.name())
            .field("mirrors", &self.mirrors.len())
            .finish()
    }
}

fn restore(channels: &[&Arc<dyn CredentialChannel>], previous: Option<&Credential>) {
    for channel in channels {
        let result = match previous {
            Some(credential) => channel.store(credential.as_str()),
            None => channel.clear(),
        };
        if let Err(e) = result {
            warn!(channel = channel.name(), error = %e, "Rollback failed, channels may diverge");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
