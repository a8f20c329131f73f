// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Channels
//!
//! Credential channels with scripted failures.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use brandis_core::{CredentialChannel, MemoryChannel, StorageError};

/// A memory channel whose writes and clears can be made to fail.
#[derive(Debug)]
pub struct FlakyChannel {
    inner: MemoryChannel,
    fail_store: AtomicBool,
    fail_clear: AtomicBool,
    store_calls: AtomicUsize,
}

impl FlakyChannel {
    /// Creates a healthy channel.
    pub fn new(name: &str) -> Self {
        Self {
            inner: MemoryChannel::new(name),
            fail_store: AtomicBool::new(false),
            fail_clear: AtomicBool::new(false),
            store_calls: AtomicUsize::new(0),
        }
    }

    /// Makes subsequent writes fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent clears fail.
    pub fn fail_clears(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts, including failed ones.
    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    /// The stored credential.
    pub fn peek(&self) -> Option<String> {
        self.inner.peek()
    }

    fn failure(&self, op: &str) -> StorageError {
        StorageError::io(
            format!("flaky/{}", self.inner.name()),
            std::io::Error::other(format!("{op} refused")),
        )
    }
}

impl CredentialChannel for FlakyChannel {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        self.inner.load()
    }

    fn store(&self, credential: &str) -> Result<(), StorageError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(self.failure("write"));
        }
        self.inner.store(credential)
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(self.failure("clear"));
        }
        self.inner.clear()
    }
}
