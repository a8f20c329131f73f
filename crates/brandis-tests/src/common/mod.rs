// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shared test utilities.

pub mod assertions;
pub mod fixtures;
pub mod harness;
pub mod mocks;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use tempfile::TempDir;

static INIT_LOGGING: Once = Once::new();
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Initializes test logging once per process.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Returns an identifier unique within this test process.
pub fn unique_test_id() -> String {
    let n = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", std::process::id(), n)
}

/// Creates a temporary directory removed when the guard drops.
pub fn temp_test_dir(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("brandis-{}-", prefix))
        .tempdir()
        .expect("failed to create temp dir")
}
