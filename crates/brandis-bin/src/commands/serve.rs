// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `serve` command.

use brandis_api::{ApiServer, AppState};
use brandis_config::BrandisConfig;
use tracing::info;

use crate::cli::ServeArgs;
use crate::error::{BinError, BinResult};
use crate::shutdown::shutdown_signal;

/// Starts the HTTP edge and runs until a shutdown signal arrives.
pub async fn serve(mut config: BrandisConfig, args: ServeArgs) -> BinResult<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    info!(
        match_mode = %config.guard.match_mode,
        cookie = %config.cookie.name,
        login_path = %config.guard.login_path,
        unauthorized_path = %config.guard.unauthorized_path,
        "Starting Brandis edge"
    );

    let server = ApiServer::new(AppState::from_config(&config));
    server
        .run_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| BinError::from(e).with_context("HTTP server"))
}
