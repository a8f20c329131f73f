// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Brandis access control binary.

use brandis_bin::cli::{Cli, LogFormat};
use brandis_bin::error::report_error_and_exit;
use brandis_bin::{commands, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config = match commands::load_config(&cli) {
        Ok(config) => config,
        Err(e) => report_error_and_exit(e),
    };

    let format = cli
        .log_format
        .unwrap_or_else(|| LogFormat::from(config.logging.format));
    init_logging(cli.effective_log_level(config.logging.level.as_str()), format);

    if let Err(e) = commands::execute(&cli, config).await {
        report_error_and_exit(e);
    }
}
