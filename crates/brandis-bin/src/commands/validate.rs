// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use brandis_config::{to_yaml, BrandisConfig};

use crate::cli::{Cli, ValidateArgs};
use crate::error::BinResult;

/// Executes the `validate` command.
///
/// Loading already parsed and validated the file; this reports the result.
pub fn validate(cli: &Cli, config: &BrandisConfig, args: ValidateArgs) -> BinResult<()> {
    config.validate()?;

    match &cli.config {
        Some(path) => println!("Configuration is valid: {}", path.display()),
        None => println!("No configuration file given; defaults are valid"),
    }
    println!("  Listen:       {}", config.server.socket_addr());
    println!("  Match mode:   {}", config.guard.match_mode);
    println!("  Cookie:       {}", config.cookie.name);
    println!("  Session file: {}", config.session.storage_path.display());

    if args.show_config {
        println!();
        print!("{}", to_yaml(config)?);
    }

    Ok(())
}
