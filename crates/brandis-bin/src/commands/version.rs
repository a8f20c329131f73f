// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version() -> BinResult<()> {
    println!("Brandis access control");
    println!();
    println!("Version Information:");
    println!("  brandis-bin:    {}", env!("CARGO_PKG_VERSION"));
    println!("  brandis-core:   {}", brandis_core::VERSION);
    println!("  brandis-api:    {}", brandis_api::VERSION);
    println!("  brandis-config: {}", brandis_config::VERSION);
    println!();
    println!("Build Information:");
    println!("  Target:         {}", std::env::consts::ARCH);
    println!("  OS:             {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
