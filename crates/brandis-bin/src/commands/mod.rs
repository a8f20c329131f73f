// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `serve`: Start the HTTP edge
//! - `session`: Log in, log out, show the stored session
//! - `authorize`: Evaluate the route guard for a path
//! - `nav`: Show a role's navigation menu
//! - `decode`: Show a credential's claims
//! - `validate`: Validate configuration file
//! - `version`: Show version information

mod authorize;
mod decode;
mod nav;
mod serve;
mod session;
mod validate;
mod version;

use std::sync::Arc;

use brandis_config::{BrandisConfig, ConfigLoader};
use brandis_core::{FileChannel, SessionStore};
use serde::Serialize;

pub use authorize::{authorize, evaluate};
pub use decode::{decode, DecodeReport};
pub use nav::{nav, render_menu};
pub use serve::serve;
pub use session::{session, SessionReport};
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::error::BinResult;

/// Loads the configuration named on the command line, or defaults.
pub fn load_config(cli: &Cli) -> BinResult<BrandisConfig> {
    Ok(ConfigLoader::new().load_or_default(cli.config.as_deref())?)
}

/// Opens the file-backed session store and restores the stored session.
///
/// The durable slot is the configured storage file. When a mirror file is
/// configured it stands in for the cookie channel, keyed by the cookie name.
pub fn open_store(config: &BrandisConfig) -> SessionStore {
    let storage = FileChannel::with_key(
        config.session.storage_path.clone(),
        config.session.storage_key.clone(),
    );
    let mut store = SessionStore::new(Arc::new(storage));

    if let Some(mirror) = &config.session.mirror_path {
        store = store.with_mirror(Arc::new(FileChannel::with_key(
            mirror.clone(),
            config.cookie.name.clone(),
        )));
    }

    store.rehydrate();
    store
}

/// Renders a value as pretty JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> BinResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Prints either the text rendering or the JSON form of `value`.
pub(crate) fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> BinResult<()> {
    let out = match format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => to_json(value)?,
    };
    println!("{}", out);
    Ok(())
}

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: &Cli, config: BrandisConfig) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Serve(args) => serve::serve(config, args).await,
        Commands::Session(command) => session::session(&config, command),
        Commands::Authorize(args) => authorize::authorize(&config, args),
        Commands::Nav(args) => nav::nav(&config, args),
        Commands::Decode(args) => decode::decode(args),
        Commands::Validate(args) => validate::validate(cli, &config, args),
        Commands::Version => version::version(),
    }
}
