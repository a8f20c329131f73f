// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `serve`: Start the HTTP edge (default)
//! - `session`: Log in, log out, or show the stored session
//! - `authorize`: Evaluate the route guard for a path
//! - `nav`: Show the menu a role sees
//! - `decode`: Show the claims of a credential
//! - `validate`: Validate the configuration file
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Brandis access control
///
/// Role-based route protection and session handling for the Brandis
/// inventory and distribution dashboard.
#[derive(Parser, Debug)]
#[command(
    name = "brandis",
    author = "Sylvex <contact@sylvex.io>",
    version = brandis_core::VERSION,
    about = "Role-based access control for the Brandis dashboard",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path (defaults apply when omitted)
    #[arg(short, long, env = "BRANDIS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format (text, json, compact); overrides the config file
    #[arg(long, env = "BRANDIS_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP edge
    ///
    /// This is the default command when no subcommand is specified.
    Serve(ServeArgs),

    /// Manage the stored session
    #[command(subcommand)]
    Session(SessionCommand),

    /// Evaluate the route guard for a path
    ///
    /// Uses the stored session unless a credential is given.
    Authorize(AuthorizeArgs),

    /// Show the navigation menu for a role
    Nav(NavArgs),

    /// Decode a credential's claims without verifying it
    Decode(DecodeArgs),

    /// Validate the configuration file
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

/// Session subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Store a credential as the current session
    Login(LoginArgs),

    /// Clear the current session
    Logout,

    /// Show the current session
    Status(StatusArgs),
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `serve` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for `session login`.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Bearer credential issued by the authentication service
    pub credential: String,
}

/// Arguments for `session status`.
#[derive(Args, Debug, Default, Clone)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `authorize` command.
#[derive(Args, Debug, Clone)]
pub struct AuthorizeArgs {
    /// Path to navigate to
    pub path: String,

    /// Credential to evaluate instead of the stored session
    #[arg(long)]
    pub credential: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `nav` command.
#[derive(Args, Debug, Clone)]
pub struct NavArgs {
    /// Role to show the menu for (defaults to the stored session's role)
    #[arg(short, long)]
    pub role: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `decode` command.
#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Credential to decode
    pub credential: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<brandis_config::LogFormat> for LogFormat {
    fn from(format: brandis_config::LogFormat) -> Self {
        match format {
            brandis_config::LogFormat::Text => LogFormat::Text,
            brandis_config::LogFormat::Json => LogFormat::Json,
            brandis_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Serve` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }

    /// Get the effective log level: flags, then `--log-level`, then the
    /// configured level.
    pub fn effective_log_level<'a>(&'a self, configured: &'a str) -> &'a str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            self.log_level.as_deref().unwrap_or(configured)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["brandis"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Serve(_)));
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::parse_from(["brandis", "serve", "-p", "8081"]);
        if let Some(Commands::Serve(args)) = cli.command {
            assert_eq!(args.port, Some(8081));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_session_login() {
        let cli = Cli::parse_from(["brandis", "session", "login", "a.b.c"]);
        match cli.command {
            Some(Commands::Session(SessionCommand::Login(args))) => {
                assert_eq!(args.credential, "a.b.c")
            }
            other => panic!("Expected session login, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_args() {
        let cli = Cli::parse_from([
            "brandis",
            "authorize",
            "/outlets",
            "--credential",
            "x.y.z",
            "-f",
            "json",
        ]);
        match cli.command {
            Some(Commands::Authorize(args)) => {
                assert_eq!(args.path, "/outlets");
                assert_eq!(args.credential.as_deref(), Some("x.y.z"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("Expected authorize, got {:?}", other),
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["brandis", "-c", "/etc/brandis/brandis.yaml", "version"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/brandis/brandis.yaml")));
    }

    #[test]
    fn test_log_level_precedence() {
        let cli = Cli::parse_from(["brandis", "-l", "trace"]);
        assert_eq!(cli.effective_log_level("info"), "trace");

        let cli = Cli::parse_from(["brandis"]);
        assert_eq!(cli.effective_log_level("error"), "error");

        let cli = Cli::parse_from(["brandis", "-q", "-l", "trace"]);
        assert_eq!(cli.effective_log_level("info"), "warn");
    }
}
