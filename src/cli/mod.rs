//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod admin;
pub mod config;
pub mod context;
pub mod org;

pub use context::CommandContext;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per resource (default)
    #[default]
    Table,
    /// JSON format - wire-format resources for scripts
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}

/// Onfleet CLI - inspect organizations and manage administrators
#[derive(Parser, Debug)]
#[command(name = "onfleet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json); defaults to the config preference
    #[arg(long, global = true, env = "ONFLEET_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "ONFLEET_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// API key (overrides the config file)
    #[arg(long, global = true, env = "ONFLEET_API_KEY", hide_env = true)]
    pub api_key: Option<String>,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "ONFLEET_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ONFLEET_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect organizations
    #[command(subcommand)]
    Org(OrgCommands),

    /// Manage administrators
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Manage local configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Display version information
    Version,
}

/// Organization subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// Show your organization, or another one by ID
    Get {
        /// Organization ID (defaults to the API key's organization)
        id: Option<String>,
    },

    /// List the organizations your organization delegates to
    Delegatees,
}

/// Administrator subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List administrators
    List,

    /// Create an administrator
    Create {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address (receives the invitation)
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Create as a read-only administrator
        #[arg(long)]
        read_only: bool,
    },

    /// Update an administrator
    Update {
        /// Administrator ID
        id: String,

        /// New full name
        #[arg(long)]
        name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete an administrator
    Delete {
        /// Administrator ID
        id: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Store an API key in the config file
    SetKey {
        /// Onfleet API key
        key: String,
    },

    /// Show the active configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_org_get_with_id() {
        let cli = Cli::try_parse_from(["onfleet", "org", "get", "cBrUjKvQQgdRp~s1qvQNLpK*"]).unwrap();
        match cli.command {
            Commands::Org(OrgCommands::Get { id }) => {
                assert_eq!(id.as_deref(), Some("cBrUjKvQQgdRp~s1qvQNLpK*"))
            }
            other => panic!("Expected org get, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_admin_create() {
        let cli = Cli::try_parse_from([
            "onfleet",
            "--format",
            "json",
            "admin",
            "create",
            "--name",
            "Admin Dispatcher",
            "--email",
            "dispatcher@example.com",
            "--read-only",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Admin(AdminCommands::Create {
                name,
                email,
                phone,
                read_only,
            }) => {
                assert_eq!(name, "Admin Dispatcher");
                assert_eq!(email, "dispatcher@example.com");
                assert!(phone.is_none());
                assert!(read_only);
            }
            other => panic!("Expected admin create, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_create_requires_email() {
        assert!(Cli::try_parse_from(["onfleet", "admin", "create", "--name", "A"]).is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
