//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, authentication validation, and client initialization.

use log::{debug, warn};

use crate::cli::{Cli, OutputFormat};
use onfleet::config::Config;
use onfleet::{OnfleetApi, OnfleetClient, Result};

/// Context for command execution: an authenticated client and output format.
pub struct CommandContext {
    /// Authenticated API client
    pub client: Box<dyn OnfleetApi>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Precedence for every setting: CLI flag > environment variable >
    /// config file > default. A missing config file is fine as long as an API
    /// key arrives some other way.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable or no API key is set.
    pub fn new(cli: &Cli) -> Result<Self> {
        let path = Config::resolve_path(cli.config.as_deref())?;
        let config = Config::load_or_default(&path)?
            .with_overrides(cli.api_key.clone(), cli.api_host.clone());

        let api_key = config.validate_auth()?;
        let client = OnfleetClient::with_host(api_key, config.host())?;
        debug!("Using API at {}", client.base_url());

        let format = resolve_format(cli.format, &config);

        Ok(Self {
            client: Box::new(client),
            format,
        })
    }
}

/// Pick the output format: explicit flag first, then the config preference.
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }

    match config.preferences.format.as_deref() {
        Some(pref) => pref.parse().unwrap_or_else(|_| {
            warn!("Ignoring unknown output format preference `{}`", pref);
            OutputFormat::default()
        }),
        None => OutputFormat::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onfleet::config::Preferences;

    fn config_with_format(format: Option<&str>) -> Config {
        Config {
            preferences: Preferences {
                format: format.map(str::to_string),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_flag_wins_over_preference() {
        let config = config_with_format(Some("table"));
        assert_eq!(resolve_format(Some(OutputFormat::Json), &config), OutputFormat::Json);
    }

    #[test]
    fn test_preference_used_without_flag() {
        let config = config_with_format(Some("json"));
        assert_eq!(resolve_format(None, &config), OutputFormat::Json);
    }

    #[test]
    fn test_unknown_preference_falls_back_to_table() {
        let config = config_with_format(Some("xml"));
        assert_eq!(resolve_format(None, &config), OutputFormat::Table);
        assert_eq!(resolve_format(None, &Config::default()), OutputFormat::Table);
    }
}
