//! Local configuration commands

use std::path::Path;

use colored::Colorize;

use onfleet::Result;
use onfleet::config::Config;

/// Run the config set-key command
pub fn set_key(path: &Path, key: &str) -> Result<String> {
    let mut config = Config::load_or_default(path)?;
    config.api_key = Some(key.trim().to_string());
    config.validate_auth()?;
    config.save_to(path)?;

    Ok(format!("{} API key saved to {}", "✓".green(), path.display()))
}

/// Run the config show command
///
/// `effective` already has CLI/environment overrides applied.
pub fn show(path: &Path, effective: &Config) -> String {
    let key = effective
        .masked_api_key()
        .unwrap_or_else(|| "(not set)".to_string());
    let format = effective.preferences.format.as_deref().unwrap_or("table");

    [
        format!("Config file: {}", path.display()),
        format!("API key:     {}", key),
        format!("API host:    {}", effective.host()),
        format!("Format:      {}", format),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_key_creates_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");

        let message = set_key(&path, " secret-api-key ").unwrap();

        assert!(message.contains("API key saved"));
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.api_key.as_deref(), Some("secret-api-key"));
    }

    #[test]
    fn test_set_key_keeps_other_settings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "api_host: http://localhost:9000\n").unwrap();

        set_key(&path, "k-1").unwrap();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.api_host.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_set_key_rejects_blank() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");

        assert!(set_key(&path, "   ").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_show_masks_key() {
        let config = Config::default().with_overrides(Some("abcdef123456".to_string()), None);
        let output = show(Path::new("/tmp/onfleet.yaml"), &config);

        assert!(output.contains("********3456"));
        assert!(!output.contains("abcdef"));
        assert!(output.contains("https://onfleet.com"));
    }

    #[test]
    fn test_show_without_key() {
        let output = show(Path::new("/tmp/onfleet.yaml"), &Config::default());
        assert!(output.contains("(not set)"));
    }
}
