//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any text is
//! converted. A `.env` file in the working directory is honoured by the
//! binaries through `dotenvy`.
//!
//! ```bash
//! export AMAZON_TAG="mytag-21"
//! export EARNPE_ID="E123"
//! export EARNKARO_ID="K456"
//! ```
//!
//! ## Affiliate Identifiers
//!
//! - `AMAZON_TAG` - Marketplace associate tag
//! - `EARNPE_ID` - EarnPe affiliate id
//! - `EARNKARO_ID` - EarnKaro affiliate id
//!
//! Each is optional on its own and a blank value counts as unset; a network
//! without an identifier is simply not converted. At least one must be set.
//!
//! ## Optional Variables
//!
//! - `MAPPINGS_PATH` - Mapping file location (default: `url_mappings.json`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::domain::entities::{AffiliateIds, Network};

/// Converter configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub ids: AffiliateIds,
    /// Where the mapping table is persisted.
    pub mappings_path: PathBuf,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Nothing is required at this stage; see [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let ids = AffiliateIds::new(
            env::var("AMAZON_TAG").ok(),
            env::var("EARNPE_ID").ok(),
            env::var("EARNKARO_ID").ok(),
        );

        let mappings_path = env::var("MAPPINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("url_mappings.json"));

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            ids,
            mappings_path,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `mappings_path` is empty
    /// - an identifier contains whitespace or `&`
    /// - no identifier is set at all
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.mappings_path.as_os_str().is_empty() {
            anyhow::bail!("MAPPINGS_PATH must not be empty");
        }

        for network in Network::ALL {
            // Identifiers end up verbatim in query strings.
            if let Some(id) = self.ids.id_for(network)
                && (id.chars().any(char::is_whitespace) || id.contains('&'))
            {
                anyhow::bail!(
                    "{} must not contain whitespace or '&', got '{}'",
                    env_name(network),
                    id
                );
            }
        }

        if self.ids.is_empty() {
            anyhow::bail!("At least one of AMAZON_TAG, EARNPE_ID or EARNKARO_ID must be set");
        }

        Ok(())
    }

    /// Prints configuration summary (identifiers masked).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        for network in Network::ALL {
            match self.ids.id_for(network) {
                Some(id) => tracing::info!("  {}: {}", env_name(network), mask_id(id)),
                None => tracing::info!("  {}: not set ({} disabled)", env_name(network), network),
            }
        }
        tracing::info!("  Mappings file: {}", self.mappings_path.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn env_name(network: Network) -> &'static str {
    match network {
        Network::Amazon => "AMAZON_TAG",
        Network::EarnPe => "EARNPE_ID",
        Network::EarnKaro => "EARNKARO_ID",
    }
}

/// Masks an affiliate identifier for logging.
///
/// Keeps the first and last two characters of identifiers longer than six
/// characters:
/// - `mytag-21` → `my***21`
/// - `E123` → `***`
fn mask_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}***{tail}")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "AMAZON_TAG",
        "EARNPE_ID",
        "EARNKARO_ID",
        "MAPPINGS_PATH",
        "RUST_LOG",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn test_config() -> Config {
        Config {
            ids: AffiliateIds::new(Some("mytag-21".to_string()), None, None),
            mappings_path: PathBuf::from("url_mappings.json"),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_mask_id() {
        assert_eq!(mask_id("mytag-21"), "my***21");
        assert_eq!(mask_id("E123"), "***");
        assert_eq!(mask_id("abcdef"), "***");
        assert_eq!(mask_id("abcdefg"), "ab***fg");
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        // Test invalid log format
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        // Test empty mappings path
        config.mappings_path = PathBuf::new();
        assert!(config.validate().is_err());

        config.mappings_path = PathBuf::from("data/mappings.json");

        // Test identifiers that would break a query string
        config.ids = AffiliateIds::new(Some("my tag".to_string()), None, None);
        assert!(config.validate().is_err());

        config.ids = AffiliateIds::new(None, Some("E1&x=2".to_string()), None);
        assert!(config.validate().is_err());

        // Test no identifiers at all
        config.ids = AffiliateIds::default();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("EARNKARO_ID", "K456");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.ids.id_for(Network::EarnKaro), Some("K456"));
        assert_eq!(config.ids.id_for(Network::Amazon), None);
        assert_eq!(config.mappings_path, PathBuf::from("url_mappings.json"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_ids_are_unset() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("AMAZON_TAG", "   ");
            env::set_var("EARNPE_ID", "");
        }

        let result = load_from_env();

        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_reads_all_variables() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("AMAZON_TAG", "mytag-21");
            env::set_var("EARNPE_ID", "E123");
            env::set_var("MAPPINGS_PATH", "/tmp/mappings.json");
            env::set_var("LOG_FORMAT", "json");
            env::set_var("RUST_LOG", "debug");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.ids.id_for(Network::Amazon), Some("mytag-21"));
        assert_eq!(config.ids.id_for(Network::EarnPe), Some("E123"));
        assert_eq!(config.mappings_path, PathBuf::from("/tmp/mappings.json"));
        assert_eq!(config.log_format, "json");
        assert_eq!(config.log_level, "debug");

        clear_env();
    }
}
