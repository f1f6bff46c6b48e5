//! # Till Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file: `--config <path>`, else `cafe.toml` in the platform
//!    config directory
//! 3. Environment variables (`CAFE_*`)
//! 4. Validation
//!
//! ## Example `cafe.toml`
//! ```toml
//! [database]
//! path = "/var/lib/cafe/cafe.db"
//!
//! [store]
//! name = "CafeControl Invoice"
//! address = "123 Tasty Street, Flavortown, FC 12345"
//! currency_label = "Rs."
//! footer = "Thank you for dining with us!"
//!
//! [pricing]
//! discount_percent = 10.0
//! gst_percent = 5.0
//!
//! [receipt]
//! paper = "large"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use cafe_core::validation::{validate_item_name, validate_rate_bps};
use cafe_core::{
    PaperSize, PricingPolicy, Rate, ReceiptLayout, DEFAULT_CURRENCY_LABEL, MAX_CURRENCY_LABEL_LEN,
};
use cafe_db::DbConfig;

const CONFIG_FILE_NAME: &str = "cafe.toml";
const DATABASE_FILE_NAME: &str = "cafe.db";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` named a file that does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file, or `:memory:`.
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
        }
    }
}

/// Receipt header and footer text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,
    pub address: String,
    pub currency_label: String,
    pub footer: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let layout = ReceiptLayout::default();
        StoreSettings {
            name: layout.store_name,
            address: layout.store_address,
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            footer: layout.footer,
        }
    }
}

/// Rates as percentages (`10.0` = 10%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub discount_percent: f64,
    pub gst_percent: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        let policy = PricingPolicy::default();
        PricingSettings {
            discount_percent: policy.discount_rate().percentage(),
            gst_percent: policy.gst_rate().percentage(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptSettings {
    pub paper: PaperSize,
}

// =============================================================================
// AppConfig
// =============================================================================

/// Effective till configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub store: StoreSettings,
    pub pricing: PricingSettings,
    pub receipt: ReceiptSettings,
}

impl AppConfig {
    /// Loads defaults, then the config file, then `CAFE_*` variables, then
    /// validates.
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = match config_path.or_else(default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading till config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read {
                        path: path.clone(),
                        source,
                    })?;
                Self::from_toml(&contents)?
            }
            Some(path) if explicit => return Err(ConfigError::NotFound(path)),
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing sections and keys keep their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies `CAFE_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers and paper sizes are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CAFE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(name) = lookup("CAFE_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(address) = lookup("CAFE_STORE_ADDRESS") {
            self.store.address = address;
        }

        if let Some(label) = lookup("CAFE_CURRENCY_LABEL") {
            self.store.currency_label = label;
        }

        if let Some(rate) = lookup("CAFE_DISCOUNT_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) => self.pricing.discount_percent = pct,
                Err(_) => warn!(value = %rate, "Ignoring invalid CAFE_DISCOUNT_RATE"),
            }
        }

        if let Some(rate) = lookup("CAFE_GST_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) => self.pricing.gst_percent = pct,
                Err(_) => warn!(value = %rate, "Ignoring invalid CAFE_GST_RATE"),
            }
        }

        if let Some(paper) = lookup("CAFE_PAPER_SIZE") {
            match paper.parse::<PaperSize>() {
                Ok(size) => self.receipt.paper = size,
                Err(e) => warn!(error = %e, "Ignoring invalid CAFE_PAPER_SIZE"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        validate_item_name(&self.store.name)
            .map_err(|e| ConfigError::Invalid(format!("store.{}", e)))?;

        let label_len = self.store.currency_label.trim().chars().count();
        if label_len == 0 || label_len > MAX_CURRENCY_LABEL_LEN {
            return Err(ConfigError::Invalid(format!(
                "store.currency_label must be 1 to {} characters",
                MAX_CURRENCY_LABEL_LEN
            )));
        }

        for (field, pct) in [
            ("pricing.discount_percent", self.pricing.discount_percent),
            ("pricing.gst_percent", self.pricing.gst_percent),
        ] {
            if !pct.is_finite() || pct < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number",
                    field
                )));
            }
            validate_rate_bps(field, Rate::from_percentage(pct).bps())
                .map_err(|e| ConfigError::Invalid(format!("{} (basis points)", e)))?;
        }

        Ok(())
    }

    // =========================================================================
    // Derived Settings
    // =========================================================================

    /// Discount and GST policy.
    pub fn pricing_policy(&self) -> ConfigResult<PricingPolicy> {
        PricingPolicy::new(
            Rate::from_percentage(self.pricing.discount_percent),
            Rate::from_percentage(self.pricing.gst_percent),
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Receipt header, footer and paper.
    pub fn receipt_layout(&self) -> ReceiptLayout {
        ReceiptLayout {
            store_name: self.store.name.clone(),
            store_address: self.store.address.clone(),
            currency_label: self.store.currency_label.clone(),
            footer: self.store.footer.clone(),
            paper: self.receipt.paper,
        }
    }

    /// Pool configuration for the menu database.
    pub fn db_config(&self) -> DbConfig {
        if self.database.path == std::path::Path::new(":memory:") {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database.path)
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "cafecontrol", "till")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let policy = config.pricing_policy().unwrap();
        assert_eq!(policy.discount_rate().bps(), 1000);
        assert_eq!(policy.gst_rate().bps(), 500);

        let layout = config.receipt_layout();
        assert_eq!(layout.store_name, "CafeControl Invoice");
        assert_eq!(layout.currency_label, "Rs.");
        assert_eq!(layout.paper, PaperSize::Large);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [pricing]
            gst_percent = 18

            [receipt]
            paper = "small"
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.gst_percent, 18.0);
        assert_eq!(config.pricing.discount_percent, 10.0);
        assert_eq!(config.receipt.paper, PaperSize::Small);
        assert_eq!(config.store.footer, "Thank you for dining with us!");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.store.name = "Chai Point".into();
        config.database.path = PathBuf::from("/tmp/chai.db");

        let text = config.to_toml().unwrap();
        assert!(text.contains("[pricing]"));
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("CAFE_DB_PATH", ":memory:"),
            ("CAFE_STORE_NAME", "Night Owl"),
            ("CAFE_DISCOUNT_RATE", "12.5"),
            ("CAFE_GST_RATE", "18"),
            ("CAFE_PAPER_SIZE", "58mm"),
        ]));

        assert!(config.db_config().is_in_memory());
        assert_eq!(config.store.name, "Night Owl");
        assert_eq!(config.receipt.paper, PaperSize::Small);

        let policy = config.pricing_policy().unwrap();
        assert_eq!(policy.discount_rate().bps(), 1250);
        assert_eq!(policy.gst_rate().bps(), 1800);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("CAFE_GST_RATE", "five"),
            ("CAFE_PAPER_SIZE", "a4"),
        ]));

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_whole_rates() {
        let mut config = AppConfig::default();
        config.pricing.discount_percent = 100.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.pricing.discount_percent = -5.0;
        assert!(config.validate().is_err());

        config.pricing.discount_percent = 10.0;
        config.store.currency_label = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_name_errors_keep_the_reason() {
        let mut config = AppConfig::default();
        config.store.name = "A".repeat(101);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: store.name must be at most 100 characters"
        );

        config.store.name = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("store.name is required"));
    }

    #[test]
    fn test_currency_label_length_is_bounded() {
        let mut config = AppConfig::default();
        config.store.currency_label = "INR ".into();
        assert!(config.validate().is_ok());

        config.store.currency_label = "Rupees".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("store.currency_label must be 1 to 5 characters"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = AppConfig::load(Some(PathBuf::from("/definitely/not/here/cafe.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
