//! # Application Configuration
//!
//! Pricing defaults, display currencies and the master password, loaded once
//! at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     IMPLANT_OFFER_EXCHANGE_RATE=4.1                                    │
//! │     IMPLANT_OFFER_MASTER_PASSWORD=...                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/implant-offer/config.toml (Linux)                        │
//! │     ~/Library/Application Support/com.implant-offer.implant-offer/     │
//! │       config.toml (macOS)                                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     4.2 SAR/EUR, 10% surcharge, 35/30/25 % margins, 950 SAR reference  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! exchange_rate = 4.2
//! surcharge_pct = 10.0
//! tier_0_299 = 35.0
//! tier_300_499 = 30.0
//! tier_500_plus = 25.0
//! mid_tier_from = 300.0
//! high_tier_from = 500.0
//! reference_unit_price = 950.0
//! distinguished_item_id = "implantBody"
//!
//! [display]
//! settlement_currency = "SAR"
//! foreign_currency = "EUR"
//! decimals = 2
//!
//! [access]
//! master_password = "admin"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after loading, so no mutex is needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use offer_core::validation::validate_pricing_config;
use offer_core::{MarginTiers, PricingConfig, ValidationError};

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read or write config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("No config path available on this platform")]
    NoConfigPath,
}

/// Convenience type alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Environment Keys
// =============================================================================

pub const ENV_EXCHANGE_RATE: &str = "IMPLANT_OFFER_EXCHANGE_RATE";
pub const ENV_SURCHARGE_PCT: &str = "IMPLANT_OFFER_SURCHARGE_PCT";
pub const ENV_REFERENCE_PRICE: &str = "IMPLANT_OFFER_REFERENCE_PRICE";
pub const ENV_MASTER_PASSWORD: &str = "IMPLANT_OFFER_MASTER_PASSWORD";
pub const ENV_CURRENCY: &str = "IMPLANT_OFFER_CURRENCY";

// =============================================================================
// Pricing Settings
// =============================================================================

/// `[pricing]` section: flat form of [`PricingConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub exchange_rate: f64,
    pub surcharge_pct: f64,
    pub tier_0_299: f64,
    pub tier_300_499: f64,
    pub tier_500_plus: f64,
    pub mid_tier_from: f64,
    pub high_tier_from: f64,
    pub reference_unit_price: f64,
    pub distinguished_item_id: String,
}

impl PricingSettings {
    /// Builds the engine configuration.
    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig {
            exchange_rate: self.exchange_rate,
            surcharge_pct: self.surcharge_pct,
            margin_tiers: MarginTiers {
                tier_0_299: self.tier_0_299,
                tier_300_499: self.tier_300_499,
                tier_500_plus: self.tier_500_plus,
                mid_from: self.mid_tier_from,
                high_from: self.high_tier_from,
            },
            reference_unit_price: self.reference_unit_price,
            distinguished_item_id: self.distinguished_item_id.clone(),
        }
    }
}

impl From<&PricingConfig> for PricingSettings {
    fn from(config: &PricingConfig) -> Self {
        let tiers = &config.margin_tiers;
        PricingSettings {
            exchange_rate: config.exchange_rate,
            surcharge_pct: config.surcharge_pct,
            tier_0_299: tiers.tier_0_299,
            tier_300_499: tiers.tier_300_499,
            tier_500_plus: tiers.tier_500_plus,
            mid_tier_from: tiers.mid_from,
            high_tier_from: tiers.high_from,
            reference_unit_price: config.reference_unit_price,
            distinguished_item_id: config.distinguished_item_id.clone(),
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings::from(&PricingConfig::default())
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// `[display]` section: currency labels and rounding for rendered amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Currency offers are priced and settled in.
    pub settlement_currency: String,

    /// Currency ex-factory costs are quoted in.
    pub foreign_currency: String,

    /// Decimal places for amounts and percentages.
    pub decimals: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            settlement_currency: "SAR".to_string(),
            foreign_currency: "EUR".to_string(),
            decimals: 2,
        }
    }
}

impl DisplaySettings {
    /// Formats a settlement-currency amount, e.g. `122,522.40 SAR`.
    pub fn format_settlement(&self, value: f64) -> String {
        format!("{} {}", format_amount(value, self.decimals), self.settlement_currency)
    }

    /// Formats a settlement-currency amount without decimals, e.g.
    /// `200,000 SAR`. Used for the headline total offer.
    pub fn format_settlement_whole(&self, value: f64) -> String {
        format!("{} {}", format_amount(value, 0), self.settlement_currency)
    }

    /// Formats an amount in the currency an item's cost is quoted in.
    pub fn format_cost(&self, value: f64, is_local_currency: bool) -> String {
        let currency = if is_local_currency {
            &self.settlement_currency
        } else {
            &self.foreign_currency
        };
        format!("{} {}", format_amount(value, self.decimals), currency)
    }

    /// Formats a percentage, e.g. `112.21%`.
    pub fn format_pct(&self, value: f64) -> String {
        format!("{}%", format_amount(value, self.decimals))
    }

    /// Formats a unit count, e.g. `210.53`.
    pub fn format_units(&self, value: f64) -> String {
        format_amount(value, self.decimals)
    }
}

/// Formats a number with a fixed number of decimals and `,` thousands
/// separators. A value that rounds to zero never carries a minus sign.
pub fn format_amount(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

// =============================================================================
// Access Settings
// =============================================================================

/// `[access]` section.
///
/// The master password only toggles which fields are visible and editable.
/// It is compared as plain text and is not an access-control boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    pub master_password: String,
}

impl Default for AccessSettings {
    fn default() -> Self {
        AccessSettings {
            master_password: "admin".to_string(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub access: AccessSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an explicit path that does not exist
    /// falls back to defaults the same way.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without env overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the pricing section.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_pricing_config(&self.pricing.to_pricing_config())?;
        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = parse_override(&lookup, ENV_EXCHANGE_RATE)? {
            debug!(exchange_rate = rate, "Overriding exchange rate from environment");
            self.pricing.exchange_rate = rate;
        }

        if let Some(pct) = parse_override(&lookup, ENV_SURCHARGE_PCT)? {
            debug!(surcharge_pct = pct, "Overriding surcharge from environment");
            self.pricing.surcharge_pct = pct;
        }

        if let Some(price) = parse_override(&lookup, ENV_REFERENCE_PRICE)? {
            debug!(reference_unit_price = price, "Overriding reference price from environment");
            self.pricing.reference_unit_price = price;
        }

        if let Some(password) = lookup(ENV_MASTER_PASSWORD) {
            debug!("Overriding master password from environment");
            self.access.master_password = password;
        }

        if let Some(currency) = lookup(ENV_CURRENCY) {
            self.display.settlement_currency = currency;
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "implant-offer", "implant-offer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Engine configuration built from the `[pricing]` section.
    pub fn pricing_config(&self) -> PricingConfig {
        self.pricing.to_pricing_config()
    }

    /// Checks a master-mode credential.
    pub fn password_matches(&self, candidate: &str) -> bool {
        candidate == self.access.master_password
    }
}

fn parse_override<F>(lookup: &F, key: &str) -> ConfigResult<Option<f64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.pricing_config(), PricingConfig::default());
        assert_eq!(config.display.settlement_currency, "SAR");
        assert!(config.password_matches("admin"));
        assert!(!config.password_matches("Admin"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        let lookup = lookup_from(&[
            (ENV_EXCHANGE_RATE, "4.05"),
            (ENV_SURCHARGE_PCT, " 12 "),
            (ENV_MASTER_PASSWORD, "s3cret"),
            (ENV_CURRENCY, "AED"),
        ]);

        config.apply_overrides(lookup).unwrap();

        assert_eq!(config.pricing.exchange_rate, 4.05);
        assert_eq!(config.pricing.surcharge_pct, 12.0);
        assert_eq!(config.pricing.reference_unit_price, 950.0);
        assert!(config.password_matches("s3cret"));
        assert_eq!(config.display.settlement_currency, "AED");
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(ENV_REFERENCE_PRICE, "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { ref key, .. } if key == ENV_REFERENCE_PRICE
        ));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [pricing]
            exchange_rate = 4.1
            tier_500_plus = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.exchange_rate, 4.1);
        assert_eq!(config.pricing.surcharge_pct, 10.0);
        assert_eq!(config.pricing_config().margin_tiers.tier_500_plus, 20.0);
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_validation_rejects_bad_tier_bounds() {
        let mut config = AppConfig::default();
        config.pricing.mid_tier_from = 600.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.pricing.surcharge_pct = 7.5;
        config.display.foreign_currency = "USD".to_string();

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let reloaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_toml_sections() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[pricing]"));
        assert!(toml_str.contains("[display]"));
        assert!(toml_str.contains("[access]"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0, 2), "0.00");
        assert_eq!(format_amount(235.62, 2), "235.62");
        assert_eq!(format_amount(94_248.0, 2), "94,248.00");
        assert_eq!(format_amount(122_522.4, 2), "122,522.40");
        assert_eq!(format_amount(200_000.0, 0), "200,000");
        assert_eq!(format_amount(1_234_567.891, 1), "1,234,567.9");
        assert_eq!(format_amount(-100.0, 2), "-100.00");
        assert_eq!(format_amount(-0.001, 2), "0.00");
    }

    #[test]
    fn test_display_helpers() {
        let display = DisplaySettings::default();
        assert_eq!(display.format_settlement(94_248.0), "94,248.00 SAR");
        assert_eq!(display.format_settlement_whole(200_000.0), "200,000 SAR");
        assert_eq!(display.format_cost(51.0, false), "51.00 EUR");
        assert_eq!(display.format_cost(10_000.0, true), "10,000.00 SAR");
        assert_eq!(display.format_pct(112.2061), "112.21%");
        assert_eq!(display.format_units(210.526), "210.53");
    }
}
