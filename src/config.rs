use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Pipeline tunables, loaded from an optional `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub io: IoConfig,
    pub classifier: ClassifierConfig,
    pub cleaning: CleaningConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Field delimiter for both input and output files.
    pub delimiter: char,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Purchase count strictly above which a customer is Frequent.
    pub frequent_purchase_threshold: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Known data-entry typo rewritten in customer names (substring match).
    pub customer_typo_from: String,
    pub customer_typo_to: String,
    /// Currency prefix stripped from revenue strings.
    pub currency_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io: IoConfig::default(),
            classifier: ClassifierConfig::default(),
            cleaning: CleaningConfig::default(),
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self { delimiter: ';' }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            frequent_purchase_threshold: 20,
        }
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            customer_typo_from: "Clinte".to_string(),
            customer_typo_to: "Cliente".to_string(),
            currency_prefix: "R$".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, failing if it is unreadable.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml` from the working directory if present,
    /// falling back to defaults otherwise.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new("config.toml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Delimiter as the single byte the CSV reader/writer expects.
    pub fn delimiter_byte(&self) -> u8 {
        self.io.delimiter as u8
    }
}
