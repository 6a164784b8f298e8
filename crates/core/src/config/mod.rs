//! Application configuration with layered loading.
//!
//! Configuration is merged with figment from, highest priority first:
//!
//! 1. Environment variables (DIGIGLASS_*)
//! 2. TOML config file (if DIGIGLASS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default listing TTL: 15 minutes.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;

/// Default shortlist size; one letter per entry in the selection list.
pub const MAX_CATEGORIES: usize = 20;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Category index page of the vendor's product search.
    ///
    /// Set via DIGIGLASS_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path to the SQLite cache database.
    ///
    /// Set via DIGIGLASS_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Seconds a cached listing stays fresh.
    ///
    /// Set via DIGIGLASS_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via DIGIGLASS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via DIGIGLASS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to accept per response.
    ///
    /// Set via DIGIGLASS_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Number of categories shown in a shortlist.
    ///
    /// Set via DIGIGLASS_MAX_CATEGORIES environment variable.
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,
}

fn default_base_url() -> String {
    "https://www.digikey.com/product-search/en".into()
}

/// `<user cache dir>/digiglass/cache.sqlite`, or a file in the working
/// directory when the platform has no cache dir.
fn default_db_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("digiglass").join("cache.sqlite"))
        .unwrap_or_else(|| PathBuf::from("./digiglass-cache.sqlite"))
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_user_agent() -> String {
    "digiglass/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_max_categories() -> usize {
    MAX_CATEGORIES
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            db_path: default_db_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            max_categories: default_max_categories(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, an
    /// environment variable cannot be parsed, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DIGIGLASS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DIGIGLASS_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
