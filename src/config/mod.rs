//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/gallery-zone/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geocode::nominatim::NominatimClient;
use crate::map::MapStyle;
use crate::store::SessionContext;
use crate::suggest::DebouncePolicy;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding provider settings
    #[serde(default)]
    pub geocode: GeocodeConfig,

    /// Suggestion debounce settings
    #[serde(default)]
    pub suggest: SuggestConfig,

    /// Delivery defaults
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Map styling
    #[serde(default)]
    pub map: MapStyle,

    /// Catalog store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Provider endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Country filter, empty for worldwide search
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Language for returned address labels
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Maximum candidates per search
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Client identification sent to the provider
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Suggestion debounce settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Quiet period before a call is issued, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Window in which an identical query is not re-sent, in milliseconds
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Minimum query length that triggers a call
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

/// Delivery defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Radius used before the seller saves one, in kilometers
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

/// Catalog store settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Store service base URL; empty to serve from memory
    #[serde(default)]
    pub base_url: String,

    /// Bearer token for the store service
    #[serde(default)]
    pub api_token: String,

    /// Seller id owning this session; empty for a fresh random id
    #[serde(default)]
    pub seller_id: String,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_endpoint() -> String {
    crate::constants::api::NOMINATIM_URL.to_string()
}
fn default_country_filter() -> String {
    DEFAULT_COUNTRY_FILTER.to_string()
}
fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}
fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_cooldown_ms() -> u64 {
    DEFAULT_COOLDOWN_MS
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

// Implement Default traits
impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            geocode: GeocodeConfig::default(),
            suggest: SuggestConfig::default(),
            delivery: DeliveryConfig::default(),
            map: MapStyle::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            country_filter: default_country_filter(),
            accept_language: default_accept_language(),
            result_limit: default_result_limit(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            cooldown_ms: default_cooldown_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["geocode", "endpoint"] => Some(self.geocode.endpoint.clone()),
            ["geocode", "country_filter"] => Some(self.geocode.country_filter.clone()),
            ["geocode", "accept_language"] => Some(self.geocode.accept_language.clone()),
            ["geocode", "result_limit"] => Some(self.geocode.result_limit.to_string()),
            ["geocode", "user_agent"] => Some(self.geocode.user_agent.clone()),

            ["suggest", "debounce_ms"] => Some(self.suggest.debounce_ms.to_string()),
            ["suggest", "cooldown_ms"] => Some(self.suggest.cooldown_ms.to_string()),
            ["suggest", "min_query_len"] => Some(self.suggest.min_query_len.to_string()),

            ["delivery", "default_radius_km"] => {
                Some(self.delivery.default_radius_km.to_string())
            }

            ["map", "fit_padding_px"] => Some(self.map.fit_padding_px.to_string()),
            ["map", "circle_color"] => Some(self.map.circle_color.clone()),

            ["store", "base_url"] => Some(self.store.base_url.clone()),
            ["store", "api_token"] => Some(self.store.api_token.clone()),
            ["store", "seller_id"] => Some(self.store.seller_id.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["geocode", "endpoint"] => {
                self.geocode.endpoint = value.to_string();
            }
            ["geocode", "country_filter"] => {
                self.geocode.country_filter = value.to_string();
            }
            ["geocode", "accept_language"] => {
                self.geocode.accept_language = value.to_string();
            }
            ["geocode", "result_limit"] => {
                self.geocode.result_limit = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid limit value: {}", value)))?;
            }
            ["geocode", "user_agent"] => {
                self.geocode.user_agent = value.to_string();
            }

            ["suggest", "debounce_ms"] => {
                self.suggest.debounce_ms = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid debounce value: {}", value)))?;
            }
            ["suggest", "cooldown_ms"] => {
                self.suggest.cooldown_ms = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid cooldown value: {}", value)))?;
            }
            ["suggest", "min_query_len"] => {
                self.suggest.min_query_len = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid length value: {}", value)))?;
            }

            ["delivery", "default_radius_km"] => {
                self.delivery.default_radius_km = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid radius value: {}", value)))?;
            }

            ["map", "fit_padding_px"] => {
                self.map.fit_padding_px = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid padding value: {}", value)))?;
            }
            ["map", "circle_color"] => {
                self.map.circle_color = value.to_string();
            }

            ["store", "base_url"] => {
                self.store.base_url = value.to_string();
            }
            ["store", "api_token"] => {
                self.store.api_token = value.to_string();
            }
            ["store", "seller_id"] => {
                self.store.seller_id = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "geocode.endpoint",
            "geocode.country_filter",
            "geocode.accept_language",
            "geocode.result_limit",
            "geocode.user_agent",
            "suggest.debounce_ms",
            "suggest.cooldown_ms",
            "suggest.min_query_len",
            "delivery.default_radius_km",
            "map.fit_padding_px",
            "map.circle_color",
            "store.base_url",
            "store.api_token",
            "store.seller_id",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Country filter as an option, empty string meaning worldwide
    pub fn country_filter(&self) -> Option<&str> {
        let trimmed = self.geocode.country_filter.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Build a geocoding client from these settings
    pub fn geocoder(&self) -> NominatimClient {
        NominatimClient::new(&self.geocode.user_agent)
            .with_base_url(self.geocode.endpoint.clone())
            .with_limit(self.geocode.result_limit)
            .with_accept_language(self.geocode.accept_language.clone())
    }

    /// Debounce policy from these settings
    pub fn debounce_policy(&self) -> DebouncePolicy {
        DebouncePolicy {
            quiet: Duration::from_millis(self.suggest.debounce_ms),
            min_query_len: self.suggest.min_query_len,
            cooldown: Duration::from_millis(self.suggest.cooldown_ms),
        }
    }

    /// Session credentials for store clients
    pub fn session_context(&self) -> SessionContext {
        let token = self.store.api_token.trim();
        if token.is_empty() {
            SessionContext::default()
        } else {
            SessionContext::with_token(token)
        }
    }

    /// Seller id owning this session
    ///
    /// An unset id yields a fresh random one; a malformed id is a
    /// configuration error.
    pub fn seller_id(&self) -> Result<Uuid> {
        let raw = self.store.seller_id.trim();
        if raw.is_empty() {
            return Ok(Uuid::new_v4());
        }
        raw.parse()
            .map_err(|_| Error::Config(format!("Invalid seller id: {}", raw)))
    }
}
