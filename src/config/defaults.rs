//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default geocoding country filter (ISO 3166-1 alpha-2, comma separated)
pub const DEFAULT_COUNTRY_FILTER: &str = "fr";

/// Default language for geocoded address labels
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "fr";

/// Default maximum number of suggestion candidates per search
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Client identification sent to the geocoding provider
pub const DEFAULT_USER_AGENT: &str = concat!("gallery-zone/", env!("CARGO_PKG_VERSION"));

/// Quiet period before a suggestion call is issued, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Window in which an identical query is not re-sent, in milliseconds
pub const DEFAULT_COOLDOWN_MS: u64 = 250;

/// Minimum query length that triggers a suggestion call
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Default delivery radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "gallery-zone";
