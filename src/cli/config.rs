//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "geocode.country_filter")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[geocode]");
    println!("endpoint = \"{}\"", config.geocode.endpoint);
    println!("country_filter = \"{}\"", config.geocode.country_filter);
    println!("accept_language = \"{}\"", config.geocode.accept_language);
    println!("result_limit = {}", config.geocode.result_limit);
    println!("user_agent = \"{}\"", config.geocode.user_agent);
    println!();

    println!("[suggest]");
    println!("debounce_ms = {}", config.suggest.debounce_ms);
    println!("cooldown_ms = {}", config.suggest.cooldown_ms);
    println!("min_query_len = {}", config.suggest.min_query_len);
    println!();

    println!("[delivery]");
    println!("default_radius_km = {}", config.delivery.default_radius_km);
    println!();

    println!("[map]");
    println!("circle_color = \"{}\"", config.map.circle_color);
    println!("circle_fill_opacity = {}", config.map.circle_fill_opacity);
    println!("circle_weight = {}", config.map.circle_weight);
    println!("fit_padding_px = {}", config.map.fit_padding_px);
    println!();

    println!("[store]");
    println!("base_url = \"{}\"", config.store.base_url);
    if config.store.api_token.is_empty() {
        println!("api_token = \"\" # not configured");
    } else {
        println!("api_token = \"***\" # configured");
    }
    println!("seller_id = \"{}\"", config.store.seller_id);
}
