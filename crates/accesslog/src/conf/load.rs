//! Load: config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::AppConfig;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/accesslog/accesslog.toml";

impl AppConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("ACCESSLOG_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Overlay `ACCESSLOG_*` values from `lookup`; unparsable values are ignored
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(echo) = lookup("ACCESSLOG_ECHO_PROMPTS").and_then(|s| s.parse().ok()) {
            self.echo_prompts = echo;
        }
        if let Some(max) = lookup("ACCESSLOG_MAX_RECORDS").and_then(|s| s.parse().ok()) {
            self.store.max_records = Some(max);
        }
        if let Some(materialize) = lookup("ACCESSLOG_MATERIALIZE").and_then(|s| s.parse().ok()) {
            self.store.materialize_results = materialize;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()
    }
}
