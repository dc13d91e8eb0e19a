//! Model: AppConfig and related structs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Print a prompt line before reading each command.
    pub echo_prompts: bool,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Upper bound on stored records; `None` means unbounded.
    pub max_records: Option<usize>,
    /// Keep each grouped query's output under its collection name.
    pub materialize_results: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            echo_prompts: true,
            store: StoreConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_records: None,
            materialize_results: false,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_records == Some(0) {
            return Err("store.max_records must be > 0 when set".to_string());
        }
        Ok(())
    }
}
