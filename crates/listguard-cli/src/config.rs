//! Application configuration

use listguard_llm::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the compliance rulebook document
    #[serde(default = "default_rulebook_path")]
    pub rulebook_path: String,

    /// External model service settings
    #[serde(default)]
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(rulebook) = &cli.rulebook {
            config.rulebook_path = rulebook.clone();
        }

        if let Some(api_key) = &cli.api_key {
            config.service.api_key = api_key.clone();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rulebook_path: default_rulebook_path(),
            service: ServiceConfig::default(),
        }
    }
}

fn default_rulebook_path() -> String {
    "./rules/forbidden_terms.md".to_string()
}
