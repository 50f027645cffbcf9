// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, WorkbenchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub storage: StorageConfig,
    pub extraction: ExtractionConfig,
    pub rubric: RubricConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
    pub parallel_requests: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Seed a verification checklist from extracted entities on compare
    pub seed_checklist: bool,
    pub max_response_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RubricConfig {
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryRule {
    pub id: String,
    pub label: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RIGHTS_WORKBENCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| WorkbenchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| WorkbenchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            providers: ProvidersConfig {
                openai_api_key: None,
                anthropic_api_key: None,
                gemini_api_key: None,
                request_timeout_secs: 60,
                max_tokens: 1024,
                parallel_requests: 3,
            },
            storage: StorageConfig {
                path: PathBuf::from("data/evaluations.json"),
                pretty: true,
            },
            extraction: ExtractionConfig {
                seed_checklist: true,
                max_response_chars: 100_000,
            },
            rubric: RubricConfig { categories: vec![] },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.providers.parallel_requests == 0 {
            return Err(WorkbenchError::Config(
                "parallel_requests must be greater than 0".to_string(),
            ));
        }

        if self.providers.request_timeout_secs == 0 {
            return Err(WorkbenchError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.providers.max_tokens == 0 {
            return Err(WorkbenchError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_config();
        config.providers.parallel_requests = 0;
        assert!(config.validate().is_err());
    }
}
