use std::collections::BTreeMap;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::DEFAULT_MODE;

/// Mode name to system prompt. Unknown modes fall back to the `default` entry.
#[derive(Debug, Clone)]
pub struct SystemPrompts {
    prompts: BTreeMap<String, String>,
    fallback: String,
}

#[derive(Deserialize)]
struct PromptFile {
    system_prompts: BTreeMap<String, String>,
}

impl SystemPrompts {
    /// Loads a `system_prompts` map from a config file (extension inferred).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let file: PromptFile = Config::builder()
            .add_source(File::with_name(path))
            .build()?
            .try_deserialize()?;

        Self::from_map(file.system_prompts)
    }

    pub fn from_map(prompts: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let fallback = prompts.get(DEFAULT_MODE).cloned().ok_or_else(|| {
            ConfigError::Message(format!("system prompt '{}' is required", DEFAULT_MODE))
        })?;

        Ok(Self { prompts, fallback })
    }

    pub fn get(&self, mode: &str) -> &str {
        self.prompts
            .get(mode)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.prompts.contains_key(mode)
    }

    /// Mode names in sorted order.
    pub fn modes(&self) -> Vec<String> {
        self.prompts.keys().cloned().collect()
    }
}
