use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub llm: LlmSettings,
    pub chat: ChatSettings,
    pub logging: LoggingSettings,
    pub scaffold: ScaffoldSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection string. Absence is reported by the first store operation.
    #[serde(default)]
    pub url: Option<String>,
    pub database_name: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Postgres,
    Memory,
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::Postgres => "PostgreSQL",
            StorageProvider::Memory => "In-memory",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub history_window: usize,
    pub summary_limit: usize,
    pub prompts_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

/// Scaffold mode swaps the language-model client for a canned local responder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScaffoldSettings {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl Settings {
    /// Layers built-in defaults, `config/base`, `config/{environment}` and
    /// `APP_`-prefixed environment variables (`APP_DATABASE__URL`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.database_name", "custom_ai_assistant")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", 5)?
            .set_default("storage.provider", "postgres")?
            .set_default("llm.provider", "groq")?
            .set_default("llm.chat_model", "llama-3.3-70b-versatile")?
            .set_default("llm.max_tokens", 10000)?
            .set_default("llm.temperature", 0.4)?
            .set_default("chat.history_window", 10)?
            .set_default("chat.summary_limit", 50)?
            .set_default("chat.prompts_path", "config/prompts")?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("scaffold.enabled", false)?
            .set_default("scaffold.mock_response_delay_ms", 0)?
            .add_source(File::with_name("config/base").required(false))
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
