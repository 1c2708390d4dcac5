mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChatSettings, DatabaseSettings, LlmSettings, LoggingSettings, ScaffoldSettings, ServerSettings,
    Settings, StorageProvider, StorageSettings,
};
