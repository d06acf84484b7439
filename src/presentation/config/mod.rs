mod settings;

pub use settings::{
    LlmSettings, LoggingSettings, PolicySettings, SecretSettings, ServerSettings, Settings,
    StorageSettings, TranscriptionSettings,
};
