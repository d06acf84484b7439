use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub secrets: SecretSettings,
    pub storage: StorageSettings,
    pub transcription: TranscriptionSettings,
    pub llm: LlmSettings,
    pub policy: PolicySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Hard wall-clock budget per request; the transcription poll budget must
    /// fit comfortably inside it.
    pub request_deadline_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_deadline_secs: 360,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecretSettings {
    pub completion_key_name: String,
    pub media_credentials_name: String,
    pub media_username_field: String,
    pub media_password_field: String,
}

impl Default for SecretSettings {
    fn default() -> Self {
        Self {
            completion_key_name: "OpenAiApiKey".to_string(),
            media_credentials_name: "TwilioCredentials".to_string(),
            media_username_field: "accountSid".to_string(),
            media_password_field: "authToken".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Durable-store URI prefix the uploaded object handle is minted under.
    pub bucket_uri: String,
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket_uri: "s3://voxrelay-media".to_string(),
            key_prefix: "audio".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub endpoint: String,
    pub language_code: String,
    pub media_format: String,
    pub poll_interval_secs: u64,
    pub max_attempts: u32,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8085".to_string(),
            language_code: "en-US".to_string(),
            media_format: "mp3".to_string(),
            poll_interval_secs: 10,
            max_attempts: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub endpoint: String,
    pub chat_model: String,
    pub system_prompt: String,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            system_prompt: "You are a helpful assistant replying to text messages.".to_string(),
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Whether an audio-pipeline failure maps to a server-error status at the
    /// transport boundary. Default keeps the success-class reply.
    pub audio_failure_is_server_error: bool,
    /// Whether the diagnostic trace is appended to the failure reply.
    /// Default is log-only.
    pub echo_trace: bool,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            audio_failure_is_server_error: false,
            echo_trace: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Defaults with environment overrides for deployment-varying fields.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Some(port) = env_parse("SERVER_PORT") {
            settings.server.port = port;
        }
        if let Some(deadline) = env_parse("REQUEST_DEADLINE_SECS") {
            settings.server.request_deadline_secs = deadline;
        }
        if let Ok(bucket) = std::env::var("STORAGE_BUCKET_URI") {
            settings.storage.bucket_uri = bucket;
        }
        if let Ok(endpoint) = std::env::var("TRANSCRIBE_ENDPOINT") {
            settings.transcription.endpoint = endpoint;
        }
        if let Some(interval) = env_parse("TRANSCRIBE_POLL_INTERVAL_SECS") {
            settings.transcription.poll_interval_secs = interval;
        }
        if let Some(attempts) = env_parse("TRANSCRIBE_MAX_ATTEMPTS") {
            settings.transcription.max_attempts = attempts;
        }
        if let Ok(endpoint) = std::env::var("COMPLETION_ENDPOINT") {
            settings.llm.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("COMPLETION_MODEL") {
            settings.llm.chat_model = model;
        }
        if let Some(flag) = env_parse("AUDIO_FAILURE_IS_SERVER_ERROR") {
            settings.policy.audio_failure_is_server_error = flag;
        }
        if let Some(flag) = env_parse("ECHO_TRACE") {
            settings.policy.echo_trace = flag;
        }

        settings
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}
