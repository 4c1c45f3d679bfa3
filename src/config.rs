use serde::Deserialize;
use validator::Validate;

/// Main configuration for Chatrelay
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct Config {
    /// HTTP server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Gemini API key; the process refuses to start without one
    #[validate(length(min = 1))]
    pub gemini_api_key: String,

    /// Gemini model invoked for every conversation
    pub gemini_model: String,

    /// Gemini API base URL (overridable so tests can target a local mock)
    pub gemini_base_url: String,

    /// Log level (e.g., info, debug, trace)
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("port", 3000)?
            .set_default("gemini_model", "gemini-flash-latest")?
            .set_default(
                "gemini_base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("log_level", "info")?
            // Environment variables: GEMINI_API_KEY, PORT, GEMINI_MODEL, ...
            .add_source(config::Environment::default())
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }
}
