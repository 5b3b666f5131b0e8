//! Speech run configuration.
//!
//! The credential is an explicit input here rather than an ambient global:
//! [`SpeechConfig::new`] takes the API key directly, and [`SpeechConfig::from_env`]
//! is the only place in the crate that reads the process environment.

use crate::tts::{TtsOptions, Voice};
use crate::{Error, ErrorContext, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default synthesis model.
pub const DEFAULT_MODEL: &str = "tts-1";
/// Default voice preset.
pub const DEFAULT_VOICE: Voice = Voice::Alloy;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for a speech synthesis run.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub instructions: Option<String>,
    pub speed: Option<f32>,
    pub response_format: Option<String>,
}

impl SpeechConfig {
    /// Create a configuration with defaults matching the reference demo:
    /// model `tts-1`, voice `alloy`, no instructions, default format.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.as_str().to_string(),
            instructions: None,
            speed: None,
            response_format: None,
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// Fails with a configuration error when `OPENAI_API_KEY` is absent.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            Error::configuration_with_context(
                format!("{} is not set", API_KEY_ENV),
                ErrorContext::new().with_field_path("api_key").with_source("env"),
            )
        })?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the voice by name. Accepts a [`Voice`] preset or any string; unknown
    /// names are passed through for the remote service to accept or reject.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    /// Per-request options derived from this configuration.
    pub fn options(&self) -> TtsOptions {
        TtsOptions {
            voice: Some(self.voice.clone()),
            instructions: self.instructions.clone(),
            speed: self.speed,
            response_format: self.response_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_demo() {
        let config = SpeechConfig::new("sk-test");
        assert_eq!(config.model, "tts-1");
        assert_eq!(config.voice, "alloy");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.instructions.is_none());
        assert!(config.speed.is_none());
    }

    #[test]
    fn builder_setters_apply() {
        let config = SpeechConfig::new("sk-test")
            .with_model("tts-1-hd")
            .with_voice(Voice::Nova)
            .with_instructions("whisper")
            .with_speed(1.25)
            .with_response_format("wav");
        assert_eq!(config.model, "tts-1-hd");
        assert_eq!(config.voice, "nova");
        let options = config.options();
        assert_eq!(options.voice.as_deref(), Some("nova"));
        assert_eq!(options.instructions.as_deref(), Some("whisper"));
        assert_eq!(options.speed, Some(1.25));
        assert_eq!(options.response_format.as_deref(), Some("wav"));
    }

    // Tests mutating the process environment must hold this lock; cargo runs
    // tests in this target concurrently and env vars are process-wide.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn from_env_requires_api_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        let saved = std::env::var(API_KEY_ENV).ok();

        std::env::remove_var(API_KEY_ENV);
        let err = SpeechConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        std::env::set_var(API_KEY_ENV, "sk-from-env");
        let config = SpeechConfig::from_env().unwrap();
        assert_eq!(config.api_key, "sk-from-env");

        match saved {
            Some(value) => std::env::set_var(API_KEY_ENV, value),
            None => std::env::remove_var(API_KEY_ENV),
        }
    }
}
