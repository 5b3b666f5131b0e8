//! TTS (Text-to-Speech) client.

use super::types;
use super::types::{AudioOutput, TtsOptions};
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Client for text-to-speech synthesis.
pub struct TtsClient {
    http_client: reqwest::Client,
    model: String,
    base_url: String,
    endpoint_path: String,
    api_key: String,
}

impl TtsClient {
    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path)
    }

    fn request_body(&self, text: &str, options: &TtsOptions) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "input": text,
        });
        if let Some(voice) = &options.voice {
            body["voice"] = serde_json::Value::String(voice.clone());
        }
        if let Some(instructions) = &options.instructions {
            body["instructions"] = serde_json::Value::String(instructions.clone());
        }
        if let Some(speed) = options.speed {
            body["speed"] = serde_json::json!(speed);
        }
        if let Some(rf) = &options.response_format {
            body["response_format"] = serde_json::Value::String(rf.clone());
        }
        body
    }

    async fn send_request(&self, text: &str, options: &TtsOptions) -> Result<reqwest::Response> {
        let endpoint = self.endpoint();
        tracing::debug!(endpoint = %endpoint, model = %self.model, "sending TTS request");
        self.http_client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&self.request_body(text, options))
            .send()
            .await
            .map_err(|e| Error::transport("TTS request failed", e))
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport("Failed to read TTS error response", e))?;
        Err(Error::api(
            status.as_u16(),
            String::from_utf8_lossy(&body).into_owned(),
        ))
    }

    /// Buffered synthesis: the full audio payload is collected in memory.
    pub async fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<AudioOutput> {
        let response = self.send_request(text, options).await?;
        let response = Self::ensure_success(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport("Failed to read TTS response", e))?;
        let format = options
            .response_format
            .as_deref()
            .map(types::AudioFormat::from_str)
            .unwrap_or(types::AudioFormat::Mp3);
        Ok(AudioOutput {
            data: bytes.to_vec(),
            format,
        })
    }

    /// Streaming synthesis: yields audio chunks as the service delivers them.
    pub async fn synthesize_stream(
        &self,
        text: &str,
        options: &TtsOptions,
    ) -> Result<BoxStream<'static, Bytes>> {
        let response = self.send_request(text, options).await?;
        let response = Self::ensure_success(response).await?;
        let byte_stream = response
            .bytes_stream()
            .map_err(|e| Error::transport("TTS byte stream failed", e));
        Ok(Box::pin(byte_stream))
    }

    /// Stream the synthesized audio straight into a local file, returning the
    /// number of bytes written.
    ///
    /// The destination is created (truncating any prior run's output) only
    /// after the remote call has returned a success status, so a rejected
    /// request never leaves an empty or stale artifact behind. The open stream
    /// and file handle are dropped on every exit path.
    pub async fn synthesize_to_file(
        &self,
        text: &str,
        options: &TtsOptions,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        let mut stream = self.synthesize_stream(text, options).await?;
        let mut file = tokio::fs::File::create(path.as_ref()).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = stream.try_next().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        tracing::debug!(bytes = written, path = %path.as_ref().display(), "TTS audio written");
        Ok(written)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

pub struct TtsClientBuilder {
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout_secs: u64,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            endpoint_path: None,
            timeout_secs: 60,
        }
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub async fn build(self) -> Result<TtsClient> {
        let model = self
            .model
            .ok_or_else(|| Error::configuration("Model must be specified"))?;
        // The credential is an explicit input; resolving it from the
        // environment is the caller's job (see SpeechConfig::from_env).
        let api_key = self
            .api_key
            .ok_or_else(|| Error::configuration("API key required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| "/v1/audio/speech".to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(TtsClient {
            http_client,
            model,
            base_url,
            endpoint_path,
            api_key,
        })
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builder_requires_model_and_key() {
        // TtsClient holds the credential and deliberately has no Debug impl,
        // so assert on the Result without unwrapping it.
        assert!(matches!(
            TtsClientBuilder::new().build().await,
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            TtsClientBuilder::new().model("tts-1").build().await,
            Err(Error::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn request_body_includes_optional_fields() {
        let client = TtsClient::builder()
            .model("tts-1")
            .api_key("sk-test")
            .build()
            .await
            .unwrap();
        let options = TtsOptions {
            voice: Some("alloy".into()),
            instructions: Some("slowly".into()),
            speed: Some(1.0),
            response_format: Some("pcm".into()),
        };
        let body = client.request_body("hi", &options);
        assert_eq!(body["model"], "tts-1");
        assert_eq!(body["input"], "hi");
        assert_eq!(body["voice"], "alloy");
        assert_eq!(body["instructions"], "slowly");
        assert_eq!(body["response_format"], "pcm");

        let body = client.request_body("hi", &TtsOptions::default());
        assert!(body.get("voice").is_none());
        assert!(body.get("speed").is_none());
    }

    #[tokio::test]
    async fn endpoint_path_is_normalized() {
        let client = TtsClient::builder()
            .model("tts-1")
            .api_key("sk-test")
            .base_url("https://example.test/")
            .endpoint_path("v1/audio/speech")
            .build()
            .await
            .unwrap();
        assert_eq!(client.endpoint(), "https://example.test/v1/audio/speech");
    }
}
