//! Speech request runner: one request → stream → file cycle.

use crate::config::SpeechConfig;
use crate::history::{NoopSink, SynthesisRecord, SynthesisSink};
use crate::tts::{TtsClient, TtsOptions};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub audio_bytes: u64,
    pub elapsed: Duration,
}

/// Performs a single synthesis cycle: build the request, stream the audio to
/// the output file, report the outcome.
pub struct SpeechRunner {
    client: TtsClient,
    options: TtsOptions,
    sink: Arc<dyn SynthesisSink>,
}

impl SpeechRunner {
    pub async fn new(config: SpeechConfig) -> Result<Self> {
        let options = config.options();
        let client = TtsClient::builder()
            .model(config.model)
            .api_key(config.api_key)
            .base_url(config.base_url)
            .build()
            .await?;
        Ok(Self {
            client,
            options,
            sink: Arc::new(NoopSink),
        })
    }

    /// Attach a sink that receives a record for every run, success or failure.
    pub fn with_sink(mut self, sink: Arc<dyn SynthesisSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn options(&self) -> &TtsOptions {
        &self.options
    }

    /// Run one synthesis. The output file is created fresh on success and a
    /// prior run's file at the same path is overwritten; any transport, API,
    /// or filesystem failure is returned as the single error of the operation.
    pub async fn run(&self, text: &str, output_path: impl AsRef<Path>) -> Result<RunSummary> {
        let output_path = output_path.as_ref().to_path_buf();
        tracing::info!(
            model = %self.client.model(),
            voice = self.options.voice.as_deref().unwrap_or("default"),
            path = %output_path.display(),
            "starting speech synthesis"
        );

        let started = Instant::now();
        let result = self
            .client
            .synthesize_to_file(text, &self.options, &output_path)
            .await;
        let elapsed = started.elapsed();

        match result {
            Ok(audio_bytes) => {
                tracing::info!(
                    bytes = audio_bytes,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "speech synthesis complete"
                );
                let record = SynthesisRecord::success(
                    text,
                    self.client.model(),
                    self.options.voice.as_deref(),
                    audio_bytes,
                    elapsed,
                );
                let _ = self.sink.record(record).await;
                Ok(RunSummary {
                    output_path,
                    audio_bytes,
                    elapsed,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "speech synthesis failed");
                let record = SynthesisRecord::failure(
                    text,
                    self.client.model(),
                    self.options.voice.as_deref(),
                    e.to_string(),
                    elapsed,
                );
                let _ = self.sink.record(record).await;
                Err(e)
            }
        }
    }
}
