//! # voxgen
//!
//! A streaming text-to-speech client for OpenAI-compatible speech endpoints.
//!
//! The crate performs one job well: it assembles a speech synthesis request
//! (model, voice, input text, optional speaking instructions), issues it to a
//! remote `/v1/audio/speech` endpoint, and streams the resulting audio bytes
//! to a local file as they arrive.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voxgen::{SpeechConfig, SpeechRunner};
//!
//! #[tokio::main]
//! async fn main() -> voxgen::Result<()> {
//!     let config = SpeechConfig::from_env()?
//!         .with_instructions("Speak like a friendly story teller");
//!     let runner = SpeechRunner::new(config).await?;
//!
//!     let summary = runner.run("Hello from voxgen!", "output.mp3").await?;
//!     println!(
//!         "wrote {} bytes to {}",
//!         summary.audio_bytes,
//!         summary.output_path.display()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Explicit run configuration (credential, model, voice, style) |
//! | [`tts`] | The HTTP client and request/response vocabulary |
//! | [`runner`] | Single request → stream → file cycle with outcome reporting |
//! | [`history`] | Optional bookkeeping of synthesis attempts |

pub mod config;
pub mod error;
pub mod history;
pub mod runner;
pub mod tts;

// Re-export main types for convenience
pub use config::SpeechConfig;
pub use error::{Error, ErrorContext};
pub use history::{
    ConsoleSink, InMemorySink, NoopSink, SynthesisRecord, SynthesisSink, SynthesisStatus,
};
pub use runner::{RunSummary, SpeechRunner};
pub use tts::{AudioFormat, AudioOutput, TtsClient, TtsClientBuilder, TtsOptions, Voice};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
