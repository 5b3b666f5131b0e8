//! TTS (Text-to-Speech) over an OpenAI-compatible speech endpoint.

mod client;
mod types;

pub use client::{TtsClient, TtsClientBuilder};
pub use types::{AudioFormat, AudioOutput, TtsOptions, Voice};
