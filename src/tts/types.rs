//! TTS (Text-to-Speech) types.

use base64::Engine as _;

/// Audio output from TTS.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioOutput {
    /// Render the audio as a base64 `data:` URL suitable for direct playback
    /// in a browser audio element.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Lenient parse: unknown names fall back to the service default (mp3).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "opus" => Self::Opus,
            "aac" => Self::Aac,
            "flac" => Self::Flac,
            "wav" => Self::Wav,
            "pcm" => Self::Pcm,
            _ => Self::Mp3,
        }
    }
}

/// Named voice presets offered by the speech endpoint.
///
/// Request options carry the voice as a plain string so that names unknown to
/// this crate still reach the service unvalidated; the enum exists for callers
/// who want the known set spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    Alloy,
    Ash,
    Ballad,
    Coral,
    Echo,
    Fable,
    Nova,
    Onyx,
    Sage,
    Shimmer,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Ballad => "ballad",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Nova => "nova",
            Self::Onyx => "onyx",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Voice> for String {
    fn from(voice: Voice) -> Self {
        voice.as_str().to_string()
    }
}

/// Options for TTS synthesis.
#[derive(Debug, Clone, Default)]
pub struct TtsOptions {
    pub voice: Option<String>,
    pub instructions: Option<String>,
    pub speed: Option<f32>,
    pub response_format: Option<String>,
}
