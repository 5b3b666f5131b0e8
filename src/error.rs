use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.api_key")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, endpoint)
    pub details: Option<String>,
    /// Source of the error (e.g., "env", "tts")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the synthesis client.
///
/// All failure paths of a speech run end up here: bad configuration, a
/// transport-level failure, a rejection from the remote service, or a local
/// file write error. The underlying cause is carried as a nested source where
/// one exists, so callers can distinguish categories if they want to, even
/// though the demo surface only ever prints one generic message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Speech API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new transport error wrapping the underlying HTTP failure
    pub fn transport(msg: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Transport {
            message: msg.into(),
            source,
        }
    }

    /// Create a new remote API error from a status code and response body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_formats_context() {
        let err = Error::configuration_with_context(
            "OPENAI_API_KEY is not set",
            ErrorContext::new().with_field_path("api_key").with_source("env"),
        );
        let msg = err.to_string();
        assert!(msg.contains("OPENAI_API_KEY is not set"));
        assert!(msg.contains("field: api_key"));
        assert!(msg.contains("source: env"));
    }

    #[test]
    fn api_error_carries_status() {
        let err = Error::api(401, "invalid api key");
        assert!(matches!(err, Error::Api { status: 401, .. }));
        assert!(err.to_string().contains("HTTP 401"));
    }
}
