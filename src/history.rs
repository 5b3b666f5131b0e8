//! Bookkeeping of synthesis attempts.
//!
//! Every run, successful or failed, can be recorded to a [`SynthesisSink`]:
//! what was spoken, with which model and voice, how long generation took and
//! how many audio bytes came back. Collection is opt-in; the default sink
//! discards everything.

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

/// Outcome of a synthesis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStatus {
    Success,
    Failed,
}

/// One synthesis attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRecord {
    pub id: String,
    pub text: String,
    pub model: String,
    pub voice: Option<String>,
    pub status: SynthesisStatus,
    pub error_message: Option<String>,
    pub generation_ms: u64,
    pub audio_bytes: Option<u64>,
    pub created_at: SystemTime,
}

impl SynthesisRecord {
    pub fn success(
        text: impl Into<String>,
        model: impl Into<String>,
        voice: Option<&str>,
        audio_bytes: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            model: model.into(),
            voice: voice.map(str::to_string),
            status: SynthesisStatus::Success,
            error_message: None,
            generation_ms: elapsed.as_millis() as u64,
            audio_bytes: Some(audio_bytes),
            created_at: SystemTime::now(),
        }
    }

    pub fn failure(
        text: impl Into<String>,
        model: impl Into<String>,
        voice: Option<&str>,
        error_message: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            model: model.into(),
            voice: voice.map(str::to_string),
            status: SynthesisStatus::Failed,
            error_message: Some(error_message.into()),
            generation_ms: elapsed.as_millis() as u64,
            audio_bytes: None,
            created_at: SystemTime::now(),
        }
    }
}

/// Destination for synthesis records.
#[async_trait]
pub trait SynthesisSink: Send + Sync {
    async fn record(&self, record: SynthesisRecord) -> Result<()>;
}

/// Default sink: records nothing.
pub struct NoopSink;

#[async_trait]
impl SynthesisSink for NoopSink {
    async fn record(&self, _record: SynthesisRecord) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink, bounded to the most recent entries.
pub struct InMemorySink {
    records: Arc<RwLock<Vec<SynthesisRecord>>>,
    max_records: usize,
}

impl InMemorySink {
    pub fn new(max: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            max_records: max,
        }
    }

    /// Most recent records first.
    pub fn recent(&self, limit: usize) -> Vec<SynthesisRecord> {
        self.records
            .read()
            .unwrap()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

#[async_trait]
impl SynthesisSink for InMemorySink {
    async fn record(&self, record: SynthesisRecord) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records.push(record);
        if records.len() > self.max_records {
            records.remove(0);
        }
        Ok(())
    }
}

/// Console sink for debugging.
pub struct ConsoleSink {
    prefix: String,
}

impl ConsoleSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new("[TTS]")
    }
}

#[async_trait]
impl SynthesisSink for ConsoleSink {
    async fn record(&self, record: SynthesisRecord) -> Result<()> {
        println!("{} {:?}", self.prefix, record);
        Ok(())
    }
}
