//! Collaborator seams of the pipeline. Everything that crosses a network or
//! process boundary sits behind one of these traits, so the orchestrator can
//! be driven end-to-end with mocks.

use async_trait::async_trait;
use meetbrief_core::analysis::AnalysisDocument;
use meetbrief_core::lang::TargetLanguage;
use meetbrief_core::transcript::{MergedTranscript, TranscriptionResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An uploaded chat file: an opaque transport handle plus its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub handle: String,
    pub name: String,
}

/// One user-supplied input contributing to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    File(SourceFile),
    Link(String),
}

impl Source {
    /// Short label for progress messages and logs.
    pub fn label(&self) -> &str {
        match self {
            Source::File(f) => &f.name,
            Source::Link(url) => url,
        }
    }
}

#[async_trait]
pub trait Downloader: Send + Sync {
    /// Fetches a source to a local media file under `work_dir`.
    async fn download(&self, source: &Source, work_dir: &Path) -> anyhow::Result<PathBuf>;
}

#[async_trait]
pub trait AudioProcessor: Send + Sync {
    /// Returns an audio file for the given media file (pass-through for
    /// audio inputs, extraction for video containers).
    async fn ensure_audio(&self, input: &Path, work_dir: &Path) -> anyhow::Result<PathBuf>;

    /// Splits oversized audio into ordered chunks; small files come back as
    /// the single original path.
    async fn split_if_oversized(
        &self,
        input: &Path,
        max_bytes: u64,
        work_dir: &Path,
    ) -> anyhow::Result<Vec<PathBuf>>;
}

#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> anyhow::Result<TranscriptionResult>;
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(
        &self,
        transcript: &MergedTranscript,
        target: TargetLanguage,
    ) -> anyhow::Result<AnalysisDocument>;
}

/// The chat-transport boundary: receives the finished reports and the
/// preview text for delivery to the user.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, bundle: &ReportBundle) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub name: String,
    pub caption: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBundle {
    pub preview: String,
    pub files: Vec<ReportFile>,
}
