//! The workflow orchestrator: Download → Transcribe → Analyze → Render →
//! Deliver, plus the cached re-render path.
//!
//! Phases are strict and sequential within one run; sources are processed
//! one at a time in arrival order, and a single source failing its download
//! or transcription drops that source, not the run. Every exit path resets
//! the session, and all temporary files live in a per-run temp directory
//! that is removed on success and failure alike.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{EngineError, RunError};
use crate::progress::{ProgressUpdate, RunPhase};
use crate::session::{ChatId, SessionStore};
use crate::traits::{
    AnalysisProvider, AudioProcessor, Downloader, ReportBundle, ReportFile, ReportSink, Source,
    TranscriptionProvider,
};
use meetbrief_core::analysis::AnalysisDocument;
use meetbrief_core::config::AppConfig;
use meetbrief_core::lang::TargetLanguage;
use meetbrief_core::preview::build_preview;
use meetbrief_core::timefmt::format_timestamp;
use meetbrief_core::transcript::{self, MergedTranscript, TranscriptionResult};
use meetbrief_report::{ReportFormat, render_html, render_pdf, render_txt, report_file_name};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub max_audio_chunk_bytes: u64,
    pub pdf_fonts_dir: Option<PathBuf>,
}

impl From<&AppConfig> for EngineConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            max_audio_chunk_bytes: cfg.max_audio_chunk_bytes,
            pdf_fonts_dir: cfg.pdf_fonts_dir.clone(),
        }
    }
}

pub struct Engine {
    cfg: EngineConfig,
    store: SessionStore,
    downloader: Arc<dyn Downloader>,
    audio: Arc<dyn AudioProcessor>,
    transcriber: Arc<dyn TranscriptionProvider>,
    analyzer: Arc<dyn AnalysisProvider>,
    sink: Arc<dyn ReportSink>,
}

impl Engine {
    pub fn new(
        cfg: EngineConfig,
        downloader: Arc<dyn Downloader>,
        audio: Arc<dyn AudioProcessor>,
        transcriber: Arc<dyn TranscriptionProvider>,
        analyzer: Arc<dyn AnalysisProvider>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            cfg,
            store: SessionStore::new(),
            downloader,
            audio,
            transcriber,
            analyzer,
            sink,
        }
    }

    /// The session store, for the transport layer to enqueue sources and
    /// inspect state.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Runs the full pipeline for a chat's queued sources.
    ///
    /// The returned future is the whole run; the caller decides whether to
    /// await it inline or spawn and supervise it.
    pub async fn run(
        &self,
        chat: ChatId,
        target: TargetLanguage,
    ) -> Result<ReportBundle, EngineError> {
        self.run_with_hook(chat, target, |_update| async {}).await
    }

    /// Same as `run`, but emits a progress hook as phases advance.
    ///
    /// The hook is intended for a periodically-edited status message and
    /// must be fast.
    pub async fn run_with_hook<F, Fut>(
        &self,
        chat: ChatId,
        target: TargetLanguage,
        on_progress: F,
    ) -> Result<ReportBundle, EngineError>
    where
        F: Fn(ProgressUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        let sources = self.store.begin_run(chat).await?;
        log::info!("run started for chat {}: {} source(s)", chat.0, sources.len());

        // From here on, every exit path must leave the session reset.
        match self.execute_run(chat, &sources, target, &on_progress).await {
            Ok(bundle) => Ok(bundle),
            Err(e) => {
                log::error!("run failed for chat {}: {e}", chat.0);
                self.store.fail_run(chat).await;
                Err(e.into())
            }
        }
    }

    /// Re-renders the cached meeting in another language. Never downloads
    /// and never transcribes; that is the point of the cache.
    pub async fn rerender(
        &self,
        chat: ChatId,
        target: TargetLanguage,
    ) -> Result<ReportBundle, EngineError> {
        self.rerender_with_hook(chat, target, |_update| async {}).await
    }

    pub async fn rerender_with_hook<F, Fut>(
        &self,
        chat: ChatId,
        target: TargetLanguage,
        on_progress: F,
    ) -> Result<ReportBundle, EngineError>
    where
        F: Fn(ProgressUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        let cached = self.store.begin_rerender(chat).await?;
        log::info!("re-render started for chat {} ({})", chat.0, target.code());

        match self
            .analyze_render_deliver(chat, cached, target, &on_progress)
            .await
        {
            Ok(bundle) => Ok(bundle),
            Err(e) => {
                log::error!("re-render failed for chat {}: {e}", chat.0);
                self.store.fail_run(chat).await;
                Err(e.into())
            }
        }
    }

    async fn execute_run<F, Fut>(
        &self,
        chat: ChatId,
        sources: &[Source],
        target: TargetLanguage,
        on_progress: &F,
    ) -> Result<ReportBundle, RunError>
    where
        F: Fn(ProgressUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        // All temp files for this run live here; dropping the guard removes
        // them on success and failure alike.
        let tmp = tempfile::tempdir()
            .map_err(|e| RunError::Internal(format!("create temp dir: {e}")))?;

        let mut local_files: Vec<(String, PathBuf)> = Vec::new();
        for (i, source) in sources.iter().enumerate() {
            on_progress(ProgressUpdate::with_detail(
                RunPhase::Download,
                format!("{}/{}: {}", i + 1, sources.len(), source.label()),
            ))
            .await;

            match self.downloader.download(source, tmp.path()).await {
                Ok(path) => local_files.push((source.label().to_string(), path)),
                Err(e) => log::warn!("download failed for {}: {e:#}", source.label()),
            }
        }

        on_progress(ProgressUpdate::phase(RunPhase::Transcribe)).await;
        let mut transcripts: Vec<TranscriptionResult> = Vec::new();
        for (label, path) in &local_files {
            match self.transcribe_source(path, tmp.path()).await {
                Ok(result) => {
                    log::info!(
                        "transcribed {label}: {} speakers, {:.0}s, lang={}",
                        result.speaker_count,
                        result.duration_seconds,
                        result.detected_language
                    );
                    transcripts.push(result);
                }
                Err(e) => log::warn!("transcription failed for {label}: {e:#}"),
            }
        }

        if transcripts.is_empty() {
            return Err(RunError::NoUsableSource);
        }
        let merged = transcript::merge(&transcripts).map_err(|_| RunError::NoUsableSource)?;

        self.analyze_render_deliver(chat, merged, target, on_progress)
            .await
    }

    /// One source → one transcription result. Oversized audio is split and
    /// the chunk results merged by the standard rules.
    async fn transcribe_source(
        &self,
        input: &Path,
        work_dir: &Path,
    ) -> anyhow::Result<TranscriptionResult> {
        let audio = self.audio.ensure_audio(input, work_dir).await?;
        let chunks = self
            .audio
            .split_if_oversized(&audio, self.cfg.max_audio_chunk_bytes, work_dir)
            .await?;

        let mut results = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            results.push(self.transcriber.transcribe(chunk).await?);
            if chunk != &audio {
                // Chunk audio is no longer needed once transcribed.
                let _ = tokio::fs::remove_file(chunk).await;
            }
        }
        let _ = tokio::fs::remove_file(&audio).await;

        let merged = transcript::merge(&results)?;
        Ok(merged.into())
    }

    /// The shared tail of both paths: analyze, render, cache, deliver.
    async fn analyze_render_deliver<F, Fut>(
        &self,
        chat: ChatId,
        transcript: MergedTranscript,
        target: TargetLanguage,
        on_progress: &F,
    ) -> Result<ReportBundle, RunError>
    where
        F: Fn(ProgressUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        on_progress(ProgressUpdate::with_detail(
            RunPhase::Analyze,
            format!(
                "{} speakers, {}",
                transcript.speaker_count,
                format_timestamp(transcript.duration_seconds)
            ),
        ))
        .await;
        let analysis = self
            .analyzer
            .analyze(&transcript, target)
            .await
            .map_err(|e| RunError::Analysis(format!("{e:#}")))?;

        on_progress(ProgressUpdate::phase(RunPhase::Render)).await;
        let bundle = self.render_bundle(&analysis, &transcript, target).await?;

        // Cache the newest artifacts before delivery, so a later re-render
        // can skip download and transcription even if delivery fails here.
        self.store.complete_run(chat, transcript, analysis).await;

        on_progress(ProgressUpdate::phase(RunPhase::Deliver)).await;
        self.sink
            .deliver(&bundle)
            .await
            .map_err(|e| RunError::Delivery(format!("{e:#}")))?;

        on_progress(ProgressUpdate::phase(RunPhase::Done)).await;
        Ok(bundle)
    }

    async fn render_bundle(
        &self,
        analysis: &AnalysisDocument,
        transcript: &MergedTranscript,
        target: TargetLanguage,
    ) -> Result<ReportBundle, RunError> {
        let preview = build_preview(analysis, transcript);
        let ui = target.resolve(analysis).ui();
        let captions = (ui.caption_pdf, ui.caption_html, ui.caption_txt);

        let doc = analysis.clone();
        let segmented = transcript.speaker_segmented_text.clone();
        let fonts_dir = self.cfg.pdf_fonts_dir.clone();
        let date = chrono::Local::now().date_naive();

        // Rendering (the PDF pass especially) is synchronous CPU work; keep
        // it off the async scheduler so progress updates for other sessions
        // stay responsive.
        let files = tokio::task::spawn_blocking(move || -> Result<Vec<ReportFile>, RunError> {
            let topic = doc.topic_short().to_string();

            let pdf = render_pdf(&doc, target, fonts_dir.as_deref(), date)
                .map_err(|e| RunError::Render(e.to_string()))?;
            let html = render_html(&doc, target, &segmented, date)
                .map_err(|e| RunError::Render(e.to_string()))?;
            let txt = render_txt(&doc, target, &segmented, date);

            Ok(vec![
                ReportFile {
                    name: report_file_name(&topic, date, ReportFormat::Pdf),
                    caption: captions.0.into(),
                    bytes: pdf,
                },
                ReportFile {
                    name: report_file_name(&topic, date, ReportFormat::Html),
                    caption: captions.1.into(),
                    bytes: html,
                },
                ReportFile {
                    name: report_file_name(&topic, date, ReportFormat::Txt),
                    caption: captions.2.into(),
                    bytes: txt,
                },
            ])
        })
        .await
        .map_err(|e| RunError::Internal(format!("render task panicked: {e}")))??;

        Ok(ReportBundle { preview, files })
    }
}
