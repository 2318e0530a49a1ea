//! Reference front end: runs the pipeline on local files and links from the
//! command line and writes the three reports to an output directory. A chat
//! transport would wire the same collaborators and react to the same
//! progress hook.

mod config_store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use config_store::ConfigStore;
use meetbrief_core::config::AppConfig;
use meetbrief_core::lang::TargetLanguage;
use meetbrief_core::media::{extract_media_link, is_media_file_name};
use meetbrief_engine::engine::{Engine, EngineConfig};
use meetbrief_engine::session::ChatId;
use meetbrief_engine::traits::{
    AnalysisProvider, AudioProcessor, Downloader, ReportBundle, ReportSink, Source,
    TranscriptionProvider,
};
use meetbrief_providers::deepgram::{DeepgramConfig, build_transcription_request, parse_transcription_response};
use meetbrief_providers::openai::{OpenAiConfig, build_analysis_request, parse_analysis_document};
use meetbrief_providers::runtime::{TRANSCRIPTION_TIMEOUT, execute, execute_with_timeout};
use meetbrief_providers::{download, ffmpeg};

struct MediaDownloader;

#[async_trait]
impl Downloader for MediaDownloader {
    async fn download(&self, source: &Source, work_dir: &Path) -> anyhow::Result<PathBuf> {
        match source {
            // CLI "uploads" are local paths. Copy into the run's work dir so
            // the engine's cleanup never touches the user's original file.
            Source::File(file) => {
                let src = PathBuf::from(&file.handle);
                let dest = work_dir.join(&file.name);
                tokio::fs::copy(&src, &dest).await.map_err(|e| {
                    anyhow::anyhow!("copy {} into work dir: {e}", src.display())
                })?;
                Ok(dest)
            }
            Source::Link(url) => download::download_url(url, work_dir).await,
        }
    }
}

struct FfmpegAudio;

#[async_trait]
impl AudioProcessor for FfmpegAudio {
    async fn ensure_audio(&self, input: &Path, work_dir: &Path) -> anyhow::Result<PathBuf> {
        ffmpeg::ensure_audio(input, work_dir).await
    }

    async fn split_if_oversized(
        &self,
        input: &Path,
        max_bytes: u64,
        work_dir: &Path,
    ) -> anyhow::Result<Vec<PathBuf>> {
        ffmpeg::split_if_oversized(input, max_bytes, work_dir).await
    }
}

struct DeepgramTranscriber {
    cfg: DeepgramConfig,
}

#[async_trait]
impl TranscriptionProvider for DeepgramTranscriber {
    async fn transcribe(
        &self,
        audio: &Path,
    ) -> anyhow::Result<meetbrief_core::transcript::TranscriptionResult> {
        let bytes = tokio::fs::read(audio).await?;
        log::info!("transcribing {} ({} bytes)", audio.display(), bytes.len());

        let req = build_transcription_request(&self.cfg, bytes, mime_for(audio));
        let resp = execute_with_timeout(&req, TRANSCRIPTION_TIMEOUT).await?;
        if !resp.is_success() {
            anyhow::bail!(
                "transcription failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body[..resp.body.len().min(500)])
            );
        }
        parse_transcription_response(&resp.body)
    }
}

struct OpenAiAnalyzer {
    cfg: OpenAiConfig,
}

#[async_trait]
impl AnalysisProvider for OpenAiAnalyzer {
    async fn analyze(
        &self,
        transcript: &meetbrief_core::transcript::MergedTranscript,
        target: TargetLanguage,
    ) -> anyhow::Result<meetbrief_core::analysis::AnalysisDocument> {
        let req = build_analysis_request(&self.cfg, transcript, target);
        let resp = execute(&req).await?;
        if !resp.is_success() {
            anyhow::bail!(
                "analysis failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body[..resp.body.len().min(500)])
            );
        }
        parse_analysis_document(&resp.body)
    }
}

struct DirectorySink {
    out_dir: PathBuf,
}

#[async_trait]
impl ReportSink for DirectorySink {
    async fn deliver(&self, bundle: &ReportBundle) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        for file in &bundle.files {
            let path = self.out_dir.join(&file.name);
            tokio::fs::write(&path, &file.bytes).await?;
            println!("{}: {}", file.caption, path.display());
        }
        println!("\n{}", bundle.preview);
        Ok(())
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") | Some("opus") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("aac") => "audio/aac",
        _ => "application/octet-stream",
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: meetbrief <media file or link>...");
        eprintln!();
        eprintln!("environment:");
        eprintln!("  DEEPGRAM_API_KEY      transcription key (required)");
        eprintln!("  OPENAI_API_KEY        analysis key (required)");
        eprintln!("  OPENAI_BASE_URL       analysis endpoint (default: api.openai.com/v1)");
        eprintln!("  MEETBRIEF_LANG        report language: ru en kk es zh original");
        eprintln!("  MEETBRIEF_OUT_DIR     where reports are written (default: .)");
        eprintln!("  MEETBRIEF_FONTS_DIR   extra PDF fonts (CJK)");
        std::process::exit(2);
    }

    let deepgram_key = std::env::var("DEEPGRAM_API_KEY")
        .map_err(|_| anyhow::anyhow!("DEEPGRAM_API_KEY is not set"))?;
    let openai_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY is not set"))?;

    // Optional JSON config file; environment variables override it.
    let mut cfg = match std::env::var("MEETBRIEF_CONFIG") {
        Ok(path) => ConfigStore::at_path(path).load()?,
        Err(_) => AppConfig::default(),
    };
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        cfg.analysis.base_url = base_url;
    }
    cfg.pdf_fonts_dir = std::env::var("MEETBRIEF_FONTS_DIR").ok().map(PathBuf::from);
    cfg.api_keys_present = true;

    let target = TargetLanguage::parse(&env_or("MEETBRIEF_LANG", &cfg.default_report_language))
        .ok_or_else(|| anyhow::anyhow!("unsupported MEETBRIEF_LANG value"))?;
    let out_dir = PathBuf::from(env_or("MEETBRIEF_OUT_DIR", "."));

    let engine = Engine::new(
        EngineConfig::from(&cfg),
        Arc::new(MediaDownloader),
        Arc::new(FfmpegAudio),
        Arc::new(DeepgramTranscriber {
            cfg: DeepgramConfig {
                api_key: deepgram_key,
                model: cfg.transcription.model.clone(),
                language_hint: cfg.transcription.language_hint.clone(),
            },
        }),
        Arc::new(OpenAiAnalyzer {
            cfg: OpenAiConfig {
                base_url: cfg.analysis.base_url.clone(),
                api_key: openai_key,
                model: cfg.analysis.model.clone(),
            },
        }),
        Arc::new(DirectorySink { out_dir }),
    );

    let chat = ChatId(0);
    for arg in &args {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            let Some(link) = extract_media_link(arg) else {
                log::warn!("skipping unrecognized link: {arg}");
                continue;
            };
            engine.store().add_link(chat, link).await?;
        } else {
            let path = PathBuf::from(arg);
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string();
            if !is_media_file_name(&name) {
                log::warn!("skipping non-media file: {arg}");
                continue;
            }
            engine
                .store()
                .add_file(
                    chat,
                    meetbrief_engine::traits::SourceFile {
                        handle: path.to_string_lossy().into_owned(),
                        name,
                    },
                )
                .await?;
        }
    }

    let result = engine
        .run_with_hook(chat, target, |update| async move {
            match &update.detail {
                Some(detail) => log::info!("[{}] {detail}", update.phase.label()),
                None => log::info!("[{}]", update.phase.label()),
            }
        })
        .await;

    match result {
        Ok(_bundle) => Ok(()),
        Err(e) => {
            let message = match &e {
                meetbrief_engine::error::EngineError::Rejected(r) => r.to_string(),
                meetbrief_engine::error::EngineError::Failed(f) => f.user_message(),
            };
            eprintln!("{message}");
            Err(e.into())
        }
    }
}
