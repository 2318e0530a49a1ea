//! Audio extraction and size-based splitting via the external ffmpeg/ffprobe
//! tools. Callers get back ordered chunk paths; chunk transcripts merge by
//! the standard merge rules.

use anyhow::{Context, anyhow};
use meetbrief_core::media::{MediaKind, classify_file_name};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Returns an audio file for the given media file, converting video
/// containers to mp3. Audio inputs pass through untouched.
pub async fn ensure_audio(input: &Path, work_dir: &Path) -> anyhow::Result<PathBuf> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if classify_file_name(name) == MediaKind::Audio {
        return Ok(input.to_path_buf());
    }

    let out = work_dir.join(format!("audio_{}.mp3", short_id()));
    run_ffmpeg(&[
        "-y",
        "-i",
        path_str(input)?,
        "-vn",
        "-acodec",
        "libmp3lame",
        "-b:a",
        "128k",
        path_str(&out)?,
    ])
    .await
    .context("extract audio track")?;
    Ok(out)
}

/// Splits an audio file into roughly equal chunks when it exceeds
/// `max_bytes`; otherwise returns the input as the single chunk.
pub async fn split_if_oversized(
    input: &Path,
    max_bytes: u64,
    work_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let size = tokio::fs::metadata(input)
        .await
        .with_context(|| format!("stat {}", input.display()))?
        .len();

    let chunks = chunk_count(size, max_bytes);
    if chunks <= 1 {
        return Ok(vec![input.to_path_buf()]);
    }

    let duration = probe_duration_seconds(input).await?;
    let chunk_duration = duration / chunks as f64;

    let mut paths = Vec::with_capacity(chunks as usize);
    for i in 0..chunks {
        let start = i as f64 * chunk_duration;
        let out = work_dir.join(format!("chunk_{}_{i}.mp3", short_id()));
        run_ffmpeg(&[
            "-y",
            "-ss",
            &format!("{start:.3}"),
            "-i",
            path_str(input)?,
            "-t",
            &format!("{chunk_duration:.3}"),
            "-acodec",
            "copy",
            path_str(&out)?,
        ])
        .await
        .with_context(|| format!("split chunk {i}"))?;
        paths.push(out);
    }

    log::info!(
        "split {} ({} bytes) into {} chunks of ~{:.0}s",
        input.display(),
        size,
        chunks,
        chunk_duration
    );
    Ok(paths)
}

/// Number of chunks a file of `size` bytes needs under a `max_bytes` cap.
fn chunk_count(size: u64, max_bytes: u64) -> u64 {
    if max_bytes == 0 || size <= max_bytes {
        1
    } else {
        size / max_bytes + 1
    }
}

async fn probe_duration_seconds(input: &Path) -> anyhow::Result<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
        .output()
        .await
        .context("spawn ffprobe (is it installed?)")?;

    if !output.status.success() {
        return Err(anyhow!(
            "ffprobe failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse::<f64>()
        .context("parse ffprobe duration")
}

async fn run_ffmpeg(args: &[&str]) -> anyhow::Result<()> {
    let output = Command::new("ffmpeg")
        .args(args)
        .output()
        .await
        .context("spawn ffmpeg (is it installed?)")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "ffmpeg failed: {}",
            stderr.lines().last().unwrap_or("unknown error")
        ));
    }
    Ok(())
}

fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("non-UTF8 path: {}", path.display()))
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn audio_files_pass_through_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("already_audio.mp3");
        tokio::fs::write(&input, b"fake").await.unwrap();
        let out = ensure_audio(&input, dir.path()).await.unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn chunk_count_matches_size_ratio() {
        assert_eq!(chunk_count(10, 100), 1);
        assert_eq!(chunk_count(100, 100), 1);
        assert_eq!(chunk_count(101, 100), 2);
        assert_eq!(chunk_count(250, 100), 3);
        assert_eq!(chunk_count(5, 0), 1);
    }

    #[tokio::test]
    async fn small_files_are_a_single_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("small_chunk_test.mp3");
        tokio::fs::write(&input, vec![0u8; 128]).await.unwrap();
        let chunks = split_if_oversized(&input, 1024, dir.path()).await.unwrap();
        assert_eq!(chunks, vec![input.clone()]);
    }
}
