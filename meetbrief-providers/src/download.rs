//! Source download: generic HTTP, Google Drive links, and YouTube via the
//! external `yt-dlp` tool. Protocol quirks live here; callers only see a
//! local file path.

use anyhow::{Context, anyhow};
use futures_util::StreamExt;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(180);
const GDRIVE_TIMEOUT: Duration = Duration::from_secs(300);

fn gdrive_id_res() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("valid drive regex"),
            Regex::new(r"id=([a-zA-Z0-9_-]+)").expect("valid drive regex"),
            Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("valid drive regex"),
        ]
    })
}

/// Extracts the file id from the three Google Drive link shapes.
pub fn gdrive_file_id(url: &str) -> Option<String> {
    gdrive_id_res()
        .iter()
        .find_map(|re| re.captures(url))
        .map(|c| c[1].to_string())
}

fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

fn is_gdrive(url: &str) -> bool {
    url.contains("drive.google.com")
}

/// Picks an output extension from the URL path, defaulting to `.mp4` for
/// opaque links (the audio extractor sorts it out either way).
fn extension_for(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    for ext in meetbrief_core::media::AUDIO_EXTENSIONS {
        if path.ends_with(&format!(".{ext}")) {
            return ext;
        }
    }
    for ext in meetbrief_core::media::VIDEO_EXTENSIONS {
        if path.ends_with(&format!(".{ext}")) {
            return ext;
        }
    }
    "mp4"
}

pub async fn download_url(url: &str, dest_dir: &Path) -> anyhow::Result<PathBuf> {
    if is_youtube(url) {
        download_youtube(url, dest_dir).await
    } else if is_gdrive(url) {
        let id = gdrive_file_id(url)
            .ok_or_else(|| anyhow!("cannot extract Google Drive file id from {url}"))?;
        let direct = format!("https://drive.google.com/uc?export=download&id={id}&confirm=t");
        let dest = dest_dir.join(format!("gd_{}.mp4", short_id()));
        stream_to_file(&direct, &dest, GDRIVE_TIMEOUT).await?;
        Ok(dest)
    } else {
        let dest = dest_dir.join(format!("dl_{}.{}", short_id(), extension_for(url)));
        stream_to_file(url, &dest, DOWNLOAD_TIMEOUT).await?;
        Ok(dest)
    }
}

async fn download_youtube(url: &str, dest_dir: &Path) -> anyhow::Result<PathBuf> {
    let dest = dest_dir.join(format!("yt_{}.mp3", short_id()));
    let template = dest.with_extension("%(ext)s");

    let output = Command::new("yt-dlp")
        .arg("-f")
        .arg("bestaudio/best")
        .arg("-x")
        .arg("--audio-format")
        .arg("mp3")
        .arg("--audio-quality")
        .arg("128K")
        .arg("-o")
        .arg(&template)
        .arg("--quiet")
        .arg("--no-warnings")
        .arg(url)
        .output()
        .await
        .context("spawn yt-dlp (is it installed?)")?;

    if !output.status.success() {
        return Err(anyhow!(
            "yt-dlp failed: {}",
            String::from_utf8_lossy(&output.stderr)
                .lines()
                .last()
                .unwrap_or("unknown error")
        ));
    }

    if dest.exists() {
        return Ok(dest);
    }
    // Extraction may have kept the source container if it was already audio.
    for ext in ["m4a", "opus", "webm", "wav"] {
        let candidate = dest.with_extension(ext);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(anyhow!("yt-dlp reported success but produced no file"))
}

async fn stream_to_file(url: &str, dest: &Path, timeout: Duration) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
        .context("build http client")?;

    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("fetch {url}"))?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("create {}", dest.display()))?;

    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("read download stream")?;
        file.write_all(&chunk).await.context("write download chunk")?;
    }
    file.flush().await.context("flush download")?;
    Ok(())
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_gdrive_ids_from_all_link_shapes() {
        assert_eq!(
            gdrive_file_id("https://drive.google.com/file/d/1AbC_d-ef/view").as_deref(),
            Some("1AbC_d-ef")
        );
        assert_eq!(
            gdrive_file_id("https://drive.google.com/open?id=XYZ123").as_deref(),
            Some("XYZ123")
        );
        assert_eq!(
            gdrive_file_id("https://drive.google.com/d/plain").as_deref(),
            Some("plain")
        );
        assert_eq!(gdrive_file_id("https://drive.google.com/"), None);
    }

    #[test]
    fn extension_follows_url_path_not_query() {
        assert_eq!(extension_for("https://x.example/a.mp3?token=b.wav"), "mp3");
        assert_eq!(extension_for("https://x.example/video.webm"), "webm");
        assert_eq!(extension_for("https://x.example/opaque"), "mp4");
    }

    #[test]
    fn routes_are_detected_by_host() {
        assert!(is_youtube("https://www.youtube.com/watch?v=x"));
        assert!(is_youtube("https://youtu.be/x"));
        assert!(is_gdrive("https://drive.google.com/file/d/x/view"));
        assert!(!is_gdrive("https://example.com/file.mp4"));
    }
}
