//! Classification of incoming sources: media file extensions and
//! recognizable media links.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "opus", "flac", "aac", "wma"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "3gp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Unsupported,
}

pub fn classify_file_name(name: &str) -> MediaKind {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Audio
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Unsupported
    }
}

pub fn is_media_file_name(name: &str) -> bool {
    classify_file_name(name) != MediaKind::Unsupported
}

fn media_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // YouTube, Google Drive, or a direct link to a media file.
        Regex::new(
            r"(?x)
            https?://(?:www\.)?youtube\.com/\S+
            | https?://youtu\.be/\S+
            | https?://drive\.google\.com/\S+
            | https?://\S+\.(?:mp3|wav|ogg|m4a|mp4|mov|avi|mkv|webm)",
        )
        .expect("valid media link regex")
    })
}

fn any_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://\S+$").expect("valid url regex"))
}

/// Extracts a downloadable media link from free-form chat text.
///
/// Known media hosts/extensions are matched anywhere in the text; anything
/// else is accepted only when the whole message is a URL (the download
/// collaborator decides what to do with it).
pub fn extract_media_link(text: &str) -> Option<String> {
    let text = text.trim();

    if let Some(m) = media_link_re().find(text) {
        return Some(m.as_str().to_string());
    }

    if any_url_re().is_match(text) {
        return Some(text.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions_case_insensitively() {
        assert_eq!(classify_file_name("standup.MP3"), MediaKind::Audio);
        assert_eq!(classify_file_name("call.webm"), MediaKind::Video);
        assert_eq!(classify_file_name("notes.pdf"), MediaKind::Unsupported);
        assert_eq!(classify_file_name("no_extension"), MediaKind::Unsupported);
    }

    #[test]
    fn finds_known_links_inside_text() {
        let text = "here is the recording https://youtu.be/abc123 from yesterday";
        assert_eq!(
            extract_media_link(text).as_deref(),
            Some("https://youtu.be/abc123")
        );
    }

    #[test]
    fn accepts_bare_urls_verbatim() {
        assert_eq!(
            extract_media_link("https://example.com/call-recording").as_deref(),
            Some("https://example.com/call-recording")
        );
    }

    #[test]
    fn rejects_plain_chatter() {
        assert_eq!(extract_media_link("hello, analyze my meeting please"), None);
    }

    #[test]
    fn matches_direct_media_links() {
        assert_eq!(
            extract_media_link("grab https://cdn.example.com/rec.mp3 thanks").as_deref(),
            Some("https://cdn.example.com/rec.mp3")
        );
    }
}
