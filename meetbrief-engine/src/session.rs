//! Per-chat session state and the injected session store.
//!
//! The store is the single synchronization point per session: every check
//! and mutation happens under one lock, so `begin_run`'s check-then-claim is
//! atomic and two runs for the same chat can never start concurrently. All
//! state is in-process and dies with the process.

use crate::traits::{Source, SourceFile};
use meetbrief_core::analysis::AnalysisDocument;
use meetbrief_core::transcript::MergedTranscript;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Chat/conversation identity, as issued by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub pending_files: Vec<SourceFile>,
    pub pending_links: Vec<String>,
    pub processing: bool,

    // The re-render cache: survives resets, so a later "same meeting, other
    // language" request can skip download and transcription entirely.
    pub cached_transcript: Option<MergedTranscript>,
    pub cached_analysis: Option<AnalysisDocument>,
}

/// Normal, user-facing rejections. These are not errors: nothing about the
/// session changes when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionRejection {
    #[error("still working on the previous run")]
    Busy,
    #[error("no sources have been uploaded yet")]
    Empty,
    #[error("nothing has been analyzed yet, so there is nothing to re-render")]
    NothingCached,
}

/// In-process map from chat identity to session, owned by the engine and
/// injected where needed (explicit object, not a module global, so tests get
/// clean isolation).
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<ChatId, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an uploaded file for the next run. Rejected while a run is
    /// active: mid-run uploads get an explicit "still working" signal rather
    /// than silently joining a run whose source set is already claimed.
    pub async fn add_file(&self, chat: ChatId, file: SourceFile) -> Result<usize, SessionRejection> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(chat).or_default();
        if session.processing {
            return Err(SessionRejection::Busy);
        }
        session.pending_files.push(file);
        Ok(session.pending_files.len() + session.pending_links.len())
    }

    /// Queues a link for the next run. Same policy as [`Self::add_file`].
    pub async fn add_link(&self, chat: ChatId, url: String) -> Result<usize, SessionRejection> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(chat).or_default();
        if session.processing {
            return Err(SessionRejection::Busy);
        }
        session.pending_links.push(url);
        Ok(session.pending_files.len() + session.pending_links.len())
    }

    /// Atomically claims the pending sources for a run: rejects when busy or
    /// empty, otherwise drains the pending lists (files first, then links,
    /// each in upload order) and marks the session processing.
    pub async fn begin_run(&self, chat: ChatId) -> Result<Vec<Source>, SessionRejection> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(chat).or_default();
        if session.processing {
            return Err(SessionRejection::Busy);
        }
        if session.pending_files.is_empty() && session.pending_links.is_empty() {
            return Err(SessionRejection::Empty);
        }

        session.processing = true;
        let mut sources: Vec<Source> = session.pending_files.drain(..).map(Source::File).collect();
        sources.extend(session.pending_links.drain(..).map(Source::Link));
        Ok(sources)
    }

    /// Atomically claims the cache for a re-render run.
    pub async fn begin_rerender(&self, chat: ChatId) -> Result<MergedTranscript, SessionRejection> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(chat).or_default();
        if session.processing {
            return Err(SessionRejection::Busy);
        }
        let Some(transcript) = session.cached_transcript.clone() else {
            return Err(SessionRejection::NothingCached);
        };
        session.processing = true;
        Ok(transcript)
    }

    /// Finishes a successful run: resets the working state and overwrites
    /// the re-render cache with the newest artifacts.
    pub async fn complete_run(
        &self,
        chat: ChatId,
        transcript: MergedTranscript,
        analysis: AnalysisDocument,
    ) {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(chat).or_default();
        reset_working_state(session);
        session.cached_transcript = Some(transcript);
        session.cached_analysis = Some(analysis);
    }

    /// Finishes a failed run: resets the working state, cache untouched.
    pub async fn fail_run(&self, chat: ChatId) {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(chat).or_default();
        reset_working_state(session);
    }

    /// Clone of the current session state, for status displays and tests.
    pub async fn snapshot(&self, chat: ChatId) -> Session {
        let mut sessions = self.inner.lock().await;
        sessions.entry(chat).or_default().clone()
    }
}

fn reset_working_state(session: &mut Session) {
    session.pending_files.clear();
    session.pending_links.clear();
    session.processing = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SourceFile {
        SourceFile {
            handle: format!("handle-{name}"),
            name: name.into(),
        }
    }

    fn transcript() -> MergedTranscript {
        MergedTranscript {
            full_text: "t".into(),
            speaker_segmented_text: "t".into(),
            speaker_count: 1,
            detected_language: "en".into(),
            duration_seconds: 1.0,
        }
    }

    #[tokio::test]
    async fn begin_run_claims_sources_in_arrival_order() {
        let store = SessionStore::new();
        let chat = ChatId(1);
        store.add_file(chat, file("a.mp3")).await.unwrap();
        store.add_link(chat, "https://x/1.mp4".into()).await.unwrap();
        store.add_file(chat, file("b.mp3")).await.unwrap();

        let sources = store.begin_run(chat).await.unwrap();
        let labels: Vec<&str> = sources.iter().map(|s| s.label()).collect();
        // Files first, then links, each in upload order.
        assert_eq!(labels, vec!["a.mp3", "b.mp3", "https://x/1.mp4"]);

        let snapshot = store.snapshot(chat).await;
        assert!(snapshot.processing);
        assert!(snapshot.pending_files.is_empty());
        assert!(snapshot.pending_links.is_empty());
    }

    #[tokio::test]
    async fn second_run_is_rejected_while_processing() {
        let store = SessionStore::new();
        let chat = ChatId(1);
        store.add_file(chat, file("a.mp3")).await.unwrap();
        store.begin_run(chat).await.unwrap();

        assert_eq!(store.begin_run(chat).await.unwrap_err(), SessionRejection::Busy);
        assert_eq!(
            store.add_file(chat, file("late.mp3")).await.unwrap_err(),
            SessionRejection::Busy
        );
        // The rejection changed nothing beyond what the first run claimed.
        let snapshot = store.snapshot(chat).await;
        assert!(snapshot.pending_files.is_empty());
        assert!(snapshot.processing);
    }

    #[tokio::test]
    async fn empty_session_cannot_start() {
        let store = SessionStore::new();
        assert_eq!(
            store.begin_run(ChatId(7)).await.unwrap_err(),
            SessionRejection::Empty
        );
    }

    #[tokio::test]
    async fn cache_survives_reset_pending_lists_do_not() {
        let store = SessionStore::new();
        let chat = ChatId(1);
        store.add_file(chat, file("a.mp3")).await.unwrap();
        store.begin_run(chat).await.unwrap();
        store
            .complete_run(chat, transcript(), AnalysisDocument::default())
            .await;

        let snapshot = store.snapshot(chat).await;
        assert!(!snapshot.processing);
        assert!(snapshot.pending_files.is_empty());
        assert!(snapshot.cached_transcript.is_some());
        assert!(snapshot.cached_analysis.is_some());

        // A re-render can now claim the cache without any pending sources.
        let cached = store.begin_rerender(chat).await.unwrap();
        assert_eq!(cached, transcript());
        store.fail_run(chat).await;

        // Failure reset the busy flag but kept the cache.
        let snapshot = store.snapshot(chat).await;
        assert!(!snapshot.processing);
        assert!(snapshot.cached_transcript.is_some());
    }

    #[tokio::test]
    async fn rerender_without_cache_is_rejected() {
        let store = SessionStore::new();
        assert_eq!(
            store.begin_rerender(ChatId(9)).await.unwrap_err(),
            SessionRejection::NothingCached
        );
    }

    #[tokio::test]
    async fn failed_run_keeps_previous_cache() {
        let store = SessionStore::new();
        let chat = ChatId(1);
        store.add_file(chat, file("a.mp3")).await.unwrap();
        store.begin_run(chat).await.unwrap();
        store
            .complete_run(chat, transcript(), AnalysisDocument::default())
            .await;

        store.add_file(chat, file("b.mp3")).await.unwrap();
        store.begin_run(chat).await.unwrap();
        store.fail_run(chat).await;

        let snapshot = store.snapshot(chat).await;
        assert!(snapshot.cached_transcript.is_some(), "cache must survive a failed run");
        assert!(!snapshot.processing);
    }

    #[tokio::test]
    async fn sessions_are_independent_per_chat() {
        let store = SessionStore::new();
        store.add_file(ChatId(1), file("a.mp3")).await.unwrap();
        store.begin_run(ChatId(1)).await.unwrap();

        // A different chat is unaffected by chat 1 being busy.
        store.add_file(ChatId(2), file("b.mp3")).await.unwrap();
        let sources = store.begin_run(ChatId(2)).await.unwrap();
        assert_eq!(sources.len(), 1);
    }
}
