use crate::session::SessionRejection;
use meetbrief_core::preview::{ERROR_EXCERPT_BUDGET, truncate_with_ellipsis};
use thiserror::Error;

/// Whole-run failures. Per-source download/transcription failures are not
/// here: those are logged and swallowed at source granularity.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("none of the supplied sources could be processed")]
    NoUsableSource,

    #[error("analysis failed: {0}")]
    Analysis(String),

    #[error("report rendering failed: {0}")]
    Render(String),

    #[error("report delivery failed: {0}")]
    Delivery(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RunError {
    /// Short excerpt for the chat transport; full detail goes to the log
    /// only, never a raw error dump into chat.
    pub fn user_message(&self) -> String {
        truncate_with_ellipsis(&self.to_string(), ERROR_EXCERPT_BUDGET)
    }
}

/// Everything `run`/`rerender` can come back with besides a bundle: either a
/// normal rejection (no state change) or a run failure (session was reset).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] SessionRejection),

    #[error(transparent)]
    Failed(#[from] RunError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_bounded() {
        let err = RunError::Analysis("x".repeat(2000));
        let msg = err.user_message();
        assert!(msg.chars().count() <= ERROR_EXCERPT_BUDGET + 1);
        assert!(msg.ends_with('…'));
    }

    #[test]
    fn short_messages_pass_through() {
        let err = RunError::NoUsableSource;
        assert_eq!(err.user_message(), err.to_string());
    }
}
