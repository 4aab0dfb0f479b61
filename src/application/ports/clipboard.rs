//! System clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),

    #[error("Failed to synthesize key chord: {0}")]
    ChordFailed(String),

    #[error("No text was selected")]
    EmptySelection,
}

impl From<crate::application::ports::keystroke::ChordError> for ClipboardError {
    fn from(err: crate::application::ports::keystroke::ChordError) -> Self {
        match err {
            crate::application::ports::keystroke::ChordError::InjectionFailed(msg) => {
                Self::ChordFailed(msg)
            }
        }
    }
}

/// Port for raw clipboard access.
///
/// Callers never use this directly; all traffic goes through the
/// `ClipboardBroker`, which serializes access process-wide.
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Read the current text content, if any.
    ///
    /// Returns `None` when the clipboard is empty or holds no text.
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Clear the clipboard.
    async fn clear(&self) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl SystemClipboard for Box<dyn SystemClipboard> {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        self.as_ref().clear().await
    }
}
