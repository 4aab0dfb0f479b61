//! Keyboard chord injection port interface

use async_trait::async_trait;
use thiserror::Error;

/// Chord injection errors
#[derive(Debug, Clone, Error)]
pub enum ChordError {
    #[error("Failed to synthesize key chord: {0}")]
    InjectionFailed(String),
}

/// Port for synthesizing copy/paste chords into the focused application.
///
/// These are the only key events the pipeline ever injects; everything
/// else stays with the user's physical keyboard.
#[async_trait]
pub trait ChordInjector: Send + Sync {
    /// Send the platform copy chord (Ctrl+C, Cmd+C on macOS).
    async fn send_copy(&self) -> Result<(), ChordError>;

    /// Send the platform paste chord (Ctrl+V, Cmd+V on macOS).
    async fn send_paste(&self) -> Result<(), ChordError>;
}

/// Blanket implementation for boxed injector types
#[async_trait]
impl ChordInjector for Box<dyn ChordInjector> {
    async fn send_copy(&self) -> Result<(), ChordError> {
        self.as_ref().send_copy().await
    }

    async fn send_paste(&self) -> Result<(), ChordError> {
        self.as_ref().send_paste().await
    }
}
