//! Cross-platform chord injection adapter using enigo
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use async_trait::async_trait;

use crate::application::ports::{ChordError, ChordInjector};

/// Cross-platform chord injector using enigo
pub struct EnigoChords;

impl EnigoChords {
    /// Create a new enigo chord injector
    pub fn new() -> Self {
        Self
    }

    async fn send_chord(letter: char) -> Result<(), ChordError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let mut enigo = Enigo::new(&Settings::default())
                .map_err(|e| ChordError::InjectionFailed(format!("Failed to create enigo: {}", e)))?;

            #[cfg(target_os = "macos")]
            let modifier = Key::Meta;
            #[cfg(not(target_os = "macos"))]
            let modifier = Key::Control;

            enigo
                .key(modifier, Direction::Press)
                .map_err(|e| ChordError::InjectionFailed(e.to_string()))?;
            let result = enigo
                .key(Key::Unicode(letter), Direction::Click)
                .map_err(|e| ChordError::InjectionFailed(e.to_string()));
            // Release the modifier even when the click failed, otherwise it
            // stays logically held for the user's next real keystroke
            let release = enigo
                .key(modifier, Direction::Release)
                .map_err(|e| ChordError::InjectionFailed(e.to_string()));

            result.and(release)
        })
        .await
        .map_err(|e| ChordError::InjectionFailed(format!("Task join error: {}", e)))?
    }
}

impl Default for EnigoChords {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChordInjector for EnigoChords {
    async fn send_copy(&self) -> Result<(), ChordError> {
        Self::send_chord('c').await
    }

    async fn send_paste(&self) -> Result<(), ChordError> {
        Self::send_chord('v').await
    }
}
