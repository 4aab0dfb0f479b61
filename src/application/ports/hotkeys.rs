//! Hotkey hook port interface

use thiserror::Error;

/// Hotkey hook errors
#[derive(Debug, Clone, Error)]
pub enum HotkeyError {
    #[error("Failed to install keyboard hook: {0}")]
    InstallFailed(String),
}

/// Handle to the process-wide keyboard hook.
///
/// Created once by the lifecycle controller; there is no ambient global.
/// Trigger events arrive on the channel handed out at install time, so the
/// handle itself only controls the hook's lifetime.
pub trait HotkeyHook: Send + Sync {
    /// Stop delivering events. Idempotent.
    fn stop(&self);

    /// Whether the hook is still delivering events.
    fn is_running(&self) -> bool;
}
