//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod hotkeys;
pub mod keystroke;
pub mod notifier;

// Re-export common types
pub use backend::{BackendClient, BackendError};
pub use clipboard::{ClipboardError, SystemClipboard};
pub use config::ConfigStore;
pub use hotkeys::{HotkeyError, HotkeyHook};
pub use keystroke::{ChordError, ChordInjector};
pub use notifier::{NotificationError, Notifier, NotifyLevel};
