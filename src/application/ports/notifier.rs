//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Notification severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Processing,
    Success,
    Error,
}

impl NotifyLevel {
    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Processing => "preferences-system",
            Self::Success => "dialog-ok",
            Self::Error => "dialog-error",
        }
    }

    /// Title suffix shown after the app name
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Processing => "Processing",
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }
}

/// Port for desktop notifications.
///
/// Fire-and-forget from the pipeline's point of view: callers ignore the
/// result, and implementations must not block the pipeline beyond the
/// toolkit call itself.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a notification.
    async fn notify(&self, level: NotifyLevel, message: &str) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(&self, level: NotifyLevel, message: &str) -> Result<(), NotificationError> {
        self.as_ref().notify(level, message).await
    }
}
