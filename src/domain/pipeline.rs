//! Pipeline and process state machine types

use std::fmt;
use std::time::Instant;

use crate::domain::shortcut::{BackendKind, BackendOptions};

/// Per-shortcut pipeline state.
///
/// State machine:
///   IDLE -> CAPTURING -> CALLING -> REPLACING -> RESTORING -> IDLE
///
/// Only the orchestrator run owning a shortcut id mutates its state; a
/// trigger arriving while the state is not idle is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Capturing,
    Calling,
    Replacing,
    Restoring,
}

impl PipelineState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Calling => "calling",
            Self::Replacing => "replacing",
            Self::Restoring => "restoring",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-wide lifecycle state, owned by the lifecycle controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    #[default]
    Starting,
    Running,
    StoppingRequested,
    Stopped,
}

/// A registered combination fired. Produced by the hotkey listener,
/// consumed exactly once by the orchestrator.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub shortcut_id: String,
    pub at: Instant,
}

impl TriggerEvent {
    pub fn now(shortcut_id: impl Into<String>) -> Self {
        Self {
            shortcut_id: shortcut_id.into(),
            at: Instant::now(),
        }
    }
}

/// Everything the hotkey listener can emit
#[derive(Debug, Clone)]
pub enum ListenerEvent {
    /// A registered shortcut combination was pressed
    Trigger(TriggerEvent),
    /// The reserved quit combination was pressed
    Quit,
}

/// One completion request, bounded to a single pipeline run
#[derive(Debug, Clone)]
pub struct TransformRequest {
    /// Which backend handles this request
    pub backend: BackendKind,
    /// The captured selection
    pub text: String,
    /// System/instruction prompt
    pub prompt: String,
    /// Model name
    pub model: String,
    /// Provider options
    pub options: BackendOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_state_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    #[test]
    fn pipeline_state_display() {
        assert_eq!(PipelineState::Capturing.to_string(), "capturing");
        assert_eq!(PipelineState::Restoring.to_string(), "restoring");
    }

    #[test]
    fn trigger_event_carries_id() {
        let event = TriggerEvent::now("grammar");
        assert_eq!(event.shortcut_id, "grammar");
    }
}
