//! Transform pipeline use case
//!
//! On a trigger event: capture the selection via the clipboard, send it to
//! the configured backend, paste the result over the selection, restore the
//! prior clipboard. Per shortcut the pipeline is at-most-one-in-flight:
//! a trigger arriving while a run is active is dropped, never queued, so a
//! stale transform can never land over newer edits.

use std::collections::HashMap;
use std::sync::Mutex as StdMutex;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::broker::ClipboardBroker;
use crate::application::ports::{
    BackendClient, ChordInjector, ClipboardError, Notifier, NotifyLevel, SystemClipboard,
};
use crate::domain::pipeline::{PipelineState, TransformRequest, TriggerEvent};
use crate::domain::registry::ShortcutRegistry;
use crate::domain::shortcut::ShortcutDefinition;

/// The pipeline engine. One instance serves every shortcut; per-shortcut
/// state lives in the `states` map created at construction.
pub struct TransformOrchestrator<B, C, K, N>
where
    B: BackendClient,
    C: SystemClipboard,
    K: ChordInjector,
    N: Notifier,
{
    registry: Arc<ShortcutRegistry>,
    broker: Arc<ClipboardBroker<C, K>>,
    backend: B,
    notifier: N,
    states: StdMutex<HashMap<String, PipelineState>>,
}

impl<B, C, K, N> TransformOrchestrator<B, C, K, N>
where
    B: BackendClient,
    C: SystemClipboard,
    K: ChordInjector,
    N: Notifier,
{
    /// Create an orchestrator for every shortcut in the registry
    pub fn new(
        registry: Arc<ShortcutRegistry>,
        broker: Arc<ClipboardBroker<C, K>>,
        backend: B,
        notifier: N,
    ) -> Self {
        let states = registry
            .all()
            .iter()
            .map(|definition| (definition.id.clone(), PipelineState::Idle))
            .collect();

        Self {
            registry,
            broker,
            backend,
            notifier,
            states: StdMutex::new(states),
        }
    }

    /// Current pipeline state for a shortcut id
    pub fn state(&self, id: &str) -> PipelineState {
        self.states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    /// Run one pipeline for a trigger event.
    ///
    /// Every failure is local to this run: surfaced via the notifier,
    /// logged, and the state returned to idle.
    pub async fn handle_trigger(&self, event: TriggerEvent) {
        let Some(shortcut) = self.registry.by_id(&event.shortcut_id) else {
            warn!(id = %event.shortcut_id, "trigger for unknown shortcut");
            return;
        };

        if !self.claim(&shortcut.id) {
            debug!(id = %shortcut.id, "trigger dropped, pipeline already running");
            return;
        }

        self.run(shortcut).await;
        self.set_state(&shortcut.id, PipelineState::Idle);
    }

    async fn run(&self, shortcut: &ShortcutDefinition) {
        // Capturing: snapshot and copy-capture under the clipboard lock
        let (snapshot, selection) = {
            let guard = self.broker.lock().await;

            let snapshot = match guard.snapshot().await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(id = %shortcut.id, %err, "clipboard snapshot failed");
                    self.notify(NotifyLevel::Error, "Clipboard busy").await;
                    return;
                }
            };

            match guard.capture_selection().await {
                Ok(text) => (snapshot, text),
                Err(ClipboardError::EmptySelection) => {
                    // The sentinel clear destroyed the old content; put it back
                    if let Err(err) = guard.restore(&snapshot).await {
                        warn!(id = %shortcut.id, %err, "restore after empty selection failed");
                    }
                    // Info, not error: nothing was transformed and nothing
                    // was lost
                    self.notify(NotifyLevel::Info, "No text selected").await;
                    return;
                }
                Err(err) => {
                    warn!(id = %shortcut.id, %err, "selection capture failed");
                    self.notify(NotifyLevel::Error, "Clipboard busy").await;
                    return;
                }
            }
        };

        // Calling: the guard is released; the network wait must not hold
        // the shared clipboard.
        self.set_state(&shortcut.id, PipelineState::Calling);
        self.notify(
            NotifyLevel::Processing,
            &format!("Processing \"{}\"...", shortcut.id),
        )
        .await;

        let request = TransformRequest {
            backend: shortcut.backend,
            text: selection,
            prompt: shortcut.prompt.clone(),
            model: shortcut.model.clone(),
            options: shortcut.options.clone(),
        };

        let output = match self.backend.complete(&request).await {
            Ok(output) => output,
            Err(err) => {
                // The user's text was never destroyed: capture is read-only
                warn!(id = %shortcut.id, %err, "backend call failed");
                self.notify(NotifyLevel::Error, &err.to_string()).await;
                return;
            }
        };

        // Replacing and Restoring under one clipboard session
        self.set_state(&shortcut.id, PipelineState::Replacing);
        let guard = self.broker.lock().await;

        let injected = match guard.inject_replacement(&output).await {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %shortcut.id, %err, "paste injection failed");
                self.notify(NotifyLevel::Error, "Could not paste result")
                    .await;
                false
            }
        };

        self.set_state(&shortcut.id, PipelineState::Restoring);
        if let Err(err) = guard.restore(&snapshot).await {
            // Non-fatal: the replacement already happened or already failed
            warn!(id = %shortcut.id, %err, "clipboard restore failed");
        }
        drop(guard);

        if injected {
            self.notify(
                NotifyLevel::Success,
                &format!("\"{}\" replaced the selection", shortcut.id),
            )
            .await;
        }
    }

    /// Idle -> Capturing, or false when a run is already active
    fn claim(&self, id: &str) -> bool {
        let mut states = self
            .states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match states.get_mut(id) {
            Some(state @ PipelineState::Idle) => {
                *state = PipelineState::Capturing;
                true
            }
            _ => false,
        }
    }

    fn set_state(&self, id: &str, state: PipelineState) {
        let mut states = self
            .states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(entry) = states.get_mut(id) {
            *entry = state;
        }
    }

    async fn notify(&self, level: NotifyLevel, message: &str) {
        // Fire-and-forget: a failed notification never affects the pipeline
        let _ = self.notifier.notify(level, message).await;
    }
}
