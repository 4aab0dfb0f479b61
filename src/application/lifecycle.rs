//! Process lifecycle controller
//!
//! Owns the process-wide state, the hotkey hook handle, and the event
//! loop. Trigger events spawn independent pipeline runs; the quit
//! combination or Ctrl-C drains in-flight runs for a bounded grace period
//! and then exits regardless. Runs are never aborted mid clipboard-write.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::application::ports::{
    BackendClient, ChordInjector, HotkeyHook, Notifier, NotifyLevel, SystemClipboard,
};
use crate::application::transform::TransformOrchestrator;
use crate::domain::pipeline::{ListenerEvent, ProcessState};

/// How long shutdown waits for in-flight pipeline runs
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Process lifecycle controller
pub struct LifecycleController<B, C, K, N, H>
where
    B: BackendClient,
    C: SystemClipboard,
    K: ChordInjector,
    N: Notifier,
    H: HotkeyHook,
{
    orchestrator: Arc<TransformOrchestrator<B, C, K, N>>,
    notifier: N,
    hook: H,
    events: mpsc::UnboundedReceiver<ListenerEvent>,
    grace: Duration,
    state: ProcessState,
}

impl<B, C, K, N, H> LifecycleController<B, C, K, N, H>
where
    B: BackendClient + 'static,
    C: SystemClipboard + 'static,
    K: ChordInjector + 'static,
    N: Notifier + 'static,
    H: HotkeyHook,
{
    /// Create a controller wired to an installed hook's event channel
    pub fn new(
        orchestrator: Arc<TransformOrchestrator<B, C, K, N>>,
        notifier: N,
        hook: H,
        events: mpsc::UnboundedReceiver<ListenerEvent>,
    ) -> Self {
        Self {
            orchestrator,
            notifier,
            hook,
            events,
            grace: SHUTDOWN_GRACE,
            state: ProcessState::Starting,
        }
    }

    /// Override the shutdown grace period
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Current process state
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Run until the quit combination, Ctrl-C, or the event channel closes
    pub async fn run(mut self) -> ProcessState {
        self.state = ProcessState::Running;
        info!("retext running");
        let _ = self
            .notifier
            .notify(NotifyLevel::Info, "retext is running. Press Ctrl+Q to quit.")
            .await;

        let mut runs: JoinSet<()> = JoinSet::new();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(ListenerEvent::Trigger(trigger)) => {
                        let orchestrator = Arc::clone(&self.orchestrator);
                        runs.spawn(async move {
                            orchestrator.handle_trigger(trigger).await;
                        });
                    }
                    Some(ListenerEvent::Quit) => {
                        info!("quit combination pressed");
                        break;
                    }
                    None => {
                        warn!("hotkey listener channel closed");
                        break;
                    }
                },
                // Reap finished runs as they complete; otherwise the set
                // retains an entry per trigger for the daemon's lifetime
                Some(_) = runs.join_next(), if !runs.is_empty() => {}
                _ = &mut ctrl_c => {
                    info!("interrupt received");
                    break;
                }
            }
        }

        self.state = ProcessState::StoppingRequested;
        self.hook.stop();

        // Drain in-flight runs for a bounded grace period, then proceed
        let drain = async {
            while runs.join_next().await.is_some() {}
        };
        if timeout(self.grace, drain).await.is_err() {
            warn!(
                grace_secs = self.grace.as_secs(),
                "grace period elapsed with pipelines still running"
            );
        }

        let _ = self.notifier.notify(NotifyLevel::Info, "retext stopped").await;
        info!("retext stopped");
        self.state = ProcessState::Stopped;
        self.state
    }
}
