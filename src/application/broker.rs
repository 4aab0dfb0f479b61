//! Clipboard broker
//!
//! The OS clipboard is one shared resource, so every read or write in the
//! process funnels through this broker. Operations are only reachable
//! through the RAII guard returned by `lock()`, which makes release on
//! every exit path structural rather than a discipline.
//!
//! The capture primitive works the way the desktop does: clear the
//! clipboard as a sentinel, synthesize a Copy chord into the focused
//! application, then poll until new text appears or the deadline passes.
//! All waits run on `tokio::time`, so tests drive them with a paused clock.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::application::ports::{ChordInjector, ClipboardError, SystemClipboard};

/// Bounded-wait parameters for clipboard operations
#[derive(Debug, Clone)]
pub struct BrokerTiming {
    /// How often to re-read the clipboard while waiting for the copy chord
    pub poll_interval: Duration,
    /// How long to wait for the copy chord before giving up
    pub capture_deadline: Duration,
    /// Settle delay around writes and the paste chord
    pub settle: Duration,
}

impl Default for BrokerTiming {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
            capture_deadline: Duration::from_millis(500),
            settle: Duration::from_millis(50),
        }
    }
}

/// Captured prior clipboard content, held only long enough to support
/// best-effort restore. Owned by the pipeline run that took it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    text: Option<String>,
}

impl ClipboardSnapshot {
    /// The captured text, if the clipboard held any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Serializes all clipboard traffic in the process behind one async mutex
pub struct ClipboardBroker<C, K>
where
    C: SystemClipboard,
    K: ChordInjector,
{
    clipboard: C,
    chords: K,
    timing: BrokerTiming,
    lock: Mutex<()>,
}

impl<C, K> ClipboardBroker<C, K>
where
    C: SystemClipboard,
    K: ChordInjector,
{
    /// Create a broker with default timing
    pub fn new(clipboard: C, chords: K) -> Self {
        Self::with_timing(clipboard, chords, BrokerTiming::default())
    }

    /// Create a broker with custom timing
    pub fn with_timing(clipboard: C, chords: K, timing: BrokerTiming) -> Self {
        Self {
            clipboard,
            chords,
            timing,
            lock: Mutex::new(()),
        }
    }

    /// Acquire exclusive clipboard access.
    ///
    /// Concurrent pipeline runs queue here, not on each other's business
    /// logic. The guard must not be held across backend calls.
    pub async fn lock(&self) -> BrokerGuard<'_, C, K> {
        BrokerGuard {
            broker: self,
            _permit: self.lock.lock().await,
        }
    }
}

/// Exclusive clipboard session. Dropping it releases the broker lock.
pub struct BrokerGuard<'a, C, K>
where
    C: SystemClipboard,
    K: ChordInjector,
{
    broker: &'a ClipboardBroker<C, K>,
    _permit: MutexGuard<'a, ()>,
}

impl<C, K> BrokerGuard<'_, C, K>
where
    C: SystemClipboard,
    K: ChordInjector,
{
    /// Read the current clipboard content without mutating it
    pub async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        let text = self.broker.clipboard.read_text().await?;
        Ok(ClipboardSnapshot { text })
    }

    /// Capture the current selection via the clipboard.
    ///
    /// Clears the clipboard as a sentinel, sends the copy chord, then polls
    /// until text appears. Unchanged (still empty) content at the deadline
    /// means no selection was active.
    pub async fn capture_selection(&self) -> Result<String, ClipboardError> {
        self.broker.clipboard.clear().await?;
        self.broker.chords.send_copy().await?;

        let deadline = Instant::now() + self.broker.timing.capture_deadline;
        loop {
            if let Some(text) = self.broker.clipboard.read_text().await? {
                if !text.is_empty() {
                    debug!(len = text.len(), "captured selection");
                    return Ok(text);
                }
            }
            if Instant::now() >= deadline {
                return Err(ClipboardError::EmptySelection);
            }
            sleep(self.broker.timing.poll_interval).await;
        }
    }

    /// Write `text` to the clipboard and paste it over the selection
    pub async fn inject_replacement(&self, text: &str) -> Result<(), ClipboardError> {
        self.broker.clipboard.write_text(text).await?;
        sleep(self.broker.timing.settle).await;
        self.broker.chords.send_paste().await?;
        sleep(self.broker.timing.settle).await;
        Ok(())
    }

    /// Put the snapshot's content back.
    ///
    /// Best-effort from the pipeline's point of view; the caller logs a
    /// failure but does not escalate it.
    pub async fn restore(&self, snapshot: &ClipboardSnapshot) -> Result<(), ClipboardError> {
        match snapshot.text() {
            Some(text) => self.broker.clipboard.write_text(text).await,
            None => self.broker.clipboard.clear().await,
        }
    }
}
