//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod broker;
pub mod lifecycle;
pub mod ports;
pub mod transform;

// Re-export use cases
pub use broker::{BrokerTiming, ClipboardBroker, ClipboardSnapshot};
pub use lifecycle::{LifecycleController, SHUTDOWN_GRACE};
pub use transform::TransformOrchestrator;
