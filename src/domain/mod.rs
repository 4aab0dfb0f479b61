//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod registry;
pub mod shortcut;

// Re-export common types
pub use config::{AppConfig, Settings, ShortcutEntry};
pub use error::*;
pub use keys::{KeyCombination, Modifiers};
pub use pipeline::{ListenerEvent, PipelineState, ProcessState, TransformRequest, TriggerEvent};
pub use registry::{RegistryError, ShortcutRegistry};
pub use shortcut::{BackendKind, BackendOptions, ShortcutDefinition};
