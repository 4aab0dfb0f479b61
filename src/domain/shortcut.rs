//! Shortcut definition value objects

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::keys::KeyCombination;

/// Which completion backend a shortcut dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    OpenAi,
    Ollama,
}

impl BackendKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generation options forwarded to the backend.
/// Temperature and max_tokens are first-class; anything else the provider
/// understands rides along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackendOptions {
    /// True when no option is set
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_tokens.is_none() && self.extra.is_empty()
    }
}

/// Immutable definition of one configured shortcut.
/// Validated and frozen by `ShortcutRegistry::load`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutDefinition {
    /// Unique identifier, e.g. "fix-grammar"
    pub id: String,
    /// The key combination that triggers this shortcut
    pub combination: KeyCombination,
    /// Which backend handles the transform
    pub backend: BackendKind,
    /// Model name passed to the backend
    pub model: String,
    /// System/instruction prompt sent ahead of the selected text
    pub prompt: String,
    /// Provider options (temperature etc.)
    pub options: BackendOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_kind_serde_names() {
        assert_eq!(serde_json::to_value(BackendKind::OpenAi).unwrap(), "openai");
        assert_eq!(serde_json::to_value(BackendKind::Ollama).unwrap(), "ollama");
        let kind: BackendKind = serde_json::from_value(json!("openai")).unwrap();
        assert_eq!(kind, BackendKind::OpenAi);
    }

    #[test]
    fn backend_kind_rejects_unknown() {
        assert!(serde_json::from_value::<BackendKind>(json!("mistral")).is_err());
    }

    #[test]
    fn options_deserialize_known_fields() {
        let options: BackendOptions =
            serde_json::from_value(json!({ "temperature": 0.3, "max_tokens": 256 })).unwrap();
        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(256));
        assert!(options.extra.is_empty());
    }

    #[test]
    fn options_keep_provider_extras() {
        let options: BackendOptions =
            serde_json::from_value(json!({ "temperature": 0.7, "top_p": 0.9, "seed": 42 }))
                .unwrap();
        assert_eq!(options.temperature, Some(0.7));
        assert_eq!(options.extra.get("top_p"), Some(&json!(0.9)));
        assert_eq!(options.extra.get("seed"), Some(&json!(42)));
    }

    #[test]
    fn options_default_is_empty() {
        assert!(BackendOptions::default().is_empty());
    }
}
