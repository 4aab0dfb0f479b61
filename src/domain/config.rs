//! Application configuration value objects
//!
//! Mirrors the JSON config file shape:
//!
//! ```json
//! {
//!   "settings": { "openai_api_key": "sk-...", "ollama_base_url": "http://localhost:11434" },
//!   "shortcuts": [
//!     { "id": "fix-grammar", "keys": "ctrl+shift+g", "backend": "openai",
//!       "model": "gpt-4o", "prompt": "...", "openai_options": { "temperature": 0.3 } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidShortcutError;
use crate::domain::keys::KeyCombination;
use crate::domain::shortcut::{BackendKind, BackendOptions, ShortcutDefinition};

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Global settings section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// OpenAI API key. The OPENAI_API_KEY environment variable, when set,
    /// takes precedence over this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    /// Base URL of the local Ollama server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_base_url: Option<String>,
}

impl Settings {
    /// Ollama base URL, or the default local endpoint
    pub fn ollama_base_url_or_default(&self) -> &str {
        self.ollama_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_OLLAMA_BASE_URL)
    }
}

/// One shortcut as written in the config file.
/// Keys are unvalidated strings here; `definition()` parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutEntry {
    pub id: String,
    /// Combination string like "ctrl+shift+g"
    pub keys: String,
    pub backend: BackendKind,
    pub model: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "BackendOptions::is_empty")]
    pub openai_options: BackendOptions,
    #[serde(default, skip_serializing_if = "BackendOptions::is_empty")]
    pub ollama_options: BackendOptions,
}

impl ShortcutEntry {
    /// Parse this entry into a validated definition
    pub fn definition(&self) -> Result<ShortcutDefinition, InvalidShortcutError> {
        let combination: KeyCombination =
            self.keys.parse().map_err(|source| InvalidShortcutError {
                id: self.id.clone(),
                source,
            })?;

        let options = match self.backend {
            BackendKind::OpenAi => self.openai_options.clone(),
            BackendKind::Ollama => self.ollama_options.clone(),
        };

        Ok(ShortcutDefinition {
            id: self.id.clone(),
            combination,
            backend: self.backend,
            model: self.model.clone(),
            prompt: self.prompt.clone(),
            options,
        })
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub shortcuts: Vec<ShortcutEntry>,
}

impl AppConfig {
    /// Parse every shortcut entry, failing on the first invalid one
    pub fn definitions(&self) -> Result<Vec<ShortcutDefinition>, InvalidShortcutError> {
        self.shortcuts.iter().map(|entry| entry.definition()).collect()
    }

    /// Starter config written by `retext config init`
    pub fn starter() -> Self {
        Self {
            settings: Settings {
                openai_api_key: None,
                ollama_base_url: Some(DEFAULT_OLLAMA_BASE_URL.to_string()),
            },
            shortcuts: vec![ShortcutEntry {
                id: "fix-grammar".to_string(),
                keys: "ctrl+shift+g".to_string(),
                backend: BackendKind::OpenAi,
                model: "gpt-4o".to_string(),
                prompt: "Fix the grammar and spelling of the following text. \
                         Reply with the corrected text only."
                    .to_string(),
                openai_options: BackendOptions {
                    temperature: Some(0.3),
                    ..Default::default()
                },
                ollama_options: BackendOptions::default(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_full_config() {
        let config: AppConfig = serde_json::from_value(json!({
            "settings": {
                "openai_api_key": "sk-test",
                "ollama_base_url": "http://127.0.0.1:11434"
            },
            "shortcuts": [
                {
                    "id": "fix-grammar",
                    "keys": "ctrl+shift+g",
                    "backend": "openai",
                    "model": "gpt-4o",
                    "prompt": "Fix grammar",
                    "openai_options": { "temperature": 0.3 }
                },
                {
                    "id": "summarize",
                    "keys": "ctrl+shift+s",
                    "backend": "ollama",
                    "model": "llama3",
                    "prompt": "Summarize",
                    "ollama_options": { "temperature": 0.8, "num_predict": 200 }
                }
            ]
        }))
        .unwrap();

        assert_eq!(config.settings.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.shortcuts.len(), 2);

        let definitions = config.definitions().unwrap();
        assert_eq!(definitions[0].backend, BackendKind::OpenAi);
        assert_eq!(definitions[0].options.temperature, Some(0.3));
        assert_eq!(definitions[1].backend, BackendKind::Ollama);
        assert_eq!(
            definitions[1].options.extra.get("num_predict"),
            Some(&json!(200))
        );
    }

    #[test]
    fn definitions_pick_options_for_backend() {
        let entry: ShortcutEntry = serde_json::from_value(json!({
            "id": "s",
            "keys": "ctrl+shift+s",
            "backend": "ollama",
            "model": "llama3",
            "prompt": "p",
            "openai_options": { "temperature": 0.1 },
            "ollama_options": { "temperature": 0.9 }
        }))
        .unwrap();

        let definition = entry.definition().unwrap();
        assert_eq!(definition.options.temperature, Some(0.9));
    }

    #[test]
    fn invalid_keys_surface_shortcut_id() {
        let config: AppConfig = serde_json::from_value(json!({
            "shortcuts": [
                { "id": "bad", "keys": "ctrl+", "backend": "openai",
                  "model": "gpt-4o", "prompt": "p" }
            ]
        }))
        .unwrap();

        let err = config.definitions().unwrap_err();
        assert_eq!(err.id, "bad");
    }

    #[test]
    fn missing_sections_default() {
        let config: AppConfig = serde_json::from_value(json!({})).unwrap();
        assert!(config.shortcuts.is_empty());
        assert_eq!(
            config.settings.ollama_base_url_or_default(),
            DEFAULT_OLLAMA_BASE_URL
        );
    }

    #[test]
    fn starter_config_is_valid() {
        let starter = AppConfig::starter();
        let definitions = starter.definitions().unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].id, "fix-grammar");
    }
}
