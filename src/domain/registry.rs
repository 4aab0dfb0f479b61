//! Shortcut registry
//!
//! Immutable, validated mapping from key combination to shortcut
//! definition. Built once at startup; an invalid configuration refuses to
//! load rather than silently dropping the offending shortcut.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::keys::KeyCombination;
use crate::domain::shortcut::ShortcutDefinition;

/// Errors when building the registry. All of these are fatal at startup.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Shortcuts \"{first_id}\" and \"{second_id}\" share the binding {combination}")]
    DuplicateBinding {
        combination: KeyCombination,
        first_id: String,
        second_id: String,
    },

    #[error("Duplicate shortcut id \"{id}\"")]
    DuplicateId { id: String },

    #[error("Shortcut \"{id}\": {combination} is reserved for quitting")]
    ReservedCombination {
        id: String,
        combination: KeyCombination,
    },
}

/// Read-only registry of shortcut definitions.
/// No locking needed: nothing mutates it after `load`.
#[derive(Debug)]
pub struct ShortcutRegistry {
    ordered: Vec<ShortcutDefinition>,
    by_combination: HashMap<KeyCombination, usize>,
    by_id: HashMap<String, usize>,
}

impl ShortcutRegistry {
    /// Validate definitions and freeze them into a registry.
    ///
    /// Rejects duplicate `(modifiers, base key)` bindings, duplicate ids,
    /// and bindings that collide with the reserved quit combination.
    pub fn load(definitions: Vec<ShortcutDefinition>) -> Result<Self, RegistryError> {
        let quit = KeyCombination::quit_combination();
        let mut by_combination = HashMap::new();
        let mut by_id = HashMap::new();

        for (index, definition) in definitions.iter().enumerate() {
            if definition.combination == quit {
                return Err(RegistryError::ReservedCombination {
                    id: definition.id.clone(),
                    combination: definition.combination.clone(),
                });
            }

            if let Some(&previous) = by_combination.get(&definition.combination) {
                let first: &ShortcutDefinition = &definitions[previous];
                return Err(RegistryError::DuplicateBinding {
                    combination: definition.combination.clone(),
                    first_id: first.id.clone(),
                    second_id: definition.id.clone(),
                });
            }

            if by_id.contains_key(&definition.id) {
                return Err(RegistryError::DuplicateId {
                    id: definition.id.clone(),
                });
            }

            by_combination.insert(definition.combination.clone(), index);
            by_id.insert(definition.id.clone(), index);
        }

        Ok(Self {
            ordered: definitions,
            by_combination,
            by_id,
        })
    }

    /// Look up a shortcut by its key combination
    pub fn lookup(&self, combination: &KeyCombination) -> Option<&ShortcutDefinition> {
        self.by_combination
            .get(combination)
            .map(|&index| &self.ordered[index])
    }

    /// Look up a shortcut by id
    pub fn by_id(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.by_id.get(id).map(|&index| &self.ordered[index])
    }

    /// All shortcuts, in load order
    pub fn all(&self) -> &[ShortcutDefinition] {
        &self.ordered
    }

    /// Number of registered shortcuts
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True when no shortcuts are registered
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shortcut::{BackendKind, BackendOptions};

    fn definition(id: &str, keys: &str) -> ShortcutDefinition {
        ShortcutDefinition {
            id: id.to_string(),
            combination: keys.parse().unwrap(),
            backend: BackendKind::OpenAi,
            model: "gpt-4o".to_string(),
            prompt: "Fix grammar".to_string(),
            options: BackendOptions::default(),
        }
    }

    #[test]
    fn load_distinct_shortcuts() {
        let registry = ShortcutRegistry::load(vec![
            definition("grammar", "ctrl+shift+g"),
            definition("summarize", "ctrl+shift+s"),
            definition("translate", "ctrl+shift+t"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 3);
        for (id, keys) in [
            ("grammar", "ctrl+shift+g"),
            ("summarize", "ctrl+shift+s"),
            ("translate", "ctrl+shift+t"),
        ] {
            let combo: KeyCombination = keys.parse().unwrap();
            assert_eq!(registry.lookup(&combo).unwrap().id, id);
            assert_eq!(registry.by_id(id).unwrap().id, id);
        }
    }

    #[test]
    fn load_preserves_order() {
        let registry = ShortcutRegistry::load(vec![
            definition("b", "ctrl+shift+b"),
            definition("a", "ctrl+shift+a"),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let err = ShortcutRegistry::load(vec![
            definition("grammar", "ctrl+shift+g"),
            definition("other", "shift+ctrl+g"),
        ])
        .unwrap_err();

        match err {
            RegistryError::DuplicateBinding {
                first_id,
                second_id,
                ..
            } => {
                assert_eq!(first_id, "grammar");
                assert_eq!(second_id, "other");
            }
            other => panic!("expected DuplicateBinding, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = ShortcutRegistry::load(vec![
            definition("grammar", "ctrl+shift+g"),
            definition("grammar", "ctrl+shift+h"),
        ])
        .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateId { id } if id == "grammar"));
    }

    #[test]
    fn quit_combination_is_reserved() {
        let err = ShortcutRegistry::load(vec![definition("quit-stealer", "ctrl+q")]).unwrap_err();
        assert!(matches!(err, RegistryError::ReservedCombination { .. }));
    }

    #[test]
    fn lookup_unknown_combination_is_none() {
        let registry = ShortcutRegistry::load(vec![definition("grammar", "ctrl+shift+g")]).unwrap();
        let combo: KeyCombination = "ctrl+shift+z".parse().unwrap();
        assert!(registry.lookup(&combo).is_none());
        assert!(registry.by_id("nope").is_none());
    }

    #[test]
    fn empty_registry_loads() {
        let registry = ShortcutRegistry::load(vec![]).unwrap();
        assert!(registry.is_empty());
    }
}
