//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::registry::ShortcutRegistry;

use super::args::ConfigAction;
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), String> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
        ConfigAction::Check => handle_check(store, presenter).await,
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), String> {
    store.init().await.map_err(|e| e.to_string())?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    presenter.info("Add your OpenAI API key or point a shortcut at a local Ollama model.");
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), String> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate the config end to end: parse the file, parse every shortcut's
/// key combination, and build the registry to surface binding conflicts.
async fn handle_check<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), String> {
    if !store.exists() {
        return Err(format!(
            "No config file at: {} (run 'retext config init')",
            store.path().display()
        ));
    }

    let config = store.load().await.map_err(|e| match e {
        ConfigError::ParseError(msg) => format!("Invalid config: {}", msg),
        other => other.to_string(),
    })?;

    let definitions = config.definitions().map_err(|e| e.to_string())?;
    let registry = ShortcutRegistry::load(definitions).map_err(|e| e.to_string())?;

    if registry.is_empty() {
        presenter.warn("Config is valid but defines no shortcuts.");
        return Ok(());
    }

    for shortcut in registry.all() {
        presenter.key_value(
            &shortcut.id,
            &format!(
                "{} -> {} ({})",
                shortcut.combination, shortcut.model, shortcut.backend
            ),
        );
    }
    presenter.success(&format!(
        "Config is valid: {} shortcut(s)",
        registry.len()
    ));
    Ok(())
}
