//! Main app runner for the hotkey listener

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::ConfigStore;
use crate::application::{ClipboardBroker, LifecycleController, TransformOrchestrator};
use crate::domain::config::AppConfig;
use crate::domain::registry::ShortcutRegistry;
use crate::infrastructure::{
    ArboardClipboard, BackendRouter, EnigoChords, JsonConfigStore, NotifyRustNotifier,
    RdevListener,
};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Build the config store, honoring a `--config` override
pub fn config_store(path: Option<PathBuf>) -> JsonConfigStore {
    match path {
        Some(path) => JsonConfigStore::with_path(path),
        None => JsonConfigStore::new(),
    }
}

/// OpenAI API key: environment wins over the config file
fn openai_api_key(config: &AppConfig) -> Option<String> {
    env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .or_else(|| config.settings.openai_api_key.clone())
}

/// Run the hotkey listener in the foreground until quit
pub async fn run_listener(config_path: Option<PathBuf>) -> ExitCode {
    let presenter = Presenter::new();
    let store = config_store(config_path);

    let config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // Invalid shortcuts and binding conflicts refuse to start
    let registry = match config
        .definitions()
        .map_err(|e| e.to_string())
        .and_then(|definitions| ShortcutRegistry::load(definitions).map_err(|e| e.to_string()))
    {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    if registry.is_empty() {
        presenter.error(&format!(
            "No shortcuts configured in {} (run 'retext config init')",
            store.path().display()
        ));
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    let backend = BackendRouter::new(
        openai_api_key(&config),
        config.settings.ollama_base_url_or_default(),
    );
    let broker = Arc::new(ClipboardBroker::new(
        ArboardClipboard::new(),
        EnigoChords::new(),
    ));
    let orchestrator = Arc::new(TransformOrchestrator::new(
        Arc::clone(&registry),
        broker,
        backend,
        NotifyRustNotifier::new(),
    ));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let hook = match RdevListener::spawn(Arc::clone(&registry), events_tx) {
        Ok(hook) => hook,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for shortcut in registry.all() {
        presenter.info(&format!(
            "{}: {} -> {} ({})",
            shortcut.id, shortcut.combination, shortcut.model, shortcut.backend
        ));
    }
    presenter.info("Listening for hotkeys. Press Ctrl+Q to quit.");

    let controller =
        LifecycleController::new(orchestrator, NotifyRustNotifier::new(), hook, events_rx);
    controller.run().await;

    ExitCode::from(EXIT_SUCCESS)
}
