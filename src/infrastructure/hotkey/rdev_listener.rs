//! Global keyboard hook using rdev
//!
//! Observes key events without grabbing them; every keystroke still
//! reaches the focused application.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

use crate::application::ports::{HotkeyError, HotkeyHook};
use crate::domain::keys::{KeyCombination, Modifiers};
use crate::domain::pipeline::{ListenerEvent, TriggerEvent};
use crate::domain::registry::ShortcutRegistry;

/// Map an rdev key to the normalized token used in combinations
fn key_token(key: rdev::Key) -> Option<&'static str> {
    use rdev::Key;

    let token = match key {
        Key::KeyA => "a",
        Key::KeyB => "b",
        Key::KeyC => "c",
        Key::KeyD => "d",
        Key::KeyE => "e",
        Key::KeyF => "f",
        Key::KeyG => "g",
        Key::KeyH => "h",
        Key::KeyI => "i",
        Key::KeyJ => "j",
        Key::KeyK => "k",
        Key::KeyL => "l",
        Key::KeyM => "m",
        Key::KeyN => "n",
        Key::KeyO => "o",
        Key::KeyP => "p",
        Key::KeyQ => "q",
        Key::KeyR => "r",
        Key::KeyS => "s",
        Key::KeyT => "t",
        Key::KeyU => "u",
        Key::KeyV => "v",
        Key::KeyW => "w",
        Key::KeyX => "x",
        Key::KeyY => "y",
        Key::KeyZ => "z",
        Key::Num0 => "0",
        Key::Num1 => "1",
        Key::Num2 => "2",
        Key::Num3 => "3",
        Key::Num4 => "4",
        Key::Num5 => "5",
        Key::Num6 => "6",
        Key::Num7 => "7",
        Key::Num8 => "8",
        Key::Num9 => "9",
        Key::F1 => "f1",
        Key::F2 => "f2",
        Key::F3 => "f3",
        Key::F4 => "f4",
        Key::F5 => "f5",
        Key::F6 => "f6",
        Key::F7 => "f7",
        Key::F8 => "f8",
        Key::F9 => "f9",
        Key::F10 => "f10",
        Key::F11 => "f11",
        Key::F12 => "f12",
        Key::Space => "space",
        Key::Return => "enter",
        Key::Tab => "tab",
        Key::Backspace => "backspace",
        Key::Escape => "escape",
        Key::Delete => "delete",
        Key::Insert => "insert",
        Key::Home => "home",
        Key::End => "end",
        Key::PageUp => "pageup",
        Key::PageDown => "pagedown",
        Key::UpArrow => "up",
        Key::DownArrow => "down",
        Key::LeftArrow => "left",
        Key::RightArrow => "right",
        Key::CapsLock => "capslock",
        Key::Minus => "minus",
        Key::Equal => "equal",
        Key::Comma => "comma",
        Key::Dot => "period",
        Key::Slash => "slash",
        Key::BackSlash => "backslash",
        Key::SemiColon => "semicolon",
        Key::Quote => "quote",
        Key::BackQuote => "backquote",
        _ => return None,
    };
    Some(token)
}

/// Which modifier flag an rdev key maps to, if any
fn modifier_of(key: rdev::Key) -> Option<Modifier> {
    use rdev::Key;

    match key {
        Key::ControlLeft | Key::ControlRight => Some(Modifier::Ctrl),
        Key::Alt | Key::AltGr => Some(Modifier::Alt),
        Key::ShiftLeft | Key::ShiftRight => Some(Modifier::Shift),
        Key::MetaLeft | Key::MetaRight => Some(Modifier::Meta),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

/// Pure matching state for the keyboard hook.
///
/// Tracks held modifiers and currently-down base keys. A combination
/// fires once per physical press: OS auto-repeat events for a held key
/// are swallowed until the release arrives.
struct HookState {
    registry: Arc<ShortcutRegistry>,
    modifiers: Modifiers,
    pressed: HashSet<&'static str>,
}

impl HookState {
    fn new(registry: Arc<ShortcutRegistry>) -> Self {
        Self {
            registry,
            modifiers: Modifiers::default(),
            pressed: HashSet::new(),
        }
    }

    fn set_modifier(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Ctrl => self.modifiers.ctrl = held,
            Modifier::Alt => self.modifiers.alt = held,
            Modifier::Shift => self.modifiers.shift = held,
            Modifier::Meta => self.modifiers.meta = held,
        }
    }

    fn on_key_press(&mut self, key: rdev::Key) -> Option<ListenerEvent> {
        if let Some(modifier) = modifier_of(key) {
            self.set_modifier(modifier, true);
            return None;
        }

        let token = key_token(key)?;
        if !self.pressed.insert(token) {
            // Auto-repeat of a held key
            return None;
        }

        let combination = KeyCombination::new(self.modifiers, token);

        if combination == KeyCombination::quit_combination() {
            return Some(ListenerEvent::Quit);
        }

        let shortcut = self.registry.lookup(&combination)?;
        debug!(shortcut_id = %shortcut.id, combination = %combination, "hotkey matched");
        Some(ListenerEvent::Trigger(TriggerEvent::now(&shortcut.id)))
    }

    fn on_key_release(&mut self, key: rdev::Key) {
        if let Some(modifier) = modifier_of(key) {
            self.set_modifier(modifier, false);
            return;
        }

        if let Some(token) = key_token(key) {
            self.pressed.remove(token);
        }
    }
}

/// Handle to the installed hook thread
pub struct HookHandle {
    running: Arc<AtomicBool>,
}

impl HotkeyHook for HookHandle {
    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Global keyboard listener backed by rdev
pub struct RdevListener;

impl RdevListener {
    /// Install the hook on a dedicated OS thread.
    ///
    /// rdev's listen loop cannot be unwound from outside, so `stop()`
    /// silences the callback instead; the thread dies with the process.
    pub fn spawn(
        registry: Arc<ShortcutRegistry>,
        events: UnboundedSender<ListenerEvent>,
    ) -> Result<HookHandle, HotkeyError> {
        let running = Arc::new(AtomicBool::new(true));
        let callback_running = Arc::clone(&running);

        std::thread::Builder::new()
            .name("hotkey-hook".to_string())
            .spawn(move || {
                let mut state = HookState::new(registry);

                let result = rdev::listen(move |event| {
                    if !callback_running.load(Ordering::SeqCst) {
                        return;
                    }

                    match event.event_type {
                        rdev::EventType::KeyPress(key) => {
                            if let Some(listener_event) = state.on_key_press(key) {
                                if events.send(listener_event).is_err() {
                                    warn!("event channel closed, hotkey events dropped");
                                }
                            }
                        }
                        rdev::EventType::KeyRelease(key) => state.on_key_release(key),
                        _ => {}
                    }
                });

                if let Err(e) = result {
                    error!("keyboard hook failed: {:?}", e);
                }
            })
            .map_err(|e| HotkeyError::InstallFailed(e.to_string()))?;

        Ok(HookHandle { running })
    }
}
