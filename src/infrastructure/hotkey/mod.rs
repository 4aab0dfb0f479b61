//! Global hotkey infrastructure module

mod rdev_listener;

pub use rdev_listener::{HookHandle, RdevListener};
