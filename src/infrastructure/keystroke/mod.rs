//! Chord injection infrastructure module
//!
//! Provides cross-platform copy/paste chord support using enigo.

mod enigo;

pub use enigo::EnigoChords;

use crate::application::ports::ChordInjector;

/// Create the default chord injector for the current platform
pub fn create_chord_injector() -> Box<dyn ChordInjector> {
    Box::new(EnigoChords::new())
}
