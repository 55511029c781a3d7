// Purpose: note lifecycle and tone management
// This layer sits above the oscillator and owns all sound-generation resources

pub mod bank;
pub mod keyboard;
pub mod output;

pub use bank::GeneratorBank;
pub use keyboard::{Keyboard, ToneControl};
pub use output::{AudioError, ToneSynth};
