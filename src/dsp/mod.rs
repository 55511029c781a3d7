//! Low-level DSP primitives used by the tone synthesizer.
//!
//! These components are allocation-free and realtime-safe, so they can run
//! directly inside the audio callback. They stay focused on the
//! signal-generation math; lifecycle and mixing live in `synth`.

/// Oscillator waveforms and the phase-accumulator generator.
pub mod oscillator;

pub use oscillator::{Oscillator, Waveform};
