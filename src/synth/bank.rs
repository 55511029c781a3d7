//! The generator registry: one owned mapping from note number to the live
//! oscillators sounding for it.
//!
//! Target invariant: a note that is held has exactly one generator; a note
//! that is not held has none. `start` enforces the first half by refusing
//! to create a second generator for a registered note. `stop` enforces the
//! second half defensively: it releases *every* generator under the note,
//! so even if a duplicate ever slipped in it cannot leak.
//!
//! All mutation happens in place under a single writer (the event handler);
//! the audio callback only renders.

use std::collections::HashMap;

use crate::dsp::{Oscillator, Waveform};
use crate::note;
use crate::synth::keyboard::ToneControl;

/// Gain applied per generator when mixing, leaving headroom for a handful
/// of simultaneous notes.
const VOICE_GAIN: f32 = 0.2;

pub struct GeneratorBank {
    generators: HashMap<u8, Vec<Oscillator>>,
    waveform: Waveform,
    sample_rate: f32,
}

impl GeneratorBank {
    pub fn new(waveform: Waveform, sample_rate: f32) -> Self {
        Self {
            generators: HashMap::new(),
            waveform,
            sample_rate,
        }
    }

    /// Begin a continuous tone for `note`. No-op if one is already
    /// registered; duplicate note-ons must not stack generators.
    pub fn start(&mut self, note: u8) {
        if self.generators.contains_key(&note) {
            return;
        }
        let osc = Oscillator::new(self.waveform, note::frequency(note), self.sample_rate);
        self.generators.insert(note, vec![osc]);
    }

    /// Release every generator registered for `note`. No-op if none.
    pub fn stop(&mut self, note: u8) {
        self.generators.remove(&note);
    }

    /// Release everything. Used at teardown.
    pub fn stop_all(&mut self) {
        self.generators.clear();
    }

    /// Number of live generators for one note.
    pub fn generator_count(&self, note: u8) -> usize {
        self.generators.get(&note).map_or(0, Vec::len)
    }

    /// Number of live generators across all notes.
    pub fn total_generators(&self) -> usize {
        self.generators.values().map(Vec::len).sum()
    }

    /// Configured frequencies of the generators for one note.
    pub fn frequencies(&self, note: u8) -> Vec<f32> {
        self.generators
            .get(&note)
            .map(|oscs| oscs.iter().map(Oscillator::frequency).collect())
            .unwrap_or_default()
    }

    /// Render one mono block: clears `out`, then mixes every live
    /// generator into it.
    pub fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        for oscs in self.generators.values_mut() {
            for osc in oscs {
                osc.mix_block(out, VOICE_GAIN);
            }
        }
    }
}

impl ToneControl for GeneratorBank {
    fn start(&mut self, note: u8) {
        GeneratorBank::start(self, note);
    }

    fn stop(&mut self, note: u8) {
        GeneratorBank::stop(self, note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> GeneratorBank {
        GeneratorBank::new(Waveform::Sine, 48_000.0)
    }

    #[test]
    fn start_registers_one_generator_at_note_pitch() {
        let mut bank = bank();
        bank.start(69);
        assert_eq!(bank.generator_count(69), 1);
        assert_eq!(bank.frequencies(69), [440.0]);
    }

    #[test]
    fn duplicate_start_is_suppressed() {
        let mut bank = bank();
        bank.start(60);
        bank.start(60);
        assert_eq!(bank.generator_count(60), 1);
    }

    #[test]
    fn stop_without_start_is_a_no_op() {
        let mut bank = bank();
        bank.stop(60);
        assert_eq!(bank.total_generators(), 0);
    }

    #[test]
    fn stop_releases_every_generator_for_the_note() {
        let mut bank = bank();
        bank.start(60);
        // Force the duplicate the invariant says should never happen.
        let dup = Oscillator::new(Waveform::Sine, note::frequency(60), 48_000.0);
        bank.generators.get_mut(&60).unwrap().push(dup);
        assert_eq!(bank.generator_count(60), 2);

        bank.stop(60);
        assert_eq!(bank.generator_count(60), 0);
    }

    #[test]
    fn notes_are_independent() {
        let mut bank = bank();
        bank.start(60);
        bank.start(64);
        assert_eq!(bank.total_generators(), 2);
        assert_ne!(bank.frequencies(60), bank.frequencies(64));

        bank.stop(60);
        assert_eq!(bank.generator_count(60), 0);
        assert_eq!(bank.generator_count(64), 1);
    }

    #[test]
    fn stop_all_clears_the_registry() {
        let mut bank = bank();
        bank.start(60);
        bank.start(64);
        bank.start(67);
        bank.stop_all();
        assert_eq!(bank.total_generators(), 0);
    }

    #[test]
    fn render_is_silent_when_empty() {
        let mut bank = bank();
        let mut out = vec![1.0f32; 64];
        bank.render_block(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn render_mixes_within_bounds() {
        let mut bank = bank();
        for note in [60, 64, 67] {
            bank.start(note);
        }
        let mut out = vec![0.0f32; 512];
        bank.render_block(&mut out);
        assert!(out.iter().any(|&s| s.abs() > 0.0));
        assert!(out.iter().all(|&s| s.abs() <= 3.0 * VOICE_GAIN + 1e-6));
    }
}
