#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

/// Phase-accumulator oscillator producing one waveform at a fixed frequency.
///
/// Phase runs in [0, 1) and wraps once per cycle; each waveform is a cheap
/// function of the current phase. Output is in [-1, 1]; mixing gain is the
/// caller's problem.
pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    phase: f32,
    phase_inc: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32, sample_rate: f32) -> Self {
        Self {
            waveform,
            frequency,
            phase: 0.0,
            phase_inc: frequency / sample_rate,
        }
    }

    /// Configured frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Produce the next sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = match self.waveform {
            Waveform::Sine => (TAU * self.phase).sin(),
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 4.0 * (self.phase - 0.5).abs() - 1.0,
        };

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }

    /// Fill a block, accumulating into `out` at the given gain.
    pub fn mix_block(&mut self, out: &mut [f32], gain: f32) {
        for sample in out.iter_mut() {
            *sample += gain * self.next_sample();
        }
    }
}
