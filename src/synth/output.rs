//! Audio output: a cpal stream rendering the generator bank.
//!
//! The output context is created lazily. Browsers gate audio behind a user
//! gesture, and the same shape is kept here: `ToneSynth` starts inactive,
//! and until `activate` is called (a keypress in the TUI), start requests
//! are accepted and silently dropped. They never error, and the note-state
//! logic never learns whether sound actually played.
//!
//! The bank lives behind an `Arc<Mutex<_>>`. The event thread is the only
//! writer; the audio callback locks it just long enough to render a block,
//! and also taps the rendered samples into a ring buffer for the UI
//! oscilloscope.

use std::fmt;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, warn};
use rtrb::Producer;

use crate::dsp::Waveform;
use crate::synth::bank::GeneratorBank;
use crate::synth::keyboard::ToneControl;
use crate::MAX_BLOCK_SIZE;

/// Why audio output could not be brought up.
#[derive(Debug)]
pub enum AudioError {
    NoOutputDevice,
    Config(cpal::DefaultStreamConfigError),
    Build(cpal::BuildStreamError),
    Play(cpal::PlayStreamError),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no default output device available"),
            AudioError::Config(err) => write!(f, "failed to fetch default output config: {err}"),
            AudioError::Build(err) => write!(f, "failed to build output stream: {err}"),
            AudioError::Play(err) => write!(f, "failed to start output stream: {err}"),
        }
    }
}

impl std::error::Error for AudioError {}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        AudioError::Config(err)
    }
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        AudioError::Build(err)
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        AudioError::Play(err)
    }
}

/// Live output state, present only after activation.
struct Output {
    // Held so the stream keeps playing; dropped to stop it.
    _stream: cpal::Stream,
    bank: Arc<Mutex<GeneratorBank>>,
}

/// The tone synthesizer: owns the audio context and the generator bank.
pub struct ToneSynth {
    waveform: Waveform,
    output: Option<Output>,
}

impl ToneSynth {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            output: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.output.is_some()
    }

    /// Number of live generators, for the display. Zero while inactive.
    pub fn active_generators(&self) -> usize {
        self.output
            .as_ref()
            .map_or(0, |out| out.bank.lock().unwrap().total_generators())
    }

    /// Bring up the audio context and start rendering. Idempotent.
    ///
    /// `scope` receives every rendered mono sample for visualization;
    /// samples are dropped when the UI lags behind.
    pub fn activate(&mut self, mut scope: Producer<f32>) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let bank = Arc::new(Mutex::new(GeneratorBank::new(self.waveform, sample_rate)));
        let bank_for_callback = bank.clone();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let mut bank = bank_for_callback.lock().unwrap();
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames];
                    bank.render_block(block);

                    // Mono render fanned out to all channels
                    let out_off = frames_written * channels;
                    for (i, &sample) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = sample;
                        }
                        let _ = scope.push(sample);
                    }

                    frames_written += frames;
                }
            },
            |err| warn!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        self.output = Some(Output {
            _stream: stream,
            bank,
        });
        debug!("audio output active at {sample_rate} Hz, {channels} channel(s)");
        Ok(())
    }
}

impl ToneControl for ToneSynth {
    fn start(&mut self, note: u8) {
        match &self.output {
            Some(out) => out.bank.lock().unwrap().start(note),
            // Accepted but inaudible until the user enables audio.
            None => debug!("audio inactive, dropping start for note {note}"),
        }
    }

    fn stop(&mut self, note: u8) {
        if let Some(out) = &self.output {
            out.bank.lock().unwrap().stop(note);
        }
    }
}

impl Drop for ToneSynth {
    fn drop(&mut self) {
        if let Some(out) = self.output.take() {
            // Silence the bank before the stream itself is torn down.
            out.bank.lock().unwrap().stop_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Activation needs real audio hardware; these cover the inactive path.

    #[test]
    fn starts_inactive() {
        let synth = ToneSynth::new(Waveform::Sine);
        assert!(!synth.is_active());
        assert_eq!(synth.active_generators(), 0);
    }

    #[test]
    fn start_and_stop_before_activation_are_silent_no_ops() {
        let mut synth = ToneSynth::new(Waveform::Sine);
        synth.start(60);
        synth.stop(60);
        synth.stop(64);
        assert_eq!(synth.active_generators(), 0);
    }

    #[test]
    fn drop_with_pending_starts_is_clean() {
        let mut synth = ToneSynth::new(Waveform::Sine);
        synth.start(60);
        synth.start(64);
        drop(synth);
    }
}
