//! App - wiring between the MIDI listener, the keyboard state, the tone
//! synthesizer, and the TUI.
//!
//! Everything runs on this thread: decoded events are drained from the
//! merged MIDI stream and applied in delivery order, so each one observes
//! the current held-note set and generator registry. The audio callback is
//! the only other thread and it never writes state.

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{debug, warn};
use ratatui::DefaultTerminal;
use rtrb::{Consumer, Producer, RingBuffer};

use keyscope::dsp::Waveform;
use keyscope::io::midi::MidiListener;
use keyscope::synth::{Keyboard, ToneSynth};

use crate::ui::{self, AudioStatus, View};

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// Ring buffer capacity between the audio callback and the UI
const SCOPE_CAPACITY: usize = 8192;

pub struct App {
    listener: MidiListener,
    keyboard: Keyboard,
    synth: ToneSynth,
    /// Producer side of the oscilloscope tap, handed to the synth at
    /// activation time.
    scope_tx: Option<Producer<f32>>,
    scope_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    audio_status: AudioStatus,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let (scope_tx, scope_rx) = RingBuffer::new(SCOPE_CAPACITY);

        Self {
            listener: MidiListener::connect_all(),
            keyboard: Keyboard::new(),
            synth: ToneSynth::new(Waveform::Sine),
            scope_tx: Some(scope_tx),
            scope_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            audio_status: AudioStatus::Inactive,
            should_quit: false,
        }
    }

    /// Run the application (takes over the terminal until quit).
    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
        // Dropping self closes the MIDI connections and stops all tones.
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.drain_midi();
            self.poll_scope();
            self.draw(terminal)?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply every pending MIDI event in delivery order.
    fn drain_midi(&mut self) {
        while let Some(event) = self.listener.try_recv() {
            debug!(
                "{:?} note {} velocity {}",
                event.kind, event.note, event.velocity
            );
            self.keyboard.handle(event, &mut self.synth);
        }
    }

    /// Pull rendered samples from the audio callback, keeping the most
    /// recent VIS_BUFFER_SIZE for the oscilloscope.
    fn poll_scope(&mut self) {
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.scope_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            self.audio_buffer.extend(new_samples);
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
        }
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let view = View {
            note_names: self.keyboard.note_names(),
            devices: self.listener.port_names(),
            audio: &self.audio_status,
            generators: self.synth.active_generators(),
            waveform: &self.audio_buffer,
        };
        terminal.draw(|frame| ui::render(frame, &view))?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.activate_audio(),
            _ => {}
        }
    }

    /// The user gesture that stands in for the browser's audio-unlock
    /// click. Before this, note state still updates but tones are dropped.
    fn activate_audio(&mut self) {
        let Some(scope) = self.scope_tx.take() else {
            return; // already attempted
        };

        match self.synth.activate(scope) {
            Ok(()) => self.audio_status = AudioStatus::Active,
            Err(err) => {
                // Not fatal: the note display keeps working silently.
                warn!("audio activation failed: {err}");
                self.audio_status = AudioStatus::Failed(err.to_string());
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
