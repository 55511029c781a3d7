//! Held-note tracking: the state machine between decoded MIDI events and
//! the tone synthesizer.
//!
//! Each note number is either idle or held. A note-on moves it to held and
//! appends it to the display list; a note-off moves it back to idle and
//! removes it. Start and stop requests are issued unconditionally on every
//! event. Merged multi-device streams can legitimately deliver a second
//! note-on for an already-held key, and the synthesizer contract is that
//! duplicate starts are suppressed and stray stops are no-ops. The display
//! list, by contrast, is never touched by a duplicate.

use crate::io::midi::{NoteEvent, NoteKind};
use crate::note;

/// Start/stop seam between the keyboard and whatever produces sound.
///
/// `start` must be idempotent per note; `stop` must be a safe no-op when
/// nothing is sounding.
pub trait ToneControl {
    fn start(&mut self, note: u8);
    fn stop(&mut self, note: u8);
}

/// Tracks which notes are currently held, in the order they were pressed.
#[derive(Debug, Default)]
pub struct Keyboard {
    held: Vec<u8>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one decoded event to the held set and the tone sink.
    pub fn handle(&mut self, event: NoteEvent, tones: &mut impl ToneControl) {
        match event.kind {
            NoteKind::On => {
                if !self.held.contains(&event.note) {
                    self.held.push(event.note);
                }
                tones.start(event.note);
            }
            NoteKind::Off => {
                self.held.retain(|&held| held != event.note);
                tones.stop(event.note);
            }
        }
    }

    /// Currently-held note numbers in insertion order.
    pub fn held_notes(&self) -> &[u8] {
        &self.held
    }

    /// Labels for the held notes, in insertion order, for the display.
    pub fn note_names(&self) -> Vec<String> {
        self.held.iter().map(|&n| note::note_name(n)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every start/stop call in order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, u8)>,
    }

    impl ToneControl for Recorder {
        fn start(&mut self, note: u8) {
            self.calls.push(("start", note));
        }

        fn stop(&mut self, note: u8) {
            self.calls.push(("stop", note));
        }
    }

    fn on(note: u8) -> NoteEvent {
        NoteEvent {
            kind: NoteKind::On,
            note,
            velocity: 100,
        }
    }

    fn off(note: u8) -> NoteEvent {
        NoteEvent {
            kind: NoteKind::Off,
            note,
            velocity: 0,
        }
    }

    #[test]
    fn press_and_release() {
        let mut keyboard = Keyboard::new();
        let mut tones = Recorder::default();

        keyboard.handle(on(60), &mut tones);
        assert_eq!(keyboard.note_names(), ["C4"]);

        keyboard.handle(off(60), &mut tones);
        assert!(keyboard.is_empty());
        assert_eq!(tones.calls, [("start", 60), ("stop", 60)]);
    }

    #[test]
    fn duplicate_on_keeps_one_entry_but_still_starts() {
        let mut keyboard = Keyboard::new();
        let mut tones = Recorder::default();

        keyboard.handle(on(60), &mut tones);
        keyboard.handle(on(60), &mut tones);

        assert_eq!(keyboard.note_names(), ["C4"]);
        assert_eq!(tones.calls, [("start", 60), ("start", 60)]);
    }

    #[test]
    fn unmatched_off_is_a_no_op_for_the_set() {
        let mut keyboard = Keyboard::new();
        let mut tones = Recorder::default();

        keyboard.handle(off(60), &mut tones);

        assert!(keyboard.is_empty());
        // stop still goes through; the sink treats it as a no-op
        assert_eq!(tones.calls, [("stop", 60)]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut keyboard = Keyboard::new();
        let mut tones = Recorder::default();

        keyboard.handle(on(60), &mut tones);
        keyboard.handle(on(64), &mut tones);
        keyboard.handle(on(55), &mut tones);

        assert_eq!(keyboard.note_names(), ["C4", "E4", "G3"]);

        keyboard.handle(off(64), &mut tones);
        assert_eq!(keyboard.note_names(), ["C4", "G3"]);
    }
}
