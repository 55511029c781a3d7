// Purpose - external interfaces: MIDI byte decoding and device subscription

pub mod midi;

pub use midi::{decode, MidiListener, NoteEvent, NoteKind};
