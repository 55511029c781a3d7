//! MIDI input: raw byte decoding plus a multi-device listener.
//!
//! Every available input port is opened at startup and all ports feed one
//! merged event stream; there is no per-device disambiguation. The listener
//! degrades to an empty device set when MIDI access fails, leaving the rest
//! of the view running.

use std::sync::mpsc::{channel, Receiver, Sender};

use log::{debug, warn};
use midir::{Ignore, MidiInput, MidiInputConnection};

/// Whether a key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    On,
    Off,
}

/// A decoded note transition from the controller stream.
#[derive(Debug, Clone, Copy)]
pub struct NoteEvent {
    pub kind: NoteKind,
    pub note: u8,
    pub velocity: u8,
}

/// Decode the first three bytes of a MIDI message into a note event.
///
/// Note-on with velocity 0 is a note-off, per the MIDI spec. Only status
/// bytes 0x90 (note-on, channel 0) and 0x80 (note-off, channel 0) are
/// note events; every other status, including note messages on other
/// channels, is ignored with no state change.
pub fn decode(bytes: &[u8]) -> Option<NoteEvent> {
    if bytes.len() < 3 {
        return None;
    }

    let status = bytes[0];
    let note = bytes[1];
    let velocity = bytes[2];

    match status {
        0x90 if velocity > 0 => Some(NoteEvent {
            kind: NoteKind::On,
            note,
            velocity,
        }),
        0x90 | 0x80 => Some(NoteEvent {
            kind: NoteKind::Off,
            note,
            velocity: 0,
        }),
        _ => {
            // Realtime traffic (clock at 0xF8 etc.) arrives constantly;
            // keep it out of the logs.
            if bytes[0] < 0xF8 {
                debug!("ignoring MIDI status 0x{:02X}", bytes[0]);
            }
            None
        }
    }
}

/// Subscribes to every available MIDI input port and merges their decoded
/// note events into a single channel.
pub struct MidiListener {
    connections: Vec<MidiInputConnection<()>>,
    port_names: Vec<String>,
    rx: Receiver<NoteEvent>,
}

impl MidiListener {
    /// Open every input port currently available.
    ///
    /// MIDI access failures are not fatal: the listener comes back with an
    /// empty device set and a diagnostic in the log, and simply never
    /// delivers events.
    pub fn connect_all() -> Self {
        let (tx, rx) = channel();
        let mut listener = Self {
            connections: Vec::new(),
            port_names: Vec::new(),
            rx,
        };

        let port_count = match MidiInput::new("keyscope") {
            Ok(scanner) => scanner.ports().len(),
            Err(err) => {
                warn!("MIDI unavailable: {err}");
                return listener;
            }
        };

        for index in 0..port_count {
            if let Err(err) = listener.connect_port(index, tx.clone()) {
                warn!("failed to open MIDI input {index}: {err}");
            }
        }

        if listener.connections.is_empty() {
            warn!("no MIDI input devices found");
        }

        listener
    }

    // midir consumes the MidiInput handle on connect, so each port gets its
    // own instance.
    fn connect_port(
        &mut self,
        index: usize,
        tx: Sender<NoteEvent>,
    ) -> Result<(), midir::ConnectError<MidiInput>> {
        let mut midi_in = match MidiInput::new("keyscope") {
            Ok(midi_in) => midi_in,
            Err(err) => {
                warn!("MIDI unavailable: {err}");
                return Ok(());
            }
        };
        midi_in.ignore(Ignore::Sysex | Ignore::Time);

        let ports = midi_in.ports();
        let Some(port) = ports.get(index).cloned() else {
            // Port list changed underneath us; skip.
            return Ok(());
        };
        let name = midi_in
            .port_name(&port)
            .unwrap_or_else(|_| format!("input {index}"));

        let connection = midi_in.connect(
            &port,
            "keyscope-input",
            move |_timestamp, message, _| {
                if let Some(event) = decode(message) {
                    // Receiver gone means we are shutting down.
                    let _ = tx.send(event);
                }
            },
            (),
        )?;

        self.connections.push(connection);
        self.port_names.push(name);
        Ok(())
    }

    /// Names of the connected input devices, in port order.
    pub fn port_names(&self) -> &[String] {
        &self.port_names
    }

    /// Pull the next pending note event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<NoteEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for MidiListener {
    fn drop(&mut self) {
        for connection in self.connections.drain(..) {
            connection.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on() {
        let event = decode(&[0x90, 60, 100]).unwrap();
        assert_eq!(event.kind, NoteKind::On);
        assert_eq!(event.note, 60);
        assert_eq!(event.velocity, 100);
    }

    #[test]
    fn note_off() {
        let event = decode(&[0x80, 60, 64]).unwrap();
        assert_eq!(event.kind, NoteKind::Off);
        assert_eq!(event.note, 60);
    }

    #[test]
    fn note_on_velocity_zero_is_off() {
        let event = decode(&[0x90, 60, 0]).unwrap();
        assert_eq!(event.kind, NoteKind::Off);
    }

    #[test]
    fn other_channels_are_ignored() {
        assert!(decode(&[0x91, 60, 100]).is_none());
        assert!(decode(&[0x93, 72, 80]).is_none());
        assert!(decode(&[0x81, 60, 0]).is_none());
    }

    #[test]
    fn clock_is_ignored() {
        assert!(decode(&[0xF8, 0, 0]).is_none());
    }

    #[test]
    fn control_change_is_ignored() {
        assert!(decode(&[0xB0, 1, 64]).is_none());
    }

    #[test]
    fn short_messages_are_ignored() {
        assert!(decode(&[]).is_none());
        assert!(decode(&[0x90]).is_none());
        assert!(decode(&[0x90, 60]).is_none());
    }
}
