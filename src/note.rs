/*
MIDI Note Mapping
=================

Two pure functions translate a MIDI note number into the things a player
actually cares about: a readable name and a pitch.

Naming:
  note_number = 12 * (octave + 1) + semitone
  semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

So middle C (MIDI 60) is "C4" and the bottom of the range (MIDI 0) is
"C-1". Sharps are used for the black keys; flat spellings are aliases of
the same numbers and are not produced here.

Tuning:
  frequency = 440 * 2^((note - 69) / 12)

A4 (MIDI 69) is the 440 Hz reference; every semitone is a factor of
2^(1/12). Both functions are total over u8: a data byte above 127 can't
come out of a 7-bit MIDI stream, but the same formula applies and nothing
panics.
*/

/// Pitch class names in semitone order, starting at C.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Human-readable name for a MIDI note number, e.g. 60 → "C4".
pub fn note_name(note: u8) -> String {
    let pitch_class = PITCH_CLASSES[(note % 12) as usize];
    let octave = (note / 12) as i32 - 1;
    format!("{}{}", pitch_class, octave)
}

/// Frequency in Hz for a MIDI note number. A4 (69) = 440 Hz.
#[inline]
pub fn frequency(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_is_c4() {
        assert_eq!(note_name(60), "C4");
    }

    #[test]
    fn tuning_reference_is_a4() {
        assert_eq!(note_name(69), "A4");
    }

    #[test]
    fn bottom_of_range_is_c_minus_1() {
        assert_eq!(note_name(0), "C-1");
    }

    #[test]
    fn top_of_range_is_g9() {
        assert_eq!(note_name(127), "G9");
    }

    #[test]
    fn sharps_between_naturals() {
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(70), "A#4");
    }

    #[test]
    fn naming_is_deterministic() {
        for note in 0..=127u8 {
            assert_eq!(note_name(note), note_name(note));
        }
    }

    #[test]
    fn a440_and_octaves() {
        assert_eq!(frequency(69), 440.0);
        assert_eq!(frequency(81), 880.0);
        assert_eq!(frequency(57), 220.0);
    }

    #[test]
    fn middle_c_frequency() {
        assert!((frequency(60) - 261.6256).abs() < 0.01);
    }

    #[test]
    fn semitone_ratio() {
        let ratio = frequency(70) / frequency(69);
        assert!((ratio - 2.0_f32.powf(1.0 / 12.0)).abs() < 1e-6);
    }
}
