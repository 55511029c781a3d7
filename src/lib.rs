pub mod dsp;
pub mod io;
pub mod note; // Note number → name / frequency mappers
pub mod synth; // Held-note tracking and tone lifecycle

pub const MAX_BLOCK_SIZE: usize = 2048;
