pub mod dsp; // Oscillators, scale mapping, envelope
pub mod io; // Playback clock and keyboard layout
pub mod synth; // Instruments, note registry, mixer

pub use synth::{SynthConfig, SynthEngine};

/// Attenuation applied to the mixed sum so chords do not clip.
pub const DEFAULT_MASTER_GAIN: f64 = 0.2;
/// One note per layout key.
pub const DEFAULT_POLYPHONY: usize = io::keyboard::KEY_COUNT;
/// Largest note registry a config may ask for.
pub const MAX_POLYPHONY: usize = 128;
pub(crate) const MIN_TIME: f64 = 1.0 / 48_000.0;
