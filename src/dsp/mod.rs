//! Stateless DSP primitives.
//!
//! Everything here is a pure function of its arguments (noise aside), so the
//! mixer can evaluate any note at any time without per-voice state. These
//! stay focused on the signal math; note bookkeeping lives in `synth`.

/// Timestamp-driven attack/decay/sustain/release envelope.
pub mod envelope;
/// Oscillator waveforms and noise.
pub mod oscillator;
/// Note index to frequency mapping.
pub mod scale;

pub use envelope::{Envelope, EnvelopeStage};
pub use oscillator::{osc, Vibrato, Waveform};
pub use scale::{scale, Scale};
