// Purpose: instruments, the shared note registry, and the per-sample mixer
// This layer sits above the dsp primitives and owns all note state

pub mod config;
pub mod engine;
pub mod instrument;
pub mod note;
pub mod registry;

pub use config::{ConfigError, SynthConfig, Voicing};
pub use engine::SynthEngine;
pub use instrument::{Instrument, Partial, Sound};
pub use note::Note;
pub use registry::NoteRegistry;
