//! Real-world scenario benchmarks.
//!
//! These model what the audio callback actually does: render instruments and
//! mix a registry full of notes, one frame at a time.

mod instruments;
mod mix;

pub use instruments::bench_instruments;
pub use mix::bench_mix;
