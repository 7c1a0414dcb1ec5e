#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frequency of note index 0.
pub const REFERENCE_HZ: f64 = 256.0;

/// Twelfth root of two, the equal-tempered semitone ratio.
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Twelve-tone equal temperament anchored at [`REFERENCE_HZ`].
    #[default]
    EqualTempered,
}

impl Scale {
    /// Unknown scale codes fall back to the default scale.
    pub fn from_index(_index: i32) -> Self {
        Scale::default()
    }
}

/// Convert a note index to Hz. Total over all integers; negative indices
/// descend below the reference pitch.
#[inline]
pub fn scale(note_index: i32, scale: Scale) -> f64 {
    match scale {
        Scale::EqualTempered => REFERENCE_HZ * SEMITONE_RATIO.powi(note_index),
    }
}
