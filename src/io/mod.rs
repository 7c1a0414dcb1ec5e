// Purpose - the boundaries the engine is driven through

/// Playback clock and the per-sample callback contract.
pub mod backend;
/// Computer-keyboard layout and key-state tracking.
pub mod keyboard;

pub use backend::{render_interleaved, PlaybackClock, SampleSource};
pub use keyboard::{pitch_for_key, KeyState, KEY_LAYOUT};
