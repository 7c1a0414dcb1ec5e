//! Computer-keyboard piano layout.
//!
//! Sixteen keys across the bottom two rows, chromatic from pitch index 0:
//!
//! ```text
//! |   |   |   |   |   | |   |   |   |   | |   | |   |   |   |
//! |   | S |   |   | F | | G |   |   | J | | K | | L |   |   |
//! |   |___|   |   |___| |___|   |   |___| |___| |___|   |   |__
//! |     |     |     |     |     |     |     |     |     |     |
//! |  Z  |  X  |  C  |  V  |  B  |  N  |  M  |  ,  |  .  |  /  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! ```

use std::time::{Duration, Instant};

/// Keys in pitch order.
pub const KEY_LAYOUT: [char; 16] = [
    'z', 's', 'x', 'c', 'f', 'v', 'g', 'b', 'n', 'j', 'm', 'k', ',', 'l', '.', '/',
];

pub const KEY_COUNT: usize = KEY_LAYOUT.len();

/// How long a key counts as down after its last press or repeat event, when
/// the terminal cannot report key releases.
pub const DEFAULT_HOLD_TIMEOUT: Duration = Duration::from_millis(600);

/// Pitch index for a key, case-insensitive.
pub fn pitch_for_key(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    KEY_LAYOUT.iter().position(|&k| k == key)
}

/// Tracks which layout keys are down.
///
/// With release events available the state is exact. Without them a key is
/// considered down until `hold_timeout` passes with no press or repeat.
#[derive(Debug, Clone)]
pub struct KeyState {
    last_seen: [Option<Instant>; KEY_COUNT],
    reports_release: bool,
    hold_timeout: Duration,
}

impl KeyState {
    pub fn new(reports_release: bool) -> Self {
        Self {
            last_seen: [None; KEY_COUNT],
            reports_release,
            hold_timeout: DEFAULT_HOLD_TIMEOUT,
        }
    }

    pub fn with_hold_timeout(mut self, timeout: Duration) -> Self {
        self.hold_timeout = timeout;
        self
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// Press or auto-repeat. Returns the pitch if the key is in the layout.
    pub fn key_down(&mut self, key: char, at: Instant) -> Option<usize> {
        let pitch = pitch_for_key(key)?;
        self.last_seen[pitch] = Some(at);
        Some(pitch)
    }

    pub fn key_up(&mut self, key: char) -> Option<usize> {
        let pitch = pitch_for_key(key)?;
        self.last_seen[pitch] = None;
        Some(pitch)
    }

    pub fn release_all(&mut self) {
        self.last_seen = [None; KEY_COUNT];
    }

    /// Down/up state of every layout key at `now`.
    pub fn snapshot(&self, now: Instant) -> [bool; KEY_COUNT] {
        let mut keys = [false; KEY_COUNT];
        for (down, seen) in keys.iter_mut().zip(&self.last_seen) {
            *down = match seen {
                Some(_) if self.reports_release => true,
                Some(at) => now.saturating_duration_since(*at) < self.hold_timeout,
                None => false,
            };
        }
        keys
    }
}
