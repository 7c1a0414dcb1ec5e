use crate::MIN_TIME;

/// A sounding (or decaying) key.
///
/// `time_on > time_off` means the key is held; `time_off >= time_on` means it
/// has been released. Both stamps live on the playback clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Pitch index fed to the scale mapper.
    pub id: i32,
    pub time_on: f64,
    pub time_off: f64,
    /// Cleared by the mixer once the note has decayed after release.
    pub active: bool,
    /// Selects the instrument that renders this note.
    pub channel: u8,
}

impl Note {
    /// A note whose key went down at `time_on`.
    ///
    /// `time_off` starts at negative infinity so the note counts as held even
    /// when pressed at clock time zero.
    pub fn pressed(id: i32, channel: u8, time_on: f64) -> Self {
        Self {
            id,
            time_on,
            time_off: f64::NEG_INFINITY,
            active: true,
            channel,
        }
    }

    pub fn is_held(&self) -> bool {
        self.time_on > self.time_off
    }

    pub fn is_released(&self) -> bool {
        self.time_off >= self.time_on
    }

    /// Stamp the key-up time. No effect on a note that is already released.
    pub fn release(&mut self, now: f64) {
        if self.is_held() {
            self.time_off = now;
        }
    }

    /// Strike a released note again. No effect while the key is still held.
    pub fn retrigger(&mut self, now: f64) {
        if self.is_released() {
            // a re-press on the same clock tick as the release must still read as held
            self.time_on = if now > self.time_off {
                now
            } else {
                self.time_off + MIN_TIME
            };
            self.active = true;
        }
    }
}
