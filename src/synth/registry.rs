use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::synth::note::Note;

/// The shared set of sounding notes.
///
/// Both the input poller and the audio callback take the single lock for a
/// whole pass: one critical section per key snapshot, one per sample. The
/// backing vector is allocated up front at the polyphony bound, so pushes
/// and `retain` never reallocate on either thread.
pub struct NoteRegistry {
    notes: Mutex<Vec<Note>>,
    max_notes: usize,
}

impl NoteRegistry {
    /// `max_notes` is clamped to [`MAX_POLYPHONY`](crate::MAX_POLYPHONY).
    pub fn new(max_notes: usize) -> Self {
        let max_notes = max_notes.min(crate::MAX_POLYPHONY);
        Self {
            notes: Mutex::new(Vec::with_capacity(max_notes)),
            max_notes,
        }
    }

    /// Lock the registry. A panic on another thread while holding the lock
    /// leaves the notes in a usable state, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, Vec<Note>> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn max_notes(&self) -> usize {
        self.max_notes
    }

    /// Apply one snapshot of key states, where `keys[k]` is true while pitch
    /// `k` is down.
    ///
    /// - unregistered pitch, key down: register a held note on `channel`
    /// - registered and released, key down: strike it again at `now`
    /// - registered and held, key up: stamp the release at `now`
    pub fn apply_keys(&self, keys: &[bool], now: f64, channel: u8) {
        let mut notes = self.lock();
        for (index, &down) in keys.iter().enumerate() {
            let id = index as i32;
            match notes.iter().position(|n| n.id == id) {
                Some(i) if down => notes[i].retrigger(now),
                Some(i) => notes[i].release(now),
                None if down => {
                    Self::insert(&mut notes, self.max_notes, Note::pressed(id, channel, now))
                }
                None => {}
            }
        }
    }

    /// Key-down for a single pitch.
    pub fn press(&self, id: i32, channel: u8, now: f64) {
        let mut notes = self.lock();
        match notes.iter().position(|n| n.id == id) {
            Some(i) => notes[i].retrigger(now),
            None => Self::insert(&mut notes, self.max_notes, Note::pressed(id, channel, now)),
        }
    }

    /// Key-up for a single pitch.
    pub fn release(&self, id: i32, now: f64) {
        if let Some(note) = self.lock().iter_mut().find(|n| n.id == id) {
            note.release(now);
        }
    }

    /// Release every held note.
    pub fn release_all(&self, now: f64) {
        for note in self.lock().iter_mut() {
            note.release(now);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current notes, for display and tests.
    pub fn snapshot(&self) -> Vec<Note> {
        self.lock().clone()
    }

    fn insert(notes: &mut Vec<Note>, max_notes: usize, note: Note) {
        if notes.len() >= max_notes {
            tracing::warn!(id = note.id, max_notes, "polyphony limit reached, dropping note");
            return;
        }
        tracing::trace!(id = note.id, channel = note.channel, "note on");
        notes.push(note);
    }
}

impl Default for NoteRegistry {
    fn default() -> Self {
        Self::new(crate::DEFAULT_POLYPHONY)
    }
}
