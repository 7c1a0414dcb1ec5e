use crate::MIN_TIME;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Timestamp-Driven ADSR Envelope
==============================

This envelope keeps no runtime state. Its output is a pure function of three
timestamps on the playback clock:

  time       now
  time_on    when the key last went down
  time_off   when the key last went up

  time_on >  time_off   key is held
  time_on <= time_off   key has been released


The Shape
---------

  Level
  start ┐   ╱╲
        │  ╱  ╲__________
  sust  │ ╱              ╲
        │╱                ╲
    0.0 └──────────────────╲──→ Time
        A    D    Sustain   R

Held:      life = time - time_on
             life <= A        level = life / A * start
             life <= A + D    level = start + (sustain - start) * (life - A) / D
             otherwise        level = sustain

Released:  release_amp = the held formula evaluated at life = time_off - time_on
           level = release_amp * (1 - (time - time_off) / R)

Release starts from wherever the envelope was when the key went up, so a
key released mid-attack fades from its partial level instead of jumping.

Any level below SILENCE_THRESHOLD snaps to exactly 0.0. Instruments use that
exact zero as the "note has finished" signal.
*/

/// Levels below this are treated as silence.
pub const SILENCE_THRESHOLD: f64 = 1e-4;

/// Envelope phase, derived from the timestamps for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    Sustain,
    Release,
    Idle,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    attack_time: f64,  // seconds to ramp 0 → start_amp
    decay_time: f64,   // seconds to ramp start_amp → sustain_amp
    release_time: f64, // seconds to ramp release level → 0
    start_amp: f64,    // peak reached at the end of attack
    sustain_amp: f64,  // level held while the key is down
}

impl Envelope {
    /// 100ms attack and decay, full sustain, 200ms release.
    pub fn new() -> Self {
        Self::adsr(0.1, 0.1, 1.0, 0.2)
    }

    /// Peak at 1.0 after the attack.
    pub fn adsr(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self::with_peak(attack, decay, 1.0, sustain, release)
    }

    pub fn with_peak(attack: f64, decay: f64, start: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            release_time: release.max(MIN_TIME),
            start_amp: start.clamp(0.0, 1.0),
            sustain_amp: sustain.clamp(0.0, 1.0),
        }
    }

    /// Gain in [0, 1] at `time` for a note with the given on/off stamps.
    pub fn amp(&self, time: f64, time_on: f64, time_off: f64) -> f64 {
        let level = if time_on > time_off {
            self.held_level(time - time_on)
        } else {
            let release_amp = self.held_level(time_off - time_on);
            release_amp - (time - time_off) / self.release_time * release_amp
        };

        if level < SILENCE_THRESHOLD {
            0.0
        } else {
            level
        }
    }

    /// Which phase the envelope is in. `Idle` once the level has snapped to 0
    /// after release, or before the note starts.
    pub fn stage(&self, time: f64, time_on: f64, time_off: f64) -> EnvelopeStage {
        if time_on > time_off {
            let life = time - time_on;
            if life < 0.0 {
                EnvelopeStage::Idle
            } else if life <= self.attack_time {
                EnvelopeStage::Attack
            } else if life <= self.attack_time + self.decay_time {
                EnvelopeStage::Decay
            } else {
                EnvelopeStage::Sustain
            }
        } else if self.amp(time, time_on, time_off) > 0.0 {
            EnvelopeStage::Release
        } else {
            EnvelopeStage::Idle
        }
    }

    fn held_level(&self, life: f64) -> f64 {
        if life <= self.attack_time {
            (life / self.attack_time) * self.start_amp
        } else if life <= self.attack_time + self.decay_time {
            (self.sustain_amp - self.start_amp) / self.decay_time * (life - self.attack_time)
                + self.start_amp
        } else {
            self.sustain_amp
        }
    }

    pub fn attack_time(&self) -> f64 {
        self.attack_time
    }

    pub fn decay_time(&self) -> f64 {
        self.decay_time
    }

    pub fn release_time(&self) -> f64 {
        self.release_time
    }

    pub fn start_amp(&self) -> f64 {
        self.start_amp
    }

    pub fn sustain_amp(&self) -> f64 {
        self.sustain_amp
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
