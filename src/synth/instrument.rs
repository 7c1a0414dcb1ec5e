//! Fixed instrument voicings.
//!
//! Each instrument is an additive stack of two or three oscillator partials
//! at octave offsets from the played note, scaled by a timestamp-driven ADSR
//! envelope.
//!
//! | Instrument | Character                                          |
//! |------------|----------------------------------------------------|
//! | Bell       | sine partials one to three octaves up, no sustain  |
//! | Bell8      | square root plus sines, long sustain               |
//! | Harmonica  | two squares with a breath of noise                 |

use crate::dsp::{
    envelope::Envelope,
    oscillator::{osc, Vibrato, Waveform},
    scale::{scale, Scale},
};
use crate::synth::note::Note;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One weighted oscillator term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    pub weight: f64,
    /// Semitones above the played note.
    pub offset: i32,
    pub waveform: Waveform,
    pub vibrato: Vibrato,
}

impl Partial {
    const fn new(weight: f64, offset: i32, waveform: Waveform) -> Self {
        Self {
            weight,
            offset,
            waveform,
            vibrato: Vibrato::NONE,
        }
    }

    const fn with_vibrato(mut self, rate_hz: f64, depth: f64) -> Self {
        self.vibrato = Vibrato::new(rate_hz, depth);
        self
    }
}

/// Output of one instrument for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sound {
    pub sample: f64,
    /// The envelope has reached silence.
    pub finished: bool,
}

impl Sound {
    pub const SILENT: Sound = Sound {
        sample: 0.0,
        finished: true,
    };
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Bell,
    Bell8,
    Harmonica,
}

const BELL_PARTIALS: [Partial; 3] = [
    Partial::new(1.0, 12, Waveform::Sine).with_vibrato(5.0, 0.001),
    Partial::new(0.5, 24, Waveform::Sine),
    Partial::new(0.25, 36, Waveform::Sine),
];

const BELL8_PARTIALS: [Partial; 3] = [
    Partial::new(1.0, 0, Waveform::Square).with_vibrato(5.0, 0.001),
    Partial::new(0.5, 12, Waveform::Sine),
    Partial::new(0.25, 24, Waveform::Sine),
];

const HARMONICA_PARTIALS: [Partial; 3] = [
    Partial::new(1.0, 0, Waveform::Square).with_vibrato(5.0, 0.001),
    Partial::new(0.5, 12, Waveform::Square),
    Partial::new(0.05, 24, Waveform::Noise),
];

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Bell, Instrument::Bell8, Instrument::Harmonica];

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Bell => "Bell",
            Instrument::Bell8 => "Bell8",
            Instrument::Harmonica => "Harmonica",
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Instrument::Bell => Envelope::with_peak(0.01, 1.0, 1.0, 0.0, 1.0),
            Instrument::Bell8 => Envelope::with_peak(0.01, 0.5, 1.0, 0.8, 1.0),
            Instrument::Harmonica => Envelope::with_peak(0.05, 1.0, 1.0, 0.95, 0.1),
        }
    }

    pub fn volume(&self) -> f64 {
        1.0
    }

    pub fn partials(&self) -> &'static [Partial] {
        match self {
            Instrument::Bell => &BELL_PARTIALS,
            Instrument::Bell8 => &BELL8_PARTIALS,
            Instrument::Harmonica => &HARMONICA_PARTIALS,
        }
    }

    /// Render `note` at `time`.
    ///
    /// Oscillators run on note-relative time, so every strike starts at phase
    /// zero. `finished` is set exactly when the envelope has snapped to 0.
    pub fn sound(&self, time: f64, note: &Note) -> Sound {
        let gain = self.envelope().amp(time, note.time_on, note.time_off);
        let finished = gain <= 0.0;
        if finished {
            return Sound {
                sample: 0.0,
                finished,
            };
        }

        let life = time - note.time_on;
        let mix: f64 = self
            .partials()
            .iter()
            .map(|p| {
                let freq = scale(note.id.saturating_add(p.offset), Scale::default());
                p.weight * osc(freq, life, p.waveform, p.vibrato)
            })
            .sum();

        Sound {
            sample: gain * self.volume() * mix,
            finished,
        }
    }
}
