use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::synth::instrument::Instrument;
use crate::{DEFAULT_MASTER_GAIN, DEFAULT_POLYPHONY, MAX_POLYPHONY};

/// Binds a note channel to an instrument and a mix level.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voicing {
    pub channel: u8,
    pub instrument: Instrument,
    pub gain: f64,
}

impl Voicing {
    pub const fn new(channel: u8, instrument: Instrument, gain: f64) -> Self {
        Self {
            channel,
            instrument,
            gain,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("master gain must be finite and positive, got {0}")]
    MasterGain(f64),
    #[error("polyphony must be at least one note")]
    NoPolyphony,
    #[error("polyphony {0} exceeds the limit of {max} notes", max = MAX_POLYPHONY)]
    Polyphony(usize),
    #[error("channel {0} is bound more than once")]
    DuplicateChannel(u8),
    #[error("gain for channel {channel} must be finite and non-negative, got {gain}")]
    ChannelGain { channel: u8, gain: f64 },
}

/// Engine settings, fixed at construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    /// Final attenuation applied to the mixed sum.
    pub master_gain: f64,
    /// Maximum number of notes in the registry.
    pub max_polyphony: usize,
    pub voicings: Vec<Voicing>,
}

impl SynthConfig {
    pub fn new() -> Self {
        Self {
            master_gain: DEFAULT_MASTER_GAIN,
            max_polyphony: DEFAULT_POLYPHONY,
            voicings: vec![
                Voicing::new(1, Instrument::Harmonica, 0.5),
                Voicing::new(2, Instrument::Bell, 1.0),
                Voicing::new(3, Instrument::Bell8, 1.0),
            ],
        }
    }

    pub fn with_master_gain(mut self, gain: f64) -> Self {
        self.master_gain = gain;
        self
    }

    pub fn with_polyphony(mut self, max_notes: usize) -> Self {
        self.max_polyphony = max_notes;
        self
    }

    /// Bind `channel`, replacing any existing binding for it.
    pub fn with_voicing(mut self, channel: u8, instrument: Instrument, gain: f64) -> Self {
        self.voicings.retain(|v| v.channel != channel);
        self.voicings.push(Voicing::new(channel, instrument, gain));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.master_gain.is_finite() || self.master_gain <= 0.0 {
            return Err(ConfigError::MasterGain(self.master_gain));
        }
        if self.max_polyphony == 0 {
            return Err(ConfigError::NoPolyphony);
        }
        if self.max_polyphony > MAX_POLYPHONY {
            return Err(ConfigError::Polyphony(self.max_polyphony));
        }
        for (i, voicing) in self.voicings.iter().enumerate() {
            if !voicing.gain.is_finite() || voicing.gain < 0.0 {
                return Err(ConfigError::ChannelGain {
                    channel: voicing.channel,
                    gain: voicing.gain,
                });
            }
            if self.voicings[..i].iter().any(|v| v.channel == voicing.channel) {
                return Err(ConfigError::DuplicateChannel(voicing.channel));
            }
        }
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}
