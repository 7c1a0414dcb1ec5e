use crate::dsp::envelope::EnvelopeStage;
use crate::io::backend::SampleSource;
use crate::synth::{
    config::{ConfigError, SynthConfig, Voicing},
    instrument::Sound,
    note::Note,
    registry::NoteRegistry,
};

/// The synthesis context: note registry plus channel voicings.
///
/// Built once at startup and shared (usually behind an `Arc`) between the
/// input poller, which mutates the registry, and the audio callback, which
/// calls [`SynthEngine::make_noise`] once per output frame.
pub struct SynthEngine {
    registry: NoteRegistry,
    voicings: Vec<Voicing>,
    master_gain: f64,
}

impl SynthEngine {
    pub fn new(config: SynthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            master_gain = config.master_gain,
            max_polyphony = config.max_polyphony,
            voicings = config.voicings.len(),
            "synth engine configured"
        );
        Ok(Self {
            registry: NoteRegistry::new(config.max_polyphony),
            voicings: config.voicings,
            master_gain: config.master_gain,
        })
    }

    pub fn registry(&self) -> &NoteRegistry {
        &self.registry
    }

    pub fn voicings(&self) -> &[Voicing] {
        &self.voicings
    }

    pub fn voicing(&self, channel: u8) -> Option<&Voicing> {
        self.voicings.iter().find(|v| v.channel == channel)
    }

    pub fn master_gain(&self) -> f64 {
        self.master_gain
    }

    /// The most recently struck note and the envelope stage it is in at
    /// `time`. Notes on unbound channels are skipped.
    pub fn latest_stage(&self, time: f64) -> Option<(Note, EnvelopeStage)> {
        let latest = self
            .registry
            .lock()
            .iter()
            .filter_map(|n| self.voicing(n.channel).map(|v| (*n, v.instrument)))
            .max_by(|(a, _), (b, _)| a.time_on.total_cmp(&b.time_on));
        latest.map(|(note, instrument)| {
            let stage = instrument.envelope().stage(time, note.time_on, note.time_off);
            (note, stage)
        })
    }

    /// Mix every registered note into one sample at `time`.
    ///
    /// Runs on the audio thread: a single lock for the whole pass, no
    /// allocation. Notes that are released and whose envelope has fully
    /// decayed are dropped from the registry. `_channel` is the device output
    /// channel; the mix is mono.
    pub fn make_noise(&self, _channel: usize, time: f64) -> f64 {
        let mut notes = self.registry.lock();
        let mut mixed = 0.0;

        for note in notes.iter_mut() {
            let (sound, gain) = self.render(time, note);
            mixed += sound.sample * gain;
            if sound.finished && note.is_released() {
                note.active = false;
            }
        }
        notes.retain(|n| n.active);

        mixed * self.master_gain
    }

    /// A note on an unbound channel is silent and counts as finished, so a
    /// released one is still retired.
    fn render(&self, time: f64, note: &Note) -> (Sound, f64) {
        match self.voicing(note.channel) {
            Some(v) => (v.instrument.sound(time, note), v.gain),
            None => (Sound::SILENT, 0.0),
        }
    }
}

impl SampleSource for SynthEngine {
    fn next_sample(&self, channel: usize, time: f64) -> f64 {
        self.make_noise(channel, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::instrument::Instrument;

    fn engine() -> SynthEngine {
        SynthEngine::new(SynthConfig::default()).expect("default config is valid")
    }

    #[test]
    fn empty_registry_is_silent() {
        assert_eq!(engine().make_noise(0, 1.0), 0.0);
    }

    #[test]
    fn rejects_invalid_config() {
        let result = SynthEngine::new(SynthConfig::new().with_polyphony(0));
        assert!(matches!(result, Err(ConfigError::NoPolyphony)));
    }

    #[test]
    fn channel_gain_scales_contribution() {
        let loud = SynthEngine::new(
            SynthConfig::new().with_voicing(9, Instrument::Bell8, 1.0),
        )
        .expect("valid");
        let quiet = SynthEngine::new(
            SynthConfig::new().with_voicing(9, Instrument::Bell8, 0.25),
        )
        .expect("valid");
        loud.registry().press(0, 9, 0.0);
        quiet.registry().press(0, 9, 0.0);

        let a = loud.make_noise(0, 0.3);
        let b = quiet.make_noise(0, 0.3);
        assert!(a.abs() > 0.0);
        assert!((b - a * 0.25).abs() < 1e-12);
    }

    #[test]
    fn held_note_is_kept_even_when_silent() {
        // the bell has zero sustain
        let engine = engine();
        engine.registry().press(0, 2, 0.0);
        assert_eq!(engine.make_noise(0, 5.0), 0.0);
        assert_eq!(engine.registry().len(), 1);
    }

    #[test]
    fn unbound_channel_is_silent_and_retired_after_release() {
        let engine = engine();
        engine.registry().press(4, 42, 0.0);
        assert_eq!(engine.make_noise(0, 0.5), 0.0);
        assert_eq!(engine.registry().len(), 1);

        engine.registry().release(4, 0.6);
        engine.make_noise(0, 0.7);
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn oversized_polyphony_is_an_error() {
        let result = SynthEngine::new(SynthConfig::new().with_polyphony(usize::MAX));
        assert!(matches!(result, Err(ConfigError::Polyphony(usize::MAX))));
    }

    #[test]
    fn extreme_note_id_mixes_without_panicking() {
        let engine = engine();
        engine.registry().press(i32::MAX - 5, 2, 0.0);
        engine.registry().press(i32::MAX, 3, 0.0);
        let sample = engine.make_noise(0, 0.1);
        assert!(sample.is_finite());
    }

    #[test]
    fn latest_stage_follows_newest_note() {
        let engine = engine();
        assert_eq!(engine.latest_stage(0.0), None);

        // harmonica: 0.05 s attack, 1 s decay
        engine.registry().press(0, 1, 0.0);
        engine.registry().press(5, 1, 1.0);
        let (note, stage) = engine.latest_stage(1.01).expect("two notes registered");
        assert_eq!(note.id, 5);
        assert_eq!(stage, EnvelopeStage::Attack);
        assert_eq!(engine.latest_stage(1.5).map(|(_, s)| s), Some(EnvelopeStage::Decay));
        assert_eq!(engine.latest_stage(3.0).map(|(_, s)| s), Some(EnvelopeStage::Sustain));

        // 0.1 s release
        engine.registry().release(5, 3.0);
        assert_eq!(engine.latest_stage(3.05).map(|(_, s)| s), Some(EnvelopeStage::Release));
        assert_eq!(engine.latest_stage(3.5).map(|(_, s)| s), Some(EnvelopeStage::Idle));
    }

    #[test]
    fn latest_stage_skips_unbound_channels() {
        let engine = engine();
        engine.registry().press(0, 2, 0.0);
        engine.registry().press(1, 42, 1.0);
        let (note, _) = engine.latest_stage(1.0).expect("bound note present");
        assert_eq!(note.id, 0);
    }

    #[test]
    fn works_as_sample_source() {
        let engine = engine();
        engine.registry().press(0, 3, 0.0);
        let source: &dyn SampleSource = &engine;
        assert!(source.next_sample(0, 0.2).abs() > 0.0);
    }
}
