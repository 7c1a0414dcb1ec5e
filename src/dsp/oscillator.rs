use std::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Stateless Oscillators
=====================

Every waveform here is a pure function of absolute time. There is no phase
accumulator: the phase is rebuilt from `time` on every call.

    phase = 2π·f·t + depth·f·sin(2π·rate·t)

The second term is vibrato, a frequency-modulation wobble. Because it is
evaluated from `t` rather than integrated, a re-triggered note gets exactly
the same wobble as the first strike.


Waveforms
---------

  Sine        sin(phase)
  Square      +1 when sin(phase) > 0, otherwise -1 (0 maps to -1)
  Triangle    asin(sin(phase)·2/π)   (an inverse-sine approximation, kept
              as-is so the timbre matches the classic "olc" sound)
  AnalogSaw   (2/π)·Σ sin(i·phase)/i for i in 1..harmonics
  DigitalSaw  (2/π)·(f·π·(t mod 1/f) − π/2)
  Noise       uniform random in [-1, 1], fresh on every call

AnalogSaw is the expensive one: O(harmonics) sin() calls per sample, per
partial, per note. The harmonic count is clamped to MAX_HARMONICS.
*/

/// Upper bound on the additive saw harmonic count.
pub const MAX_HARMONICS: u32 = 512;

/// Harmonic count used when a saw is built without an explicit count.
pub const DEFAULT_HARMONICS: u32 = 50;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    /// Band-limited saw built from `harmonics - 1` sine partials.
    AnalogSaw { harmonics: u32 },
    /// Closed-form ramp, aliased but cheap.
    DigitalSaw,
    Noise,
}

impl Waveform {
    /// Additive saw with the default harmonic count.
    pub const fn analog_saw() -> Self {
        Waveform::AnalogSaw {
            harmonics: DEFAULT_HARMONICS,
        }
    }

    /// Map the classic integer waveform codes (0 = sine ... 5 = noise).
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Square),
            2 => Some(Waveform::Triangle),
            3 => Some(Waveform::analog_saw()),
            4 => Some(Waveform::DigitalSaw),
            5 => Some(Waveform::Noise),
            _ => None,
        }
    }
}

/// Frequency-modulation vibrato applied inside the phase term.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vibrato {
    /// LFO rate in Hz.
    pub rate_hz: f64,
    /// Modulation depth, scaled by the carrier frequency.
    pub depth: f64,
}

impl Vibrato {
    pub const NONE: Vibrato = Vibrato {
        rate_hz: 0.0,
        depth: 0.0,
    };

    pub const fn new(rate_hz: f64, depth: f64) -> Self {
        Self { rate_hz, depth }
    }
}

impl Default for Vibrato {
    fn default() -> Self {
        Self::NONE
    }
}

/// Convert Hz to angular velocity (rad/s).
#[inline]
pub fn omega(hertz: f64) -> f64 {
    hertz * TAU
}

/// Instantaneous amplitude of `waveform` at `time_s` seconds.
///
/// Every waveform except [`Waveform::Noise`] is a pure function of its
/// arguments. A non-finite phase yields 0.0.
pub fn osc(frequency_hz: f64, time_s: f64, waveform: Waveform, vibrato: Vibrato) -> f64 {
    let phase = omega(frequency_hz) * time_s
        + vibrato.depth * frequency_hz * (omega(vibrato.rate_hz) * time_s).sin();
    // out-of-range pitches (scale overflowing to infinity) are silent
    if !phase.is_finite() {
        return 0.0;
    }

    match waveform {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => (phase.sin() * 2.0 / PI).asin(),
        Waveform::AnalogSaw { harmonics } => {
            let harmonics = harmonics.min(MAX_HARMONICS);
            let mut output = 0.0;
            for i in 1..harmonics {
                let i = i as f64;
                output += (i * phase).sin() / i;
            }
            output * (2.0 / PI)
        }
        Waveform::DigitalSaw => {
            if frequency_hz == 0.0 {
                return 0.0;
            }
            (2.0 / PI) * (frequency_hz * PI * (time_s % (1.0 / frequency_hz)) - FRAC_PI_2)
        }
        Waveform::Noise => rand::random_range(-1.0..=1.0),
    }
}

/// [`osc`] addressed by integer waveform code. Unknown codes are silent.
pub fn osc_indexed(
    frequency_hz: f64,
    time_s: f64,
    waveform: i32,
    vibrato: Vibrato,
    custom: f64,
) -> f64 {
    match Waveform::from_index(waveform) {
        Some(Waveform::AnalogSaw { .. }) => {
            let harmonics = custom.max(0.0).ceil() as u32;
            osc(frequency_hz, time_s, Waveform::AnalogSaw { harmonics }, vibrato)
        }
        Some(waveform) => osc(frequency_hz, time_s, waveform, vibrato),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_matches_closed_form() {
        let t = 0.0123;
        let expected = (TAU * 440.0 * t).sin();
        let actual = osc(440.0, t, Waveform::Sine, Vibrato::NONE);
        assert!((actual - expected).abs() < 1e-12, "expected {expected}, got {actual}");
    }

    #[test]
    fn square_is_strictly_bipolar() {
        for i in 0..1_000 {
            let t = i as f64 / 44_100.0;
            let s = osc(256.0, t, Waveform::Square, Vibrato::new(5.0, 0.001));
            assert!(s == 1.0 || s == -1.0, "square produced {s}");
        }
        // sin(0) == 0 is not > 0
        assert_eq!(osc(256.0, 0.0, Waveform::Square, Vibrato::NONE), -1.0);
    }

    #[test]
    fn triangle_uses_inverse_sine_shape() {
        // quarter period: sin(phase) == 1, asin(2/π)
        let f = 100.0;
        let t = 1.0 / (4.0 * f);
        let expected = (2.0 / PI).asin();
        let actual = osc(f, t, Waveform::Triangle, Vibrato::NONE);
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn analog_saw_with_two_harmonics_is_scaled_sine() {
        // harmonics = 2 sums only i = 1
        let f = 50.0;
        let t = 0.003;
        let expected = (TAU * f * t).sin() * (2.0 / PI);
        let actual = osc(f, t, Waveform::AnalogSaw { harmonics: 2 }, Vibrato::NONE);
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn analog_saw_with_one_harmonic_is_silent() {
        let actual = osc(50.0, 0.3, Waveform::AnalogSaw { harmonics: 1 }, Vibrato::NONE);
        assert_eq!(actual, 0.0);
    }

    #[test]
    fn digital_saw_ramps_from_minus_one() {
        let f = 10.0;
        assert!((osc(f, 0.0, Waveform::DigitalSaw, Vibrato::NONE) + 1.0).abs() < 1e-12);
        // halfway through the period the ramp crosses zero
        assert!(osc(f, 0.05, Waveform::DigitalSaw, Vibrato::NONE).abs() < 1e-9);
    }

    #[test]
    fn noise_stays_in_range_and_varies() {
        let samples: Vec<f64> = (0..256)
            .map(|_| osc(440.0, 0.5, Waveform::Noise, Vibrato::NONE))
            .collect();
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(samples.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn vibrato_is_recomputed_from_absolute_time() {
        let vib = Vibrato::new(5.0, 0.001);
        let a = osc(256.0, 1.234, Waveform::Sine, vib);
        let _ = osc(256.0, 0.5, Waveform::Sine, vib);
        let b = osc(256.0, 1.234, Waveform::Sine, vib);
        assert_eq!(a, b);
    }

    #[test]
    fn vibrato_modulates_the_phase() {
        let (f, t, rate, depth) = (256.0, 0.0317, 5.0, 0.01);
        let expected = (TAU * f * t + depth * f * (TAU * rate * t).sin()).sin();
        let actual = osc(f, t, Waveform::Sine, Vibrato::new(rate, depth));
        assert!((actual - expected).abs() < 1e-12, "expected {expected}, got {actual}");

        let dry = osc(f, t, Waveform::Sine, Vibrato::NONE);
        assert!((actual - dry).abs() > 1e-3, "vibrato had no effect");
    }

    #[test]
    fn infinite_frequency_is_silent() {
        assert_eq!(osc(f64::INFINITY, 0.5, Waveform::Sine, Vibrato::NONE), 0.0);
        assert_eq!(osc(f64::INFINITY, 0.5, Waveform::Square, Vibrato::NONE), 0.0);
    }

    #[test]
    fn unknown_codes_are_silent() {
        assert_eq!(Waveform::from_index(6), None);
        assert_eq!(osc_indexed(440.0, 0.1, 42, Vibrato::NONE, 50.0), 0.0);
        assert_eq!(osc_indexed(440.0, 0.1, -1, Vibrato::NONE, 50.0), 0.0);
    }

    #[test]
    fn indexed_saw_uses_custom_harmonics() {
        let t = 0.0071;
        let direct = osc(80.0, t, Waveform::AnalogSaw { harmonics: 7 }, Vibrato::NONE);
        let indexed = osc_indexed(80.0, t, 3, Vibrato::NONE, 7.0);
        assert_eq!(direct, indexed);
    }
}
