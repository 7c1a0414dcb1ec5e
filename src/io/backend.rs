use std::sync::atomic::{AtomicU64, Ordering};

/// Something the audio backend can pull one sample at a time from.
///
/// `channel` is the device output channel and `time` is the playback clock
/// in seconds. Implementations run on the realtime thread.
pub trait SampleSource: Send + Sync {
    fn next_sample(&self, channel: usize, time: f64) -> f64;
}

impl<F> SampleSource for F
where
    F: Fn(usize, f64) -> f64 + Send + Sync,
{
    fn next_sample(&self, channel: usize, time: f64) -> f64 {
        self(channel, time)
    }
}

/// Monotonic playback time, counted in rendered frames.
///
/// The audio thread advances it; any thread may read it to timestamp key
/// events on the same clock the mixer sees.
#[derive(Debug)]
pub struct PlaybackClock {
    frames: AtomicU64,
    sample_rate: f64,
}

impl PlaybackClock {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Current playback time in seconds.
    pub fn time(&self) -> f64 {
        self.frames() as f64 / self.sample_rate
    }

    pub fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::AcqRel);
    }
}

/// Fill an interleaved device buffer from `source`.
///
/// One sample is pulled per frame (from channel 0) and copied to every output
/// channel; the clock advances one frame per sample. Output is clamped to
/// [-1, 1].
pub fn render_interleaved<S>(source: &S, clock: &PlaybackClock, data: &mut [f32], channels: usize)
where
    S: SampleSource + ?Sized,
{
    let channels = channels.max(1);
    for frame in data.chunks_mut(channels) {
        let sample = source.next_sample(0, clock.time()).clamp(-1.0, 1.0) as f32;
        frame.fill(sample);
        clock.advance(1);
    }
}
