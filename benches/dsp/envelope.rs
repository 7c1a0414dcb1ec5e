//! Benchmarks for the ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::envelope::Envelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = Envelope::with_peak(0.05, 1.0, 1.0, 0.95, 0.1);

    // (name, time_on, time_off, start of the rendered window)
    let phases = [
        ("attack", 0.0, f64::NEG_INFINITY, 0.0),
        ("sustain", 0.0, f64::NEG_INFINITY, 5.0),
        ("release", 0.0, 5.0, 5.0),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        for (name, time_on, time_off, start) in phases {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (i, gain) in buffer.iter_mut().enumerate() {
                        let t = start + i as f64 / SAMPLE_RATE;
                        *gain = env.amp(black_box(t), time_on, time_off);
                    }
                })
            });
        }
    }

    group.finish();
}
