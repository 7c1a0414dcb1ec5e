//! Benchmarks for a single held note on each instrument.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::synth::{Instrument, Note};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_instruments(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/instruments");
    let note = Note::pressed(0, 1, 0.0);

    for &size in BLOCK_SIZES {
        for instrument in Instrument::ALL {
            group.bench_with_input(BenchmarkId::new(instrument.name(), size), &size, |b, &size| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for i in 0..size {
                        let t = 0.5 + i as f64 / SAMPLE_RATE;
                        acc += instrument.sound(black_box(t), &note).sample;
                    }
                    acc
                })
            });
        }
    }

    group.finish();
}
