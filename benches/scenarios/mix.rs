//! Benchmarks for the mixer under polyphony.
//!
//! Notes are held so nothing is retired and every iteration mixes the same
//! set; this is the steady-state cost of a chord.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::{SynthConfig, SynthEngine};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn engine_with_notes(count: i32) -> SynthEngine {
    let engine = SynthEngine::new(SynthConfig::default()).expect("default config is valid");
    for id in 0..count {
        // rotate through harmonica, bell, bell8
        let channel = (id % 3) as u8 + 1;
        engine.registry().press(id, channel, 0.0);
    }
    engine
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");

    for &size in BLOCK_SIZES {
        for notes in [1, 4, 16] {
            let engine = engine_with_notes(notes);
            let name = format!("{notes}_notes");

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for i in 0..size {
                        let t = 0.5 + i as f64 / SAMPLE_RATE;
                        acc += engine.make_noise(0, black_box(t));
                    }
                    acc
                })
            });
        }
    }

    group.finish();
}
