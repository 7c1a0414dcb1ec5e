//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::oscillator::{osc, Vibrato, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn render(buffer: &mut [f64], waveform: Waveform, vibrato: Vibrato) {
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample = osc(256.0, i as f64 / SAMPLE_RATE, waveform, vibrato);
    }
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let waveforms = [
        ("sine", Waveform::Sine),
        ("square", Waveform::Square),
        ("triangle", Waveform::Triangle),
        ("digital_saw", Waveform::DigitalSaw),
        // O(harmonics) sin() calls per sample
        ("analog_saw_50", Waveform::analog_saw()),
        ("analog_saw_200", Waveform::AnalogSaw { harmonics: 200 }),
        ("noise", Waveform::Noise),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        for (name, waveform) in waveforms {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| render(black_box(&mut buffer), waveform, Vibrato::NONE))
            });
        }

        // Vibrato adds a second sin() per sample
        group.bench_with_input(BenchmarkId::new("sine_vibrato", size), &size, |b, _| {
            b.iter(|| render(black_box(&mut buffer), Waveform::Sine, Vibrato::new(5.0, 0.001)))
        });
    }

    group.finish();
}
