// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for model loading and the inference path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_manager::MemoryPool;
use runtime::{forward, preprocess, InferenceEngine, MemoryStorage, ModelLoader};
use sensor_monitor::{ManualTicks, SensorContext};

fn storage() -> MemoryStorage {
    let image: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
    MemoryStorage::new().with_file("bench.bin", image)
}

fn bench_load(c: &mut Criterion) {
    let storage = storage();
    let loader = ModelLoader::new(MemoryPool::default());
    c.bench_function("load_demo_model", |b| {
        b.iter(|| loader.load(black_box(&storage), "bench.bin").unwrap())
    });
}

fn bench_forward(c: &mut Criterion) {
    let loader = ModelLoader::new(MemoryPool::default());
    let mut loaded = loader.load(&storage(), "bench.bin").unwrap();
    let features = [0.49f32, 0.4167, 0.1, 0.1];
    c.bench_function("forward_4_8_6_4", |b| {
        b.iter(|| {
            let out = forward(loaded.model_mut(), black_box(&features)).unwrap();
            black_box(out[0]);
        })
    });
}

fn bench_run(c: &mut Criterion) {
    let loader = ModelLoader::new(MemoryPool::default());
    let mut loaded = loader.load(&storage(), "bench.bin").unwrap();
    let mut engine = InferenceEngine::new(ManualTicks::new(0)).with_stats(true);
    let ctx = SensorContext::from_values([0.0, 9.8, 0.0], 10.0, 10.0, 10.0);

    let mut group = c.benchmark_group("engine");
    group.bench_function("preprocess", |b| b.iter(|| preprocess(black_box(&ctx))));
    group.bench_function("run", |b| {
        b.iter(|| engine.run(Some(&mut loaded), black_box(&ctx)))
    });
    group.finish();
}

criterion_group!(benches, bench_load, bench_forward, bench_run);
criterion_main!(benches);
