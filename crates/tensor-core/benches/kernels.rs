// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the dense and activation kernels.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensor_core::{apply_activation, dense, Activation};

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense");
    for &(rows, cols) in &[(8usize, 4usize), (64, 64), (256, 256)] {
        let weights: Vec<f32> = (0..rows * cols).map(|i| (i % 17) as f32 * 0.01).collect();
        let biases = vec![0.1f32; rows];
        let input: Vec<f32> = (0..cols).map(|i| i as f32 * 0.1).collect();
        let mut output = vec![0.0f32; rows];
        group.bench_function(format!("{rows}x{cols}"), |b| {
            b.iter(|| {
                dense(
                    black_box(&weights),
                    black_box(&biases),
                    black_box(&input),
                    &mut output,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_activations(c: &mut Criterion) {
    let mut group = c.benchmark_group("activation");
    let source: Vec<f32> = (0..1024).map(|i| (i as f32 - 512.0) / 32.0).collect();
    for activation in [Activation::Relu, Activation::Sigmoid, Activation::Tanh] {
        let mut values = source.clone();
        group.bench_function(activation.as_str(), |b| {
            b.iter(|| {
                values.copy_from_slice(&source);
                apply_activation(black_box(&mut values), activation);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dense, bench_activations);
criterion_main!(benches);
