// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Deterministic weight synthesis.
//!
//! The demo network's parameters are derived from the source bytes so that
//! different files give different (but reproducible) networks:
//!
//! 1. `seed` = wrapping `u32` sum of the first `min(len, 64)` bytes.
//! 2. LCG: `state = state * 1103515245 + 12345 (mod 2^32)`, draw `state >> 16`.
//! 3. Per layer, in order: every weight `(draw % 4000 - 2000) / 1000`, then
//!    every bias `(draw % 2000 - 1000) / 1000`.
//!
//! Weights therefore lie in `[-2.0, 1.999]` and biases in `[-1.0, 0.999]`.

use model_ir::RuntimeModel;

/// Number of leading bytes that contribute to the seed.
pub const SEED_WINDOW: usize = 64;

/// Wrapping sum of the first [`SEED_WINDOW`] bytes.
///
/// ```
/// assert_eq!(runtime::seed_from_bytes(&[1; 6]), 6);
/// assert_eq!(runtime::seed_from_bytes(&[1; 100]), 64);
/// ```
pub fn seed_from_bytes(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(SEED_WINDOW)
        .fold(0u32, |acc, &b| acc.wrapping_add(u32::from(b)))
}

/// The 32-bit linear congruential generator used for synthesis.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub const MULTIPLIER: u32 = 1_103_515_245;
    pub const INCREMENT: u32 = 12_345;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns its upper 16 bits.
    pub fn next_draw(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state >> 16
    }

    /// A weight in `[-2.0, 1.999]`.
    pub fn next_weight(&mut self) -> f32 {
        ((self.next_draw() % 4000) as i32 - 2000) as f32 / 1000.0
    }

    /// A bias in `[-1.0, 0.999]`.
    pub fn next_bias(&mut self) -> f32 {
        ((self.next_draw() % 2000) as i32 - 1000) as f32 / 1000.0
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Overwrites every weight and bias of `model` from a generator seeded by
/// `source`. Calling it twice with the same bytes yields identical values.
pub fn synthesize_weights(model: &mut RuntimeModel, source: &[u8]) {
    let seed = seed_from_bytes(source);
    let mut rng = Lcg::new(seed);
    for layer in model.layers_mut() {
        let (weights, biases) = layer.params_mut();
        weights.iter_mut().for_each(|w| *w = rng.next_weight());
        biases.iter_mut().for_each(|b| *b = rng.next_bias());
    }
    tracing::debug!("synth: seed {seed}, {} parameters", model.parameter_count());
}
