// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The hand-tuned context awareness network shipped with the runtime.
//!
//! Same [`DEMO_TOPOLOGY`] as a file load, but the parameters come from the
//! fixed tables below instead of being synthesized from source bytes.
//! Inputs are the four [`preprocess`](crate::preprocess) features; outputs
//! are the idle / working / gaming / sleeping scores.

use crate::DEMO_TOPOLOGY;

/// Name reported for the built-in model.
pub const BUILTIN_MODEL_NAME: &str = "Context Awareness Demo";

#[rustfmt::skip]
const LAYER1_WEIGHTS: [f32; 32] = [
    0.2, 0.5, 0.1, 0.8,
    0.3, 0.4, 0.2, 0.6,
    0.1, 0.7, 0.5, 0.3,
    0.6, 0.2, 0.8, 0.1,
    0.4, 0.3, 0.6, 0.5,
    0.7, 0.8, 0.2, 0.4,
    0.5, 0.1, 0.9, 0.7,
    0.8, 0.6, 0.3, 0.2,
];
const LAYER1_BIASES: [f32; 8] = [0.1, 0.2, 0.1, 0.3, 0.2, 0.4, 0.3, 0.1];

#[rustfmt::skip]
const LAYER2_WEIGHTS: [f32; 48] = [
    0.4, 0.6, 0.2, 0.8, 0.5, 0.3, 0.7, 0.1,
    0.3, 0.7, 0.4, 0.2, 0.9, 0.6, 0.1, 0.8,
    0.6, 0.2, 0.8, 0.4, 0.3, 0.7, 0.5, 0.9,
    0.1, 0.9, 0.3, 0.7, 0.4, 0.8, 0.2, 0.6,
    0.8, 0.4, 0.6, 0.1, 0.9, 0.2, 0.7, 0.3,
    0.7, 0.3, 0.9, 0.5, 0.1, 0.8, 0.4, 0.6,
];
const LAYER2_BIASES: [f32; 6] = [0.2, 0.1, 0.3, 0.4, 0.2, 0.1];

// Rows: idle, working, gaming, sleeping.
#[rustfmt::skip]
const LAYER3_WEIGHTS: [f32; 24] = [
    0.6, 0.8, 0.3, 0.9, 0.4, 0.7,
    0.7, 0.2, 0.9, 0.5, 0.8, 0.1,
    0.3, 0.9, 0.4, 0.7, 0.2, 0.8,
    0.8, 0.1, 0.6, 0.2, 0.9, 0.3,
];
const LAYER3_BIASES: [f32; 4] = [0.1, 0.3, 0.2, 0.4];

/// `(weights, biases)` per layer, in [`DEMO_TOPOLOGY`] order.
pub(crate) const BUILTIN_PARAMS: [(&[f32], &[f32]); DEMO_TOPOLOGY.len()] = [
    (&LAYER1_WEIGHTS, &LAYER1_BIASES),
    (&LAYER2_WEIGHTS, &LAYER2_BIASES),
    (&LAYER3_WEIGHTS, &LAYER3_BIASES),
];
