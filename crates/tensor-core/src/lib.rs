// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Small, allocation-free f32 kernels for the dense networks executed by the
//! `runtime` crate.
//!
//! This crate provides:
//! - [`Activation`]: the element-wise non-linearities a dense layer may use
//!   (linear, ReLU, sigmoid, tanh).
//! - [`dense`]: a row-major matrix-vector product with bias add.
//! - [`argmax`]: index of the largest element, ties resolved to the lowest index.
//!
//! # Design Goals
//! - Every operation writes into a caller-provided slice; nothing allocates.
//! - Shape problems surface as [`TensorError`], never as panics.
//! - Pure functions: no global state, so results depend on inputs alone.

mod activation;
mod error;
mod ops;

pub use activation::{relu, sigmoid, tanh, Activation, SIGMOID_SATURATION};
pub use error::TensorError;
pub use ops::{apply_activation, argmax, dense};
