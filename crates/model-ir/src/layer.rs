// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dense layer definitions.
//!
//! A [`LayerSpec`] is the shape-only description of a layer (what a topology
//! table lists). A [`LayerDescriptor`] is the built layer: the same shape
//! plus weight and bias buffers drawn from a [`MemoryPool`], exclusively
//! owned and released when the descriptor is dropped.

use crate::{ModelError, MAX_TENSOR_SIZE};
use memory_manager::{BufferGuard, MemoryPool};
use tensor_core::{apply_activation, dense, Activation, TensorError};

/// Shape and activation of one dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    pub input_size: usize,
    pub output_size: usize,
    pub activation: Activation,
}

impl LayerSpec {
    pub const fn new(input_size: usize, output_size: usize, activation: Activation) -> Self {
        Self {
            input_size,
            output_size,
            activation,
        }
    }

    /// Number of weights plus biases.
    pub fn parameter_count(&self) -> usize {
        self.output_size * self.input_size + self.output_size
    }

    /// Checks both dimensions against `1..=MAX_TENSOR_SIZE`.
    ///
    /// `index` is only used for error reporting.
    pub fn validate(&self, index: usize) -> Result<(), ModelError> {
        for (name, value) in [("input_size", self.input_size), ("output_size", self.output_size)] {
            if value == 0 {
                return Err(ModelError::InvalidLayer {
                    index,
                    detail: format!("{name} must be positive"),
                });
            }
            if value > MAX_TENSOR_SIZE {
                return Err(ModelError::CapacityExceeded {
                    what: "tensor elements per dimension",
                    limit: MAX_TENSOR_SIZE,
                    requested: value,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}→{} {}", self.input_size, self.output_size, self.activation)
    }
}

/// A built dense layer: `out = activation(W · in + b)`.
///
/// `weights` is row-major, `output_size × input_size`; `biases` has
/// `output_size` entries. Both lengths are fixed at construction.
#[derive(Debug)]
pub struct LayerDescriptor {
    spec: LayerSpec,
    weights: BufferGuard<f32>,
    biases: BufferGuard<f32>,
}

impl LayerDescriptor {
    /// Allocates zeroed weight and bias storage for `spec`.
    ///
    /// Weights are allocated before biases. If the bias allocation fails the
    /// weight buffer is dropped on the way out, so the pool is left exactly
    /// as it was.
    pub fn allocate(pool: &MemoryPool, spec: LayerSpec, index: usize) -> Result<Self, ModelError> {
        spec.validate(index)?;
        let weights = pool.allocate::<f32>(spec.output_size * spec.input_size)?;
        let biases = pool.allocate::<f32>(spec.output_size)?;
        Ok(Self {
            spec,
            weights,
            biases,
        })
    }

    /// Builds a layer whose parameters are copies of `weights` and `biases`.
    ///
    /// Both slices must match `spec` exactly; a mismatch is reported as
    /// `InvalidLayer` before anything is allocated.
    pub fn with_params(
        pool: &MemoryPool,
        spec: LayerSpec,
        index: usize,
        weights: &[f32],
        biases: &[f32],
    ) -> Result<Self, ModelError> {
        spec.validate(index)?;
        if weights.len() != spec.output_size * spec.input_size || biases.len() != spec.output_size {
            return Err(ModelError::InvalidLayer {
                index,
                detail: format!(
                    "{} weights / {} biases given for {spec}",
                    weights.len(),
                    biases.len()
                ),
            });
        }
        let weights = pool.allocate_copy(weights)?;
        let biases = pool.allocate_copy(biases)?;
        Ok(Self {
            spec,
            weights,
            biases,
        })
    }

    pub fn spec(&self) -> LayerSpec {
        self.spec
    }

    pub fn input_size(&self) -> usize {
        self.spec.input_size
    }

    pub fn output_size(&self) -> usize {
        self.spec.output_size
    }

    pub fn activation(&self) -> Activation {
        self.spec.activation
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    pub fn biases(&self) -> &[f32] {
        &self.biases
    }

    pub fn biases_mut(&mut self) -> &mut [f32] {
        &mut self.biases
    }

    /// Mutable access to weights and biases at once.
    pub fn params_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.weights, &mut self.biases)
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// Bytes this layer holds from the pool.
    pub fn size_bytes(&self) -> usize {
        self.weights.size_bytes() + self.biases.size_bytes()
    }

    /// Evaluates the layer. `input` must hold `input_size` values and
    /// `output` must hold `output_size` values.
    pub fn forward(&self, input: &[f32], output: &mut [f32]) -> Result<(), TensorError> {
        dense(&self.weights, &self.biases, input, output)?;
        apply_activation(output, self.spec.activation);
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({} params, {:.2} KB)",
            self.spec,
            self.parameter_count(),
            self.size_bytes() as f64 / 1024.0,
        )
    }
}
