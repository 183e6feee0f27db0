// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The runtime model: an ordered chain of dense layers plus the three
//! working buffers the forward pass needs.
//!
//! # Lifecycle
//!
//! ```text
//! RuntimeModel::new()          empty, not loaded
//!       │  push_layer() × N    capacity + chain checks
//!       ▼
//!   allocate_buffers(pool)     input, output, scratch (2 × widest)
//!       │  (weights filled in by the caller)
//!       ▼
//!   mark_loaded()              loaded = true
//!       │
//!       │  unload()
//!       ▼
//!   empty, not loaded          every buffer returned to the pool
//! ```
//!
//! # Scratch layout
//!
//! `scratch` holds `2 × widest_output` elements. [`Workspace`] splits it in
//! half: even layers write the front half (`ping`), odd layers write the
//! back half (`pong`), so a layer never reads the region it writes.

use crate::{LayerDescriptor, ModelError};
use memory_manager::{BufferGuard, MemoryPool};

/// Maximum number of layers in a model.
pub const MAX_LAYERS: usize = 16;

/// Maximum number of elements along any single layer dimension.
pub const MAX_TENSOR_SIZE: usize = 1024;

/// A dense network ready for (or in the middle of) construction.
#[derive(Debug, Default)]
pub struct RuntimeModel {
    layers: Vec<LayerDescriptor>,
    input: Option<BufferGuard<f32>>,
    output: Option<BufferGuard<f32>>,
    scratch: Option<BufferGuard<f32>>,
    loaded: bool,
    last_inference_time: u32,
}

/// Borrowed view of a loaded model's layers and buffers.
///
/// Produced by [`RuntimeModel::workspace`]; the layers are read-only while
/// the three buffers are writable.
pub struct Workspace<'a> {
    pub layers: &'a [LayerDescriptor],
    pub input: &'a mut [f32],
    pub output: &'a mut [f32],
    pub ping: &'a mut [f32],
    pub pong: &'a mut [f32],
}

impl RuntimeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer to the chain.
    ///
    /// # Errors
    /// - [`ModelError::CapacityExceeded`] once [`MAX_LAYERS`] layers are present.
    /// - [`ModelError::ChainMismatch`] if `layer.input_size()` differs from
    ///   the previous layer's output size.
    /// - [`ModelError::InvalidLayer`] if the buffers are already allocated.
    pub fn push_layer(&mut self, layer: LayerDescriptor) -> Result<(), ModelError> {
        let index = self.layers.len();
        if self.input.is_some() {
            return Err(ModelError::InvalidLayer {
                index,
                detail: "buffers already allocated; the layer chain is frozen".to_string(),
            });
        }
        if index >= MAX_LAYERS {
            return Err(ModelError::CapacityExceeded {
                what: "layers",
                limit: MAX_LAYERS,
                requested: index + 1,
            });
        }
        if let Some(prev) = self.layers.last() {
            if prev.output_size() != layer.input_size() {
                return Err(ModelError::ChainMismatch {
                    index,
                    expected: prev.output_size(),
                    actual: layer.input_size(),
                });
            }
        }
        tracing::debug!("model: layer {index} = {}", layer.spec());
        self.layers.push(layer);
        Ok(())
    }

    /// Allocates `input`, `output` and `scratch` from `pool`.
    ///
    /// On failure nothing allocated by this call survives.
    pub fn allocate_buffers(&mut self, pool: &MemoryPool) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::InvalidLayer {
                index: 0,
                detail: "model has no layers".to_string(),
            });
        }
        let input = pool.allocate::<f32>(self.input_size())?;
        let output = pool.allocate::<f32>(self.output_size())?;
        let scratch = pool.allocate::<f32>(2 * self.widest_output())?;

        self.input = Some(input);
        self.output = Some(output);
        self.scratch = Some(scratch);
        Ok(())
    }

    /// Flags the model as ready for inference.
    pub fn mark_loaded(&mut self) -> Result<(), ModelError> {
        if !self.has_buffers() {
            return Err(ModelError::BuffersMissing);
        }
        self.loaded = true;
        Ok(())
    }

    /// Drops every layer and buffer and returns to the empty state.
    /// Calling it on an empty model is a no-op.
    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_buffers(&self) -> bool {
        self.input.is_some() && self.output.is_some() && self.scratch.is_some()
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [LayerDescriptor] {
        &mut self.layers
    }

    /// Input width of the first layer, or 0 for an empty model.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, LayerDescriptor::input_size)
    }

    /// Output width of the last layer, or 0 for an empty model.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, LayerDescriptor::output_size)
    }

    /// Largest `output_size` across all layers.
    pub fn widest_output(&self) -> usize {
        self.layers
            .iter()
            .map(LayerDescriptor::output_size)
            .max()
            .unwrap_or(0)
    }

    /// Total weights plus biases.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(LayerDescriptor::parameter_count).sum()
    }

    /// Bytes held from the pool by layers and buffers.
    pub fn size_bytes(&self) -> usize {
        let layers: usize = self.layers.iter().map(LayerDescriptor::size_bytes).sum();
        let buffers: usize = [&self.input, &self.output, &self.scratch]
            .into_iter()
            .flatten()
            .map(BufferGuard::size_bytes)
            .sum();
        layers + buffers
    }

    /// Returns `true` if every adjacent pair of layers agrees on width.
    pub fn chain_is_consistent(&self) -> bool {
        self.layers
            .windows(2)
            .all(|pair| pair[0].output_size() == pair[1].input_size())
    }

    pub fn last_inference_time(&self) -> u32 {
        self.last_inference_time
    }

    pub fn set_last_inference_time(&mut self, ticks: u32) {
        self.last_inference_time = ticks;
    }

    /// The final output vector from the most recent forward pass.
    pub fn output(&self) -> Option<&[f32]> {
        self.output.as_deref()
    }

    /// Splits the model into its layers and writable buffers.
    ///
    /// Returns `None` unless the buffers are allocated.
    pub fn workspace(&mut self) -> Option<Workspace<'_>> {
        let half = self.widest_output();
        let input = self.input.as_deref_mut()?;
        let output = self.output.as_deref_mut()?;
        let scratch = self.scratch.as_deref_mut()?;
        let (ping, pong) = scratch.split_at_mut(half);
        Some(Workspace {
            layers: &self.layers,
            input,
            output,
            ping,
            pong,
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "{} layers, {} → {}, {} params, {:.2} KB, {}",
            self.num_layers(),
            self.input_size(),
            self.output_size(),
            self.parameter_count(),
            self.size_bytes() as f64 / 1024.0,
            if self.loaded { "loaded" } else { "not loaded" },
        )
    }
}
