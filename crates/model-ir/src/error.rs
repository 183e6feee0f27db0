// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model construction.

use memory_manager::MemoryError;
use tensor_core::TensorError;

/// Errors raised while building or driving a [`RuntimeModel`](crate::RuntimeModel).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A layer definition is invalid (zero or oversized dimension, or the
    /// model is no longer accepting layers).
    #[error("invalid layer {index}: {detail}")]
    InvalidLayer { index: usize, detail: String },

    /// A layer's input width does not match the previous layer's output.
    #[error("layer {index} takes {actual} inputs but the previous layer produces {expected}")]
    ChainMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A fixed capacity limit was hit.
    #[error("capacity exceeded: {what} limited to {limit}, requested {requested}")]
    CapacityExceeded {
        what: &'static str,
        limit: usize,
        requested: usize,
    },

    /// An operation needs the runtime buffers, which are not allocated.
    #[error("model buffers are not allocated")]
    BuffersMissing,

    /// A kernel rejected its operands.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// The allocator refused a buffer.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
