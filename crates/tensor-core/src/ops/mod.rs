// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Slice-level operations used by the forward pass.
//!
//! Each operation works on pre-allocated output buffers to avoid heap
//! allocations in the inference hot path.

mod argmax_op;
mod dense_op;

pub use argmax_op::argmax;
pub use dense_op::{apply_activation, dense};
