// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

/// Errors that can occur during tensor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// A slice argument does not have the length the operation requires.
    #[error("length mismatch in {op} ({operand}): expected {expected} elements, got {actual}")]
    LengthMismatch {
        op: &'static str,
        operand: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The operation needs at least one element.
    #[error("empty input to {op}")]
    EmptyInput { op: &'static str },
}
