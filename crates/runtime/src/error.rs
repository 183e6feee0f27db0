// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading and registry operations.

use memory_manager::MemoryError;
use model_ir::{ModelError, ModelFormat};

/// Errors that can occur while loading, unloading or configuring a model.
///
/// Inference itself never fails; see [`InferenceEngine::run`](crate::InferenceEngine::run).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The storage provider has no file at this path.
    #[error("model file not found: {path}")]
    NotFound { path: String },

    /// The file exists but has zero length.
    #[error("model file is empty: {path}")]
    Empty { path: String },

    /// The allocator refused a buffer. Everything acquired by the failed
    /// call has already been released.
    #[error("out of memory while loading model: {0}")]
    OutOfMemory(#[source] MemoryError),

    /// A caller-supplied argument is unusable (empty path, no resident model).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The detected format has no decoder and the format policy is strict.
    #[error("unsupported model format {format} (strict format policy)")]
    UnsupportedFormat { format: ModelFormat },

    /// The storage provider failed while reading the file.
    #[error("failed to read {path}: {detail}")]
    ReadFailed { path: String, detail: String },

    /// Model construction failed for a reason other than memory.
    #[error("model construction failed: {0}")]
    Model(#[source] ModelError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<MemoryError> for LoadError {
    fn from(e: MemoryError) -> Self {
        match e {
            MemoryError::InvalidBudget { .. } => Self::Config(e.to_string()),
            other => Self::OutOfMemory(other),
        }
    }
}

impl From<ModelError> for LoadError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Memory(mem) => Self::from(mem),
            other => Self::Model(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_error_maps_to_oom() {
        let oom = MemoryError::OutOfMemory {
            requested_bytes: 8,
            available_bytes: 0,
            budget_bytes: 8,
        };
        assert!(matches!(LoadError::from(oom.clone()), LoadError::OutOfMemory(_)));
        assert!(matches!(
            LoadError::from(ModelError::Memory(oom)),
            LoadError::OutOfMemory(_)
        ));
    }

    #[test]
    fn test_budget_error_maps_to_config() {
        let e = MemoryError::InvalidBudget {
            input: "x".into(),
            detail: "bad".into(),
        };
        assert!(matches!(LoadError::from(e), LoadError::Config(_)));
    }

    #[test]
    fn test_display() {
        let e = LoadError::UnsupportedFormat {
            format: ModelFormat::Onnx,
        };
        assert_eq!(e.to_string(), "unsupported model format ONNX (strict format policy)");
    }
}
