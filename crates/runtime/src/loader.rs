// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Turns a byte source into a [`LoadedModel`].
//!
//! ```text
//! path ──► exists? ──► size > 0? ──► raw = pool.allocate(size) ──► storage.read
//!                                                                    │
//!          ┌─────────────────────────────────────────────────────────┘
//!          ▼
//!   sniff format ──► policy check ──► layers (4→8→6→4) ──► buffers
//!                                                          │
//!                          LoadedModel ◄── metadata ◄── synthesize weights
//! ```
//!
//! Every buffer is a [`BufferGuard`](memory_manager::BufferGuard), so an
//! early `?` return drops whatever was acquired and the pool is back to its
//! pre-call level.

use crate::builtin::{BUILTIN_MODEL_NAME, BUILTIN_PARAMS};
use crate::{synthesize_weights, FormatPolicy, LoadError, LoadedModel, ModelStorage};
use memory_manager::MemoryPool;
use model_ir::{Activation, LayerDescriptor, LayerSpec, ModelFormat, ModelMetadata, RuntimeModel};

/// The fixed network every load builds, whatever the source format.
pub const DEMO_TOPOLOGY: [LayerSpec; 3] = [
    LayerSpec::new(4, 8, Activation::Relu),
    LayerSpec::new(8, 6, Activation::Relu),
    LayerSpec::new(6, 4, Activation::Sigmoid),
];

/// Loads model files into pool-backed [`LoadedModel`]s.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    pool: MemoryPool,
    policy: FormatPolicy,
}

impl ModelLoader {
    pub fn new(pool: MemoryPool) -> Self {
        Self {
            pool,
            policy: FormatPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FormatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn pool(&self) -> &MemoryPool {
        &self.pool
    }

    pub fn policy(&self) -> FormatPolicy {
        self.policy
    }

    /// Loads `path` from `storage`.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty path.
    /// - `NotFound` / `Empty` / `ReadFailed` from the storage checks.
    /// - `UnsupportedFormat` for ONNX/TFLite under [`FormatPolicy::Strict`].
    /// - `OutOfMemory` if any allocation is refused.
    ///
    /// On error the pool holds exactly what it held before the call.
    pub fn load<S>(&self, storage: &S, path: &str) -> Result<LoadedModel, LoadError>
    where
        S: ModelStorage + ?Sized,
    {
        self.try_load(storage, path).map_err(|e| {
            tracing::warn!("load of '{path}' failed, nothing retained: {e}");
            e
        })
    }

    fn try_load<S>(&self, storage: &S, path: &str) -> Result<LoadedModel, LoadError>
    where
        S: ModelStorage + ?Sized,
    {
        if path.is_empty() {
            return Err(LoadError::InvalidArgument("empty model path".to_string()));
        }
        if !storage.exists(path) {
            return Err(LoadError::NotFound {
                path: path.to_string(),
            });
        }
        let size = storage.size(path);
        if size == 0 {
            return Err(LoadError::Empty {
                path: path.to_string(),
            });
        }

        let mut raw = self.pool.allocate::<u8>(size as usize)?;
        storage.read(path, &mut raw)?;

        let format = ModelFormat::sniff(&raw);
        if format.is_foreign() {
            match self.policy {
                FormatPolicy::Strict => return Err(LoadError::UnsupportedFormat { format }),
                FormatPolicy::Permissive => tracing::warn!(
                    "'{path}' looks like {format}; building the demo network instead"
                ),
            }
        }

        let mut model = self.build_demo_model()?;
        synthesize_weights(&mut model, &raw);
        model.mark_loaded()?;

        let metadata = ModelMetadata::describe(path, format, &model, size);
        tracing::info!(
            "loaded '{path}': {} [{}], pool {} / {}",
            model.summary(),
            format,
            self.pool.allocated_bytes(),
            self.pool.budget(),
        );
        Ok(LoadedModel::new(metadata, model, raw, path))
    }

    /// Builds the built-in context awareness model from its fixed weight
    /// tables. No storage is read and nothing is synthesized; the result has
    /// no raw bytes.
    ///
    /// # Errors
    /// `OutOfMemory` if any allocation is refused. On error the pool holds
    /// exactly what it held before the call.
    pub fn load_builtin(&self) -> Result<LoadedModel, LoadError> {
        self.try_load_builtin().map_err(|e| {
            tracing::warn!("built-in model could not be built: {e}");
            e
        })
    }

    fn try_load_builtin(&self) -> Result<LoadedModel, LoadError> {
        let mut model = RuntimeModel::new();
        let tables = DEMO_TOPOLOGY.into_iter().zip(BUILTIN_PARAMS);
        for (index, (spec, (weights, biases))) in tables.enumerate() {
            let layer = LayerDescriptor::with_params(&self.pool, spec, index, weights, biases)?;
            model.push_layer(layer)?;
        }
        model.allocate_buffers(&self.pool)?;
        model.mark_loaded()?;

        let metadata = ModelMetadata::describe(BUILTIN_MODEL_NAME, ModelFormat::Custom, &model, 0);
        tracing::info!(
            "loaded built-in '{BUILTIN_MODEL_NAME}': {}, pool {} / {}",
            model.summary(),
            self.pool.allocated_bytes(),
            self.pool.budget(),
        );
        Ok(LoadedModel::builtin(metadata, model, BUILTIN_MODEL_NAME))
    }

    /// Allocates the [`DEMO_TOPOLOGY`] layers and the runtime buffers, with
    /// zeroed parameters.
    pub fn build_demo_model(&self) -> Result<RuntimeModel, LoadError> {
        let mut model = RuntimeModel::new();
        for (index, spec) in DEMO_TOPOLOGY.into_iter().enumerate() {
            let layer = LayerDescriptor::allocate(&self.pool, spec, index)?;
            model.push_layer(layer)?;
        }
        model.allocate_buffers(&self.pool)?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use memory_manager::MemoryBudget;

    fn loader() -> ModelLoader {
        ModelLoader::new(MemoryPool::default())
    }

    #[test]
    fn test_load_custom() {
        let storage = MemoryStorage::new().with_file("m.bin", vec![1u8; 6]);
        let loader = loader();
        let loaded = loader.load(&storage, "m.bin").unwrap();

        assert!(loaded.is_loaded());
        assert_eq!(loaded.filename(), "m.bin");
        assert_eq!(loaded.raw_bytes(), Some(&[1u8; 6][..]));

        let meta = loaded.metadata().unwrap();
        assert_eq!(meta.format, ModelFormat::Custom);
        assert_eq!(meta.model_size, 6);
        assert_eq!(meta.total_weights, 122);
        assert_eq!(loaded.size_bytes(), loader.pool().allocated_bytes());
    }

    #[test]
    fn test_empty_path() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            loader().load(&storage, ""),
            Err(LoadError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_strict_rejects_foreign() {
        let storage = MemoryStorage::new().with_file("m.tflite", b"TFL3rest".to_vec());
        let loader = loader().with_policy(FormatPolicy::Strict);
        let err = loader.load(&storage, "m.tflite").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { format: ModelFormat::Tflite }));
        assert_eq!(loader.pool().allocated_bytes(), 0);
    }

    #[test]
    fn test_strict_accepts_custom() {
        let storage = MemoryStorage::new().with_file("m.bin", b"CTX1".to_vec());
        let loader = loader().with_policy(FormatPolicy::Strict);
        assert!(loader.load(&storage, "m.bin").is_ok());
    }

    #[test]
    fn test_permissive_flags_informational() {
        let storage = MemoryStorage::new().with_file("m.onnx", 0x0892_A9FFu32.to_le_bytes().to_vec());
        let loaded = loader().load(&storage, "m.onnx").unwrap();
        let meta = loaded.metadata().unwrap();
        assert_eq!(meta.format, ModelFormat::Onnx);
        assert!(meta.format_is_informational);
    }

    #[test]
    fn test_raw_image_exceeds_budget() {
        let storage = MemoryStorage::new().with_file("big.bin", vec![0u8; 4096]);
        let loader = ModelLoader::new(MemoryPool::new(MemoryBudget::from_bytes(1024)));
        assert!(matches!(
            loader.load(&storage, "big.bin"),
            Err(LoadError::OutOfMemory(_))
        ));
        assert_eq!(loader.pool().allocated_bytes(), 0);
    }

    #[test]
    fn test_load_builtin() {
        let loader = loader();
        let loaded = loader.load_builtin().unwrap();

        assert!(loaded.is_loaded());
        assert!(loaded.is_builtin());
        assert_eq!(loaded.raw_bytes(), None);
        assert_eq!(loaded.filename(), BUILTIN_MODEL_NAME);
        assert_eq!(loaded.model().layers()[0].weights()[..4], [0.2f32, 0.5, 0.1, 0.8]);
        assert_eq!(loaded.model().layers()[2].biases(), &[0.1, 0.3, 0.2, 0.4]);

        let meta = loaded.metadata().unwrap();
        assert_eq!(meta.name, BUILTIN_MODEL_NAME);
        assert_eq!(meta.model_size, 0);
        assert_eq!(meta.total_weights, 122);
        assert_eq!(loaded.size_bytes(), loader.pool().allocated_bytes());
    }

    #[test]
    fn test_load_builtin_rolls_back() {
        let loader = loader();
        // 6 parameter buffers + 3 runtime buffers.
        for k in 0..9 {
            loader.pool().fail_after(k);
            assert!(matches!(loader.load_builtin(), Err(LoadError::OutOfMemory(_))));
            assert_eq!(loader.pool().allocated_bytes(), 0, "k={k}");
        }
        loader.pool().clear_injected_failure();
    }

    #[test]
    fn test_build_demo_model_shape() {
        let model = loader().build_demo_model().unwrap();
        let specs: Vec<_> = model.layers().iter().map(|l| l.spec()).collect();
        assert_eq!(specs, DEMO_TOPOLOGY);
        assert!(model.has_buffers());
        assert!(!model.is_loaded());
    }
}
