// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Holds the single resident model.

use crate::{
    Decision, EngineConfig, FsStorage, InferenceEngine, LoadError, LoadedModel, ModelLoader,
    ModelStorage,
};
use memory_manager::MemoryPool;
use sensor_monitor::{SensorContext, TickSource};

/// Owns a loader, a storage provider and at most one [`LoadedModel`].
///
/// Replacing a resident model is build-then-swap: the new model is loaded
/// in full first, and only then is the old one unloaded. A failed load
/// leaves the resident model exactly as it was. While a replacement is
/// being built both models are held from the pool, so the budget must fit
/// the old and new footprints together.
pub struct ModelRegistry {
    loader: ModelLoader,
    storage: Box<dyn ModelStorage>,
    slot: Option<LoadedModel>,
}

impl ModelRegistry {
    pub fn new(loader: ModelLoader, storage: impl ModelStorage + 'static) -> Self {
        Self {
            loader,
            storage: Box::new(storage),
            slot: None,
        }
    }

    /// A registry reading from the host filesystem with the configured
    /// budget and format policy.
    pub fn from_config(config: &EngineConfig) -> Result<Self, LoadError> {
        let pool = MemoryPool::new(config.parse_budget()?);
        let loader = ModelLoader::new(pool).with_policy(config.format_policy);
        Ok(Self::new(loader, FsStorage::new()))
    }

    /// Loads `path` and makes it the resident model.
    ///
    /// Peak pool usage during a replacement is the resident model's
    /// [`size_bytes`](LoadedModel::size_bytes) plus the new one's. Reloading
    /// the same file into a budget sized for a single copy fails with
    /// `OutOfMemory`; call [`unload`](Self::unload) first in that case.
    ///
    /// # Errors
    /// Any [`LoadError`] from [`ModelLoader::load`]. The previously
    /// resident model, if any, is kept on error.
    pub fn load(&mut self, path: &str) -> Result<&LoadedModel, LoadError> {
        let fresh = self.loader.load(&*self.storage, path)?;
        Ok(self.install(fresh))
    }

    /// Builds the compiled-in model and makes it resident, with the same
    /// build-then-swap rules as [`load`](Self::load).
    pub fn load_builtin(&mut self) -> Result<&LoadedModel, LoadError> {
        let fresh = self.loader.load_builtin()?;
        Ok(self.install(fresh))
    }

    /// Loads whatever `config` names: its `model_path` through
    /// [`load`](Self::load), or the built-in model when no path is set.
    pub fn load_configured(&mut self, config: &EngineConfig) -> Result<&LoadedModel, LoadError> {
        match config.model_key()? {
            Some(path) => self.load(path),
            None => self.load_builtin(),
        }
    }

    fn install(&mut self, fresh: LoadedModel) -> &LoadedModel {
        if let Some(mut previous) = self.slot.take() {
            tracing::info!("replacing resident model '{}'", previous.filename());
            previous.unload();
        }
        self.slot.insert(fresh)
    }

    /// Unloads and clears the resident model. Does nothing when empty.
    pub fn unload(&mut self) {
        if let Some(mut model) = self.slot.take() {
            model.unload();
        }
    }

    pub fn current(&self) -> Option<&LoadedModel> {
        self.slot.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut LoadedModel> {
        self.slot.as_mut()
    }

    /// The resident model, or `InvalidArgument` if none is loaded.
    pub fn require_current(&self) -> Result<&LoadedModel, LoadError> {
        self.slot
            .as_ref()
            .ok_or_else(|| LoadError::InvalidArgument("no model is loaded".to_string()))
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.as_ref().is_some_and(LoadedModel::is_loaded)
    }

    /// Runs `engine` against the resident model.
    pub fn run<T: TickSource>(
        &mut self,
        engine: &mut InferenceEngine<T>,
        context: &SensorContext,
    ) -> Decision {
        engine.run(self.slot.as_mut(), context)
    }

    pub fn loader(&self) -> &ModelLoader {
        &self.loader
    }

    pub fn pool(&self) -> &MemoryPool {
        self.loader.pool()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("loader", &self.loader)
            .field("resident", &self.slot.as_ref().map(LoadedModel::filename))
            .finish()
    }
}
