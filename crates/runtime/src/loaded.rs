// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A model produced by the loader, together with everything it owns.

use memory_manager::BufferGuard;
use model_ir::{ModelMetadata, RuntimeModel};

/// Longest file name kept in [`LoadedModel::filename`], in characters.
pub const MAX_FILENAME_LEN: usize = 255;

/// Metadata, runtime model and the raw source bytes of one load.
///
/// Created only by [`ModelLoader::load`](crate::ModelLoader::load) or
/// [`ModelLoader::load_builtin`](crate::ModelLoader::load_builtin). A file
/// model is loaded exactly when the raw bytes are held and the runtime
/// model is marked loaded; [`unload`](Self::unload) releases everything.
#[derive(Debug)]
pub struct LoadedModel {
    metadata: Option<ModelMetadata>,
    model: RuntimeModel,
    raw: Option<BufferGuard<u8>>,
    filename: String,
    builtin: bool,
}

impl LoadedModel {
    pub(crate) fn new(
        metadata: ModelMetadata,
        model: RuntimeModel,
        raw: BufferGuard<u8>,
        filename: &str,
    ) -> Self {
        Self {
            metadata: Some(metadata),
            model,
            raw: Some(raw),
            filename: filename.chars().take(MAX_FILENAME_LEN).collect(),
            builtin: false,
        }
    }

    /// A model built from compiled-in parameters, with no source bytes.
    pub(crate) fn builtin(metadata: ModelMetadata, model: RuntimeModel, name: &str) -> Self {
        Self {
            metadata: Some(metadata),
            model,
            raw: None,
            filename: name.chars().take(MAX_FILENAME_LEN).collect(),
            builtin: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        (self.raw.is_some() || self.builtin) && self.model.is_loaded()
    }

    /// `true` for the compiled-in model from
    /// [`ModelLoader::load_builtin`](crate::ModelLoader::load_builtin).
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// `None` once unloaded.
    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }

    pub fn model(&self) -> &RuntimeModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut RuntimeModel {
        &mut self.model
    }

    /// The source file contents as read at load time. Always `None` for the
    /// built-in model.
    pub fn raw_bytes(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Bytes held from the pool, raw image included.
    pub fn size_bytes(&self) -> usize {
        self.model.size_bytes() + self.raw.as_ref().map_or(0, BufferGuard::size_bytes)
    }

    /// Releases every layer, buffer and the raw bytes, and resets to the
    /// empty state. Unloading an already-empty model does nothing.
    pub fn unload(&mut self) {
        if self.raw.is_none() && self.model.num_layers() == 0 {
            return;
        }
        tracing::info!("unloading model '{}' ({} bytes)", self.filename, self.size_bytes());
        self.model.unload();
        self.raw = None;
        self.metadata = None;
        self.filename.clear();
        self.builtin = false;
    }
}
