// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-ir
//!
//! In-memory representation of a small fixed-topology dense network.
//!
//! - [`LayerSpec`]: the shape and activation of one layer.
//! - [`LayerDescriptor`]: a built layer owning its weight and bias buffers.
//! - [`RuntimeModel`]: an ordered layer chain plus the `input`, `output` and
//!   `scratch` buffers, guarded by [`MAX_LAYERS`] and [`MAX_TENSOR_SIZE`].
//! - [`ModelFormat`] / [`ModelMetadata`]: magic-byte sniffing and the
//!   descriptive record shown to users.
//!
//! All storage comes from a [`memory_manager::MemoryPool`]; dropping a model
//! returns every byte to it.
//!
//! # Example
//! ```
//! use memory_manager::MemoryPool;
//! use model_ir::{LayerDescriptor, LayerSpec, RuntimeModel};
//! use tensor_core::Activation;
//!
//! let pool = MemoryPool::default();
//! let mut model = RuntimeModel::new();
//! model.push_layer(LayerDescriptor::allocate(&pool, LayerSpec::new(4, 8, Activation::Relu), 0).unwrap()).unwrap();
//! model.push_layer(LayerDescriptor::allocate(&pool, LayerSpec::new(8, 4, Activation::Sigmoid), 1).unwrap()).unwrap();
//! model.allocate_buffers(&pool).unwrap();
//! model.mark_loaded().unwrap();
//! println!("{}", model.summary());
//! ```

mod error;
mod layer;
mod metadata;
mod model;

pub use error::ModelError;
pub use layer::{LayerDescriptor, LayerSpec};
pub use metadata::{ModelFormat, ModelMetadata, MAX_NAME_LEN, ONNX_MAGIC, TFLITE_MAGIC};
pub use model::{RuntimeModel, Workspace, MAX_LAYERS, MAX_TENSOR_SIZE};
pub use tensor_core::Activation;
