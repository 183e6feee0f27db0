// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! Loads model files under a memory budget and classifies sensor contexts
//! with them.
//!
//! The runtime ties together:
//! - A [`ModelStorage`] byte source (host filesystem or in-memory).
//! - A `MemoryPool` from `memory-manager` that every buffer is drawn from.
//! - The `RuntimeModel` from `model-ir`, built here with the fixed
//!   4→8→6→4 demo topology and weights synthesized from the file bytes,
//!   or with the hand-tuned built-in weights when no file is given.
//! - A `SensorContext` from `sensor-monitor` that the [`InferenceEngine`]
//!   turns into a [`Decision`].
//!
//! ```text
//! ModelRegistry::load(path) ──► ModelLoader ──► LoadedModel (resident)
//!                                                    │
//! SensorContext ──► InferenceEngine::run ◄───────────┘
//!                           │
//!                           ▼
//!                       Decision
//! ```
//!
//! # Execution Model
//! Everything is synchronous and single-threaded. The registry is a plain
//! owned value, so exclusive access is the borrow checker's job. Allocation
//! failures release everything the failed call acquired.

mod builtin;
mod config;
mod decision;
mod engine;
mod error;
mod loaded;
mod loader;
mod metrics;
mod registry;
mod storage;
mod synth;

pub use builtin::BUILTIN_MODEL_NAME;
pub use config::{EngineConfig, FormatPolicy, SensorSource};
pub use decision::Decision;
pub use engine::{forward, preprocess, InferenceEngine, FEATURE_COUNT};
pub use error::LoadError;
pub use loaded::{LoadedModel, MAX_FILENAME_LEN};
pub use loader::{ModelLoader, DEMO_TOPOLOGY};
pub use metrics::InferenceStats;
pub use registry::ModelRegistry;
pub use storage::{FsStorage, MemoryStorage, ModelStorage};
pub use synth::{seed_from_bytes, synthesize_weights, Lcg, SEED_WINDOW};
