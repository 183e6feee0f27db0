// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The inference engine: sensor context in, [`Decision`] out.
//!
//! ```text
//! SensorContext ──► preprocess ──► input ──► L0 ──► ping ──► L1 ──► pong ──► L2 ──► ping
//!                                                                                   │
//!                         Decision ◄── argmax ◄── output ◄──────────────────────────┘
//! ```
//!
//! Even layers write the `ping` half of the scratch buffer and odd layers
//! write `pong`, so a layer never reads the region it is writing. Nothing
//! on this path allocates.

use crate::{Decision, InferenceStats, LoadedModel};
use model_ir::{ModelError, RuntimeModel, Workspace};
use sensor_monitor::{SensorContext, TickSource};
use std::time::Instant;
use tensor_core::{argmax, TensorError};

/// Number of features [`preprocess`] produces.
pub const FEATURE_COUNT: usize = 4;

/// Normalises a sensor context into the network's input features:
/// `[|accel| / 20, hour / 24, cpu% / 100, touch / 100]`. Values are not
/// clamped.
///
/// ```
/// use sensor_monitor::SensorContext;
///
/// let ctx = SensorContext::from_values([0.0, 9.8, 0.0], 12.0, 50.0, 0.0);
/// let f = runtime::preprocess(&ctx);
/// assert!((f[0] - 0.49).abs() < 1e-6);
/// assert_eq!(f[1], 0.5);
/// ```
pub fn preprocess(context: &SensorContext) -> [f32; FEATURE_COUNT] {
    let [ax, ay, az] = context.acceleration();
    let magnitude = (ax * ax + ay * ay + az * az).sqrt();
    [
        magnitude / 20.0,
        context.hour() / 24.0,
        context.cpu_percent() / 100.0,
        context.touch_pressure() / 100.0,
    ]
}

fn region<'b>(buf: &'b [f32], len: usize, operand: &'static str) -> Result<&'b [f32], TensorError> {
    buf.get(..len).ok_or(TensorError::LengthMismatch {
        op: "forward",
        operand,
        expected: len,
        actual: buf.len(),
    })
}

fn region_mut<'b>(
    buf: &'b mut [f32],
    len: usize,
    operand: &'static str,
) -> Result<&'b mut [f32], TensorError> {
    let actual = buf.len();
    buf.get_mut(..len).ok_or(TensorError::LengthMismatch {
        op: "forward",
        operand,
        expected: len,
        actual,
    })
}

/// Runs every layer of `model` over `features` and returns the output
/// vector.
///
/// # Errors
/// - [`ModelError::BuffersMissing`] if the model has no runtime buffers.
/// - [`ModelError::Tensor`] if `features` does not match the input width.
pub fn forward<'m>(model: &'m mut RuntimeModel, features: &[f32]) -> Result<&'m [f32], ModelError> {
    let Workspace {
        layers,
        input,
        output,
        ping,
        pong,
    } = model.workspace().ok_or(ModelError::BuffersMissing)?;

    if features.len() != input.len() {
        return Err(TensorError::LengthMismatch {
            op: "forward",
            operand: "input",
            expected: input.len(),
            actual: features.len(),
        }
        .into());
    }
    input.copy_from_slice(features);

    let Some(last) = layers.last() else {
        return Err(ModelError::BuffersMissing);
    };

    for (i, layer) in layers.iter().enumerate() {
        let (n_in, n_out) = (layer.input_size(), layer.output_size());
        if i % 2 == 0 {
            let src = if i == 0 { &*input } else { region(pong, n_in, "pong")? };
            layer.forward(src, region_mut(ping, n_out, "ping")?)?;
        } else {
            layer.forward(region(ping, n_in, "ping")?, region_mut(pong, n_out, "pong")?)?;
        }
        tracing::trace!("layer {i}: {}", layer.spec());
    }

    let final_region = if layers.len() % 2 == 1 { &*ping } else { &*pong };
    output.copy_from_slice(region(final_region, last.output_size(), "output")?);

    model.output().ok_or(ModelError::BuffersMissing)
}

/// Executes forward passes and maps them to [`Decision`]s.
///
/// `T` stamps each pass onto the model's `last_inference_time`. Statistics
/// are kept only when enabled with [`with_stats`](Self::with_stats).
#[derive(Debug)]
pub struct InferenceEngine<T: TickSource> {
    ticks: T,
    stats: Option<InferenceStats>,
}

impl<T: TickSource> InferenceEngine<T> {
    pub fn new(ticks: T) -> Self {
        Self { ticks, stats: None }
    }

    /// Enables or disables statistics collection.
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.stats = enabled.then(InferenceStats::new);
        self
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn stats(&self) -> Option<&InferenceStats> {
        self.stats.as_ref()
    }

    pub fn reset_stats(&mut self) {
        if let Some(stats) = self.stats.as_mut() {
            stats.reset();
        }
    }

    /// Classifies `context` with `model`.
    ///
    /// Never fails: an absent or unloaded model yields [`Decision::None`]
    /// without touching any buffer, and a model that cannot be evaluated
    /// (width mismatch, missing buffers) logs a warning and yields `None`.
    pub fn run(&mut self, model: Option<&mut LoadedModel>, context: &SensorContext) -> Decision {
        let Some(loaded) = model.filter(|m| m.is_loaded()) else {
            tracing::debug!("inference skipped: no model loaded");
            self.record(Decision::None, None, self.ticks.monotonic_ticks());
            return Decision::None;
        };

        let features = preprocess(context);
        let runtime_model = loaded.model_mut();
        let started = Instant::now();
        let decision = match forward(runtime_model, &features) {
            Ok(out) => argmax(out).map_or(Decision::None, Decision::from_class_index),
            Err(e) => {
                tracing::warn!("inference failed, returning none: {e}");
                Decision::None
            }
        };
        let elapsed = started.elapsed();

        let tick = self.ticks.monotonic_ticks();
        runtime_model.set_last_inference_time(tick);
        tracing::debug!(
            "inference @ tick {tick}: features {features:?} -> {decision} ({:.1}us)",
            elapsed.as_secs_f64() * 1e6
        );
        self.record(decision, Some(elapsed), tick);
        decision
    }

    fn record(&mut self, decision: Decision, forward: Option<std::time::Duration>, tick: u32) {
        if let Some(stats) = self.stats.as_mut() {
            stats.record(decision, forward, tick);
        }
    }
}
