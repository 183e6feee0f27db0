// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ctx-infer run` command: load a model and classify sensor snapshots.
//!
//! ```text
//! ModelRegistry::load → (capture context → engine.run → print Decision) × N → unload
//! ```

use anyhow::Context;
use runtime::{EngineConfig, InferenceEngine, ModelRegistry};
use sensor_monitor::SensorContext;
use std::time::Duration;

pub async fn execute(config: EngineConfig, iterations: u32, interval_ms: u64) -> anyhow::Result<()> {
    super::banner("ctx-infer · Inference Runner");

    println!("  Config:");
    println!("   Model:    {}", config.model_label());
    println!("   Budget:   {}", config.memory_budget);
    println!("   Policy:   {:?}", config.format_policy);
    println!("   Sensors:  {:?}", config.sensor_source);
    println!("   Runs:     {iterations} every {interval_ms} ms");
    println!();

    // ── Load ───────────────────────────────────────────────────
    println!("  [1/2] Loading model...");
    let mut registry = ModelRegistry::from_config(&config)?;
    let loaded = registry
        .load_configured(&config)
        .with_context(|| format!("loading {}", config.model_label()))?;
    if let Some(meta) = loaded.metadata() {
        println!("        {}", meta.summary());
    }
    println!("        {}", loaded.model().summary());
    println!();

    // ── Inference loop ─────────────────────────────────────────
    println!("  [2/2] Running inference...");
    let mut engine = InferenceEngine::new(config.tick_source()?).with_stats(config.enable_stats);
    let mut sensors = config.sensor_source.provider();
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));

    for i in 0..iterations {
        if interval_ms > 0 {
            tokio::select! {
                _ = interval.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    println!("        interrupted after {i} runs");
                    break;
                }
            }
        }
        let context = SensorContext::capture(sensors.as_mut(), engine.ticks());
        let decision = registry.run(&mut engine, &context);
        println!(
            "   #{:<4} {:<9} {}",
            i + 1,
            decision.as_str(),
            decision.description()
        );
        tracing::debug!("context: {}", context.summary());
    }
    println!();

    // ── Results ────────────────────────────────────────────────
    if let Some(stats) = engine.stats() {
        println!("  Stats:");
        println!("   {}", stats.summary());
    }
    let pool = registry.pool();
    println!("  Pool:");
    println!(
        "   {} / {}  {}",
        pool.allocated_bytes(),
        pool.budget(),
        super::usage_bar(pool.allocated_bytes() as f64 / pool.budget().as_bytes().max(1) as f64),
    );
    println!("   {}", pool.stats().summary());

    registry.unload();
    println!();
    Ok(())
}
