// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ctx-infer benchmark` command: time loading and inference.
//!
//! Contexts come from the seeded simulator so that two runs over the same
//! model see the same inputs.

use anyhow::Context;
use runtime::{Decision, EngineConfig, InferenceEngine, ModelRegistry};
use sensor_monitor::{ManualTicks, SensorContext, SimulatedSensors};
use std::time::{Duration, Instant};

const LOAD_ROUNDS: u32 = 20;

pub async fn execute(config: EngineConfig, iterations: u32) -> anyhow::Result<()> {
    super::banner("ctx-infer · Benchmark");

    let mut registry = ModelRegistry::from_config(&config)?;

    // ── Load ───────────────────────────────────────────────────
    let mut load_total = Duration::ZERO;
    for _ in 0..LOAD_ROUNDS {
        let started = Instant::now();
        registry
            .load_configured(&config)
            .with_context(|| format!("loading {}", config.model_label()))?;
        load_total += started.elapsed();
    }
    let peak = registry.pool().stats().peak_allocated_bytes;
    println!("  Load");
    println!(
        "   {LOAD_ROUNDS} loads, mean {:.1} us, peak pool {:.2} KB",
        load_total.as_secs_f64() * 1e6 / f64::from(LOAD_ROUNDS),
        peak as f64 / 1024.0
    );
    println!();

    // ── Inference ──────────────────────────────────────────────
    let ticks = ManualTicks::new(0);
    let mut sensors = SimulatedSensors::new();
    let contexts: Vec<SensorContext> = (0..iterations.max(1))
        .map(|_| {
            ticks.advance(1);
            SensorContext::capture(&mut sensors, &ticks)
        })
        .collect();

    let mut engine = InferenceEngine::new(&ticks).with_stats(true);
    let started = Instant::now();
    for context in &contexts {
        registry.run(&mut engine, context);
    }
    let elapsed = started.elapsed();

    println!("  Inference");
    println!(
        "   {} runs in {:.2} ms ({:.0} inferences/s)",
        contexts.len(),
        elapsed.as_secs_f64() * 1e3,
        contexts.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    if let Some(stats) = engine.stats() {
        println!("   {}", stats.summary());
        println!();
        println!("  Decisions");
        for decision in Decision::CLASSES {
            let count = stats.count(decision);
            let ratio = count as f64 / stats.runs.max(1) as f64;
            println!(
                "   {:<9} {:>7}  {}",
                decision.as_str(),
                count,
                super::usage_bar(ratio)
            );
        }
    }
    println!();

    registry.unload();
    Ok(())
}
