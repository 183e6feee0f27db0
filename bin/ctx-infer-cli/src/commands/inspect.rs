// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ctx-infer inspect` command: show what a model file (or the built-in
//! model) loads as.

use anyhow::Context;
use model_ir::{LayerSpec, ModelMetadata};
use runtime::{EngineConfig, ModelRegistry};

#[derive(serde::Serialize)]
struct Report<'a> {
    metadata: Option<&'a ModelMetadata>,
    builtin: bool,
    layers: Vec<LayerSpec>,
    parameters: usize,
    model_bytes: usize,
    pool_bytes: usize,
    budget_bytes: usize,
}

pub async fn execute(config: EngineConfig, json: bool) -> anyhow::Result<()> {
    let mut registry = ModelRegistry::from_config(&config)?;
    let budget = registry.pool().budget();
    let report = {
        let loaded = registry
            .load_configured(&config)
            .with_context(|| format!("loading {}", config.model_label()))?;
        Report {
            metadata: loaded.metadata(),
            builtin: loaded.is_builtin(),
            layers: loaded.model().layers().iter().map(|l| l.spec()).collect(),
            parameters: loaded.model().parameter_count(),
            model_bytes: loaded.model().size_bytes(),
            pool_bytes: loaded.size_bytes(),
            budget_bytes: budget.as_bytes(),
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    super::banner("ctx-infer · Model Inspector");

    if let Some(meta) = report.metadata {
        println!("  Metadata");
        println!("   Name:         {}", meta.name);
        println!(
            "   Format:       {}{}",
            meta.format,
            if report.builtin {
                " (built-in weights)"
            } else if meta.format_is_informational {
                " (tag only, demo network built)"
            } else {
                ""
            }
        );
        println!("   Version:      {}", meta.version);
        println!("   Source size:  {} bytes", meta.model_size);
        println!(
            "   Layers:       {} in, {} hidden, {} out",
            meta.input_layers, meta.intermediate_layers, meta.output_layers
        );
        println!();
    }

    println!("  Layers");
    println!("   {:<4} {:<14} {:>8}", "#", "shape", "params");
    for (i, spec) in report.layers.iter().enumerate() {
        println!("   {:<4} {:<14} {:>8}", i, spec.to_string(), spec.parameter_count());
    }
    println!("   {:<4} {:<14} {:>8}", "", "total", report.parameters);
    println!();

    println!("  Memory");
    println!("   Model:        {:.2} KB", report.model_bytes as f64 / 1024.0);
    println!(
        "   Pool:         {:.2} KB of {budget}  {}",
        report.pool_bytes as f64 / 1024.0,
        super::usage_bar(report.pool_bytes as f64 / report.budget_bytes.max(1) as f64),
    );
    println!();
    Ok(())
}
