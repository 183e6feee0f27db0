// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the helpers they share.

pub mod benchmark;
pub mod inspect;
pub mod run;
pub mod status;

use anyhow::Context;
use runtime::{EngineConfig, FormatPolicy, SensorSource};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v` when set.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line values that feed into [`EngineConfig`].
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<PathBuf>,
    /// Force the built-in model even if a path is given.
    pub builtin: bool,
    pub budget: Option<String>,
    pub sensors: Option<String>,
    pub strict: bool,
}

/// Builds the effective configuration. A `--config` file is used as-is;
/// otherwise the defaults are patched with the command-line values.
pub fn resolve_config(path: Option<&Path>, flags: Overrides) -> anyhow::Result<EngineConfig> {
    if let Some(path) = path {
        let config = EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        tracing::debug!("using {}, command-line options ignored", path.display());
        return Ok(config);
    }

    let mut config = EngineConfig::default();
    config.model_path = if flags.builtin { None } else { flags.model };
    if let Some(budget) = flags.budget {
        config.memory_budget = budget;
    }
    if let Some(sensors) = flags.sensors {
        config.sensor_source = SensorSource::from_str_loose(&sensors).with_context(|| {
            format!("unknown sensor source '{sensors}' (expected simulated or host)")
        })?;
    }
    if flags.strict {
        config.format_policy = FormatPolicy::Strict;
    }
    config.parse_budget().context("invalid --budget")?;
    Ok(config)
}

pub fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║ {:^52} ║", title);
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}

/// Creates a visual usage bar (0.0-1.0 scale).
pub fn usage_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * 20.0).round() as usize;
    let symbol = if ratio >= 0.9 {
        "#"
    } else if ratio >= 0.7 {
        "="
    } else {
        "-"
    };
    format!("[{}{}]", symbol.repeat(filled), ".".repeat(20 - filled))
}
