// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # ctx-infer
//!
//! Command-line interface for the context-aware inference runtime.
//!
//! ## Usage
//! ```bash
//! # Classify ten simulated sensor snapshots, one every 500 ms
//! ctx-infer run --model ./models/context.bin --iterations 10 --interval-ms 500
//!
//! # Same, with the built-in context awareness model
//! ctx-infer run --builtin -n 10
//!
//! # Show what a model file turns into
//! ctx-infer inspect --model ./models/context.bin --json
//!
//! # Read the host sensors once
//! ctx-infer status --sensors host
//!
//! # Time the inference path
//! ctx-infer benchmark --model ./models/context.bin --iterations 10000
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ctx-infer",
    about = "Context-aware inference over live sensor data under a fixed memory budget",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (overrides CLI arguments).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a model and classify sensor snapshots.
    Run {
        /// Path to the model file. Without one the built-in model is used.
        #[arg(short, long, conflicts_with = "builtin")]
        model: Option<PathBuf>,

        /// Use the built-in context awareness model.
        #[arg(long)]
        builtin: bool,

        /// Memory budget (e.g., "1M", "512K").
        #[arg(short, long)]
        budget: Option<String>,

        /// Number of inferences to run.
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: u32,

        /// Delay between inferences in milliseconds.
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,

        /// Sensor source: simulated or host.
        #[arg(short, long)]
        sensors: Option<String>,

        /// Reject ONNX/TFLite sources instead of building the demo network.
        #[arg(long)]
        strict: bool,
    },

    /// Load a model and print its metadata and layers.
    Inspect {
        /// Path to the model file. Without one the built-in model is used.
        #[arg(short, long, conflicts_with = "builtin")]
        model: Option<PathBuf>,

        /// Use the built-in context awareness model.
        #[arg(long)]
        builtin: bool,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Read every sensor once and show the resulting features.
    Status {
        /// Sensor source: simulated or host.
        #[arg(short, long)]
        sensors: Option<String>,
    },

    /// Time model loading and inference.
    Benchmark {
        /// Path to the model file. Without one the built-in model is used.
        #[arg(short, long, conflicts_with = "builtin")]
        model: Option<PathBuf>,

        /// Use the built-in context awareness model.
        #[arg(long)]
        builtin: bool,

        /// Number of inferences to time.
        #[arg(short = 'n', long, default_value_t = 1000)]
        iterations: u32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let overrides = |model: Option<PathBuf>, builtin: bool| commands::Overrides {
        model,
        builtin,
        ..Default::default()
    };

    match cli.command {
        Commands::Run {
            model,
            builtin,
            budget,
            iterations,
            interval_ms,
            sensors,
            strict,
        } => {
            let config = commands::resolve_config(
                cli.config.as_deref(),
                commands::Overrides {
                    model,
                    builtin,
                    budget,
                    sensors,
                    strict,
                },
            )?;
            commands::run::execute(config, iterations, interval_ms).await
        }
        Commands::Inspect { model, builtin, json } => {
            let config = commands::resolve_config(cli.config.as_deref(), overrides(model, builtin))?;
            commands::inspect::execute(config, json).await
        }
        Commands::Status { sensors } => {
            let flags = commands::Overrides {
                sensors,
                ..Default::default()
            };
            let config = commands::resolve_config(cli.config.as_deref(), flags)?;
            commands::status::execute(config).await
        }
        Commands::Benchmark {
            model,
            builtin,
            iterations,
        } => {
            let config = commands::resolve_config(cli.config.as_deref(), overrides(model, builtin))?;
            commands::benchmark::execute(config, iterations).await
        }
    }
}
