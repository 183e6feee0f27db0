// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ctx-infer status` command: read the sensors once.
//!
//! With `--sensors host` the CPU and memory figures come from `/proc`; on
//! hosts without it those readings fall back to zero and the command still
//! works.

use runtime::{preprocess, EngineConfig, SensorSource};
use sensor_monitor::{CpuLoad, MemoryInfo, SensorContext, SensorKind, TickSource};

pub async fn execute(config: EngineConfig) -> anyhow::Result<()> {
    super::banner("ctx-infer · Sensor Status");

    let ticks = config.tick_source()?;
    let mut sensors = config.sensor_source.provider();
    println!("  Source: {} @ {} Hz", sensors.name(), ticks.tick_hz());
    println!();

    // ── Readings ───────────────────────────────────────────────
    println!("  Readings");
    for kind in SensorKind::ALL {
        let r = sensors.read(kind, ticks.millis());
        println!(
            "   {:<14} x {:>8.2}  y {:>8.2}  z {:>8.2}  acc {:>3}%",
            kind.as_str(),
            r.x,
            r.y,
            r.z,
            r.accuracy
        );
    }
    println!();

    // ── Host ───────────────────────────────────────────────────
    if config.sensor_source == SensorSource::Host {
        println!("  Host");
        match CpuLoad::read() {
            Ok(cpu) => println!(
                "   CPU:          load {:.2} on {} cores  {}",
                cpu.load_1m,
                cpu.online_cores,
                super::usage_bar(f64::from(cpu.percent()) / 100.0)
            ),
            Err(e) => println!("   CPU:          unavailable ({e})"),
        }
        match MemoryInfo::read() {
            Ok(mem) => println!(
                "   Memory:       {} / {} MB  {}",
                mem.used_bytes() / (1024 * 1024),
                mem.total_bytes / (1024 * 1024),
                super::usage_bar(f64::from(mem.used_percent()) / 100.0)
            ),
            Err(e) => println!("   Memory:       unavailable ({e})"),
        }
        println!();
    }

    // ── Features ───────────────────────────────────────────────
    let context = SensorContext::capture(sensors.as_mut(), &ticks);
    let features = preprocess(&context);
    println!("  Context");
    println!("   {}", context.summary());
    println!(
        "   Features:     [{:.3}, {:.3}, {:.3}, {:.3}]",
        features[0], features[1], features[2], features[3]
    );
    println!();
    Ok(())
}
