// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # sensor-monitor
//!
//! The inputs of the inference engine: sensor readings and a tick clock.
//!
//! # Providers
//! - [`SimulatedSensors`]: a reproducible pseudo-random stream in realistic
//!   ranges, for hosts with no physical sensors.
//! - [`HostSensors`]: CPU load from `/proc/loadavg`, memory from
//!   `/proc/meminfo`, hour from the wall clock. Missing files degrade to
//!   zero readings instead of errors.
//!
//! # Clocks
//! - [`SystemTicks`]: host monotonic clock at a configurable rate.
//! - [`ManualTicks`]: advanced by hand, for tests.
//!
//! # Example
//! ```
//! use sensor_monitor::{SensorContext, SimulatedSensors, SystemTicks};
//!
//! let mut sensors = SimulatedSensors::new();
//! let ticks = SystemTicks::default();
//! let ctx = SensorContext::capture(&mut sensors, &ticks);
//! println!("{}", ctx.summary());
//! ```

mod context;
mod cpu;
mod error;
mod host;
mod memory;
mod procfs;
mod provider;
mod reading;
mod ticks;

pub use context::SensorContext;
pub use cpu::CpuLoad;
pub use error::SensorError;
pub use host::{HostSensors, GRAVITY};
pub use memory::MemoryInfo;
pub use provider::{SensorProvider, SimulatedSensors, SIMULATION_SEED};
pub use reading::{SensorKind, SensorReading};
pub use ticks::{ManualTicks, SystemTicks, TickSource, DEFAULT_TICK_HZ};
