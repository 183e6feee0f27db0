// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The sensor provider seam and its deterministic simulated implementation.

use crate::{SensorKind, SensorReading};

/// Anything that can produce a [`SensorReading`] for a [`SensorKind`].
///
/// Reads never fail: a provider that cannot reach a sensor returns
/// [`SensorReading::empty`] (or a resting default) instead.
pub trait SensorProvider {
    /// Short label for logs and CLI output.
    fn name(&self) -> &'static str;

    /// Samples `kind`. `timestamp_ms` is stamped onto the reading.
    fn read(&mut self, kind: SensorKind, timestamp_ms: u32) -> SensorReading;
}

impl<P: SensorProvider + ?Sized> SensorProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn read(&mut self, kind: SensorKind, timestamp_ms: u32) -> SensorReading {
        (**self).read(kind, timestamp_ms)
    }
}

// ── Simulated ──────────────────────────────────────────────────────

/// Seed of the simulated sensor stream.
pub const SIMULATION_SEED: u32 = 12345;

/// 31-bit linear congruential generator.
#[derive(Debug, Clone)]
struct SimRng {
    state: u32,
}

impl SimRng {
    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12345) & 0x7FFF_FFFF;
        self.state
    }

    /// `next() % n` as `f32`.
    fn below(&mut self, n: u32) -> f32 {
        (self.next() % n) as f32
    }
}

/// Plausible, reproducible sensor values for hosts without real sensors.
///
/// Two instances created with the same seed produce the same stream of
/// readings for the same sequence of `read` calls.
#[derive(Debug, Clone)]
pub struct SimulatedSensors {
    rng: SimRng,
}

impl SimulatedSensors {
    pub fn new() -> Self {
        Self::with_seed(SIMULATION_SEED)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: SimRng { state: seed },
        }
    }
}

impl Default for SimulatedSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorProvider for SimulatedSensors {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn read(&mut self, kind: SensorKind, timestamp_ms: u32) -> SensorReading {
        let rng = &mut self.rng;
        let (values, accuracy) = match kind {
            SensorKind::Accelerometer => {
                // ±1 m/s² around rest, y centred on gravity.
                let x = rng.below(1000) / 500.0 - 1.0;
                let y = 9.8 + rng.below(200) / 100.0 - 1.0;
                let z = rng.below(1000) / 500.0 - 1.0;
                ([x, y, z], 95)
            }
            SensorKind::CpuUsage => {
                let percent = rng.below(100);
                let fraction = rng.below(100) / 100.0;
                let sensors = SensorKind::ALL.len() as u32;
                let kernel = rng.below(sensors) / sensors as f32 * 100.0;
                ([percent + fraction, kernel, 0.0], 100)
            }
            SensorKind::MemoryUsage => {
                let used = rng.below(80) + 20.0;
                let free = 1_048_576.0 - used * 10_485.76;
                let fragmentation = (1u32 << (rng.next() % 24)) as f32;
                ([used, free, fragmentation], 90)
            }
            SensorKind::TimeOfDay => {
                let hour = 12.0 + rng.below(24) / 10.0;
                let minute = rng.below(60);
                let day = (timestamp_ms / 86_400_000) as f32;
                ([hour, minute, day], 100)
            }
            SensorKind::UserActivity => {
                let level = rng.below(4);
                let pressure = rng.below(100);
                let angle = rng.below(360);
                ([level, pressure, angle], 85)
            }
        };
        SensorReading::new(kind, timestamp_ms, values, accuracy)
    }
}
