// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sensor provider backed by the Linux host.
//!
//! Only CPU, memory and clock have real host sources. The accelerometer
//! reports a device at rest and touch input reports no contact.
//!
//! # Graceful Degradation
//! When a procfs file is missing or malformed (containers, non-Linux hosts)
//! the reading falls back to [`SensorReading::empty`] and a warning is
//! logged once per sensor kind.

use crate::{CpuLoad, MemoryInfo, SensorError, SensorKind, SensorProvider, SensorReading};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Standard gravity, reported on the accelerometer `y` axis at rest.
pub const GRAVITY: f32 = 9.8;

/// Reads CPU load, memory and wall-clock time from the host.
#[derive(Debug, Default)]
pub struct HostSensors {
    warned: HashSet<SensorKind>,
}

impl HostSensors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`SensorProvider::read`] but surfaces host read failures.
    pub fn try_read(&self, kind: SensorKind, timestamp_ms: u32) -> Result<SensorReading, SensorError> {
        let reading = match kind {
            SensorKind::Accelerometer => {
                SensorReading::new(kind, timestamp_ms, [0.0, GRAVITY, 0.0], 0)
            }
            SensorKind::CpuUsage => {
                let load = CpuLoad::read()?;
                SensorReading::new(
                    kind,
                    timestamp_ms,
                    [load.percent(), load.load_1m, load.online_cores as f32],
                    100,
                )
            }
            SensorKind::MemoryUsage => {
                let mem = MemoryInfo::read()?;
                SensorReading::new(
                    kind,
                    timestamp_ms,
                    [mem.used_percent(), mem.available_bytes as f32, 0.0],
                    100,
                )
            }
            SensorKind::TimeOfDay => {
                let secs = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                SensorReading::new(kind, timestamp_ms, wall_clock(secs), 100)
            }
            SensorKind::UserActivity => SensorReading::new(kind, timestamp_ms, [0.0; 3], 0),
        };
        Ok(reading)
    }
}

impl SensorProvider for HostSensors {
    fn name(&self) -> &'static str {
        "host"
    }

    fn read(&mut self, kind: SensorKind, timestamp_ms: u32) -> SensorReading {
        match self.try_read(kind, timestamp_ms) {
            Ok(reading) => reading,
            Err(e) => {
                if self.warned.insert(kind) {
                    tracing::warn!("host sensor {kind} unavailable, reporting zeros: {e}");
                }
                SensorReading {
                    timestamp_ms,
                    ..SensorReading::empty(kind)
                }
            }
        }
    }
}

/// Splits UNIX seconds into `[hour, minute, day]` (UTC).
fn wall_clock(secs: u64) -> [f32; 3] {
    let hour = (secs % 86_400) / 3_600;
    let minute = (secs % 3_600) / 60;
    let day = secs / 86_400;
    [hour as f32, minute as f32, day as f32]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock() {
        // 1970-01-02T10:30:00Z
        let secs = 86_400 + 10 * 3_600 + 30 * 60;
        assert_eq!(wall_clock(secs), [10.0, 30.0, 1.0]);
        assert_eq!(wall_clock(0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_resting_accelerometer() {
        let mut host = HostSensors::new();
        let r = host.read(SensorKind::Accelerometer, 40);
        assert_eq!(r.values(), [0.0, GRAVITY, 0.0]);
        assert_eq!(r.timestamp_ms, 40);
    }

    #[test]
    fn test_no_touch() {
        let mut host = HostSensors::new();
        assert_eq!(host.read(SensorKind::UserActivity, 0).y, 0.0);
    }

    #[test]
    fn test_hour_in_range() {
        let mut host = HostSensors::new();
        let r = host.read(SensorKind::TimeOfDay, 0);
        assert!((0.0..24.0).contains(&r.x));
    }

    #[test]
    fn test_cpu_and_memory_never_panic() {
        let mut host = HostSensors::new();
        let cpu = host.read(SensorKind::CpuUsage, 0);
        assert!((0.0..=100.0).contains(&cpu.x));
        let mem = host.read(SensorKind::MemoryUsage, 0);
        assert!((0.0..=100.0).contains(&mem.x));
    }
}
