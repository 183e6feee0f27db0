// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time sensor context.
//!
//! A [`SensorContext`] groups one reading per sensor kind with the tick
//! count at capture time. It is the only input the inference engine
//! consumes.

use crate::{SensorKind, SensorProvider, SensorReading, TickSource};

/// One reading of every sensor, captured together.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SensorContext {
    pub accelerometer: SensorReading,
    pub cpu_usage: SensorReading,
    pub memory_usage: SensorReading,
    pub user_activity: SensorReading,
    pub time_of_day: SensorReading,
    /// Tick count when the context was captured.
    pub system_uptime: u32,
}

impl SensorContext {
    /// Samples every sensor from `provider`, stamped with `ticks`.
    pub fn capture<P, T>(provider: &mut P, ticks: &T) -> Self
    where
        P: SensorProvider + ?Sized,
        T: TickSource + ?Sized,
    {
        let system_uptime = ticks.monotonic_ticks();
        let now_ms = ticks.millis();
        let mut read = |kind| provider.read(kind, now_ms);

        let context = Self {
            accelerometer: read(SensorKind::Accelerometer),
            cpu_usage: read(SensorKind::CpuUsage),
            memory_usage: read(SensorKind::MemoryUsage),
            time_of_day: read(SensorKind::TimeOfDay),
            user_activity: read(SensorKind::UserActivity),
            system_uptime,
        };
        tracing::trace!("sensors: {}", context.summary());
        context
    }

    /// Builds a context from the four values the engine uses. Memory usage
    /// is left empty.
    ///
    /// ```
    /// use sensor_monitor::SensorContext;
    ///
    /// let ctx = SensorContext::from_values([0.0, 9.8, 0.0], 10.0, 10.0, 10.0);
    /// assert_eq!(ctx.hour(), 10.0);
    /// assert_eq!(ctx.touch_pressure(), 10.0);
    /// ```
    pub fn from_values(acceleration: [f32; 3], hour: f32, cpu_percent: f32, touch_pressure: f32) -> Self {
        Self {
            accelerometer: SensorReading::new(SensorKind::Accelerometer, 0, acceleration, 100),
            cpu_usage: SensorReading::new(SensorKind::CpuUsage, 0, [cpu_percent, 0.0, 0.0], 100),
            memory_usage: SensorReading::empty(SensorKind::MemoryUsage),
            user_activity: SensorReading::new(SensorKind::UserActivity, 0, [0.0, touch_pressure, 0.0], 100),
            time_of_day: SensorReading::new(SensorKind::TimeOfDay, 0, [hour, 0.0, 0.0], 100),
            system_uptime: 0,
        }
    }

    pub fn acceleration(&self) -> [f32; 3] {
        self.accelerometer.values()
    }

    pub fn hour(&self) -> f32 {
        self.time_of_day.x
    }

    pub fn cpu_percent(&self) -> f32 {
        self.cpu_usage.x
    }

    pub fn touch_pressure(&self) -> f32 {
        self.user_activity.y
    }

    pub fn summary(&self) -> String {
        let [ax, ay, az] = self.acceleration();
        format!(
            "accel ({ax:.2}, {ay:.2}, {az:.2}) m/s², hour {:.1}, cpu {:.1}%, mem {:.1}%, touch {:.0}",
            self.hour(),
            self.cpu_percent(),
            self.memory_usage.x,
            self.touch_pressure(),
        )
    }
}
