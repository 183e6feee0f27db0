// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sensor kinds and the reading record every provider returns.

/// The sensors the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Linear acceleration in m/s², `x`/`y`/`z` axes.
    Accelerometer,
    /// `x`: CPU utilisation in percent. `y`: secondary load figure.
    CpuUsage,
    /// `x`: memory in use, percent. `y`: free bytes.
    MemoryUsage,
    /// `x`: activity level 0..=3. `y`: touch pressure 0..100. `z`: touch angle.
    UserActivity,
    /// `x`: hour of day. `y`: minutes. `z`: day number.
    TimeOfDay,
}

impl SensorKind {
    /// Every kind, in registration order.
    pub const ALL: [SensorKind; 5] = [
        Self::Accelerometer,
        Self::CpuUsage,
        Self::MemoryUsage,
        Self::TimeOfDay,
        Self::UserActivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accelerometer => "accelerometer",
            Self::CpuUsage => "cpu_usage",
            Self::MemoryUsage => "memory_usage",
            Self::UserActivity => "user_activity",
            Self::TimeOfDay => "time_of_day",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sample from one sensor.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SensorReading {
    pub kind: SensorKind,
    /// Milliseconds since the tick source started.
    pub timestamp_ms: u32,
    /// Primary value.
    pub x: f32,
    /// Secondary value.
    pub y: f32,
    /// Tertiary value.
    pub z: f32,
    /// Confidence, 0 (synthetic placeholder) to 255.
    pub accuracy: u8,
}

impl SensorReading {
    pub fn new(kind: SensorKind, timestamp_ms: u32, [x, y, z]: [f32; 3], accuracy: u8) -> Self {
        Self {
            kind,
            timestamp_ms,
            x,
            y,
            z,
            accuracy,
        }
    }

    /// An all-zero reading, used when a sensor cannot be read.
    pub fn empty(kind: SensorKind) -> Self {
        Self::new(kind, 0, [0.0; 3], 0)
    }

    pub fn values(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_distinct() {
        let names: std::collections::HashSet<_> = SensorKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), SensorKind::ALL.len());
    }

    #[test]
    fn test_empty_reading() {
        let r = SensorReading::empty(SensorKind::CpuUsage);
        assert_eq!(r.values(), [0.0, 0.0, 0.0]);
        assert_eq!(r.accuracy, 0);
    }

    #[test]
    fn test_serialize() {
        let r = SensorReading::new(SensorKind::TimeOfDay, 10, [13.2, 5.0, 0.0], 100);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"kind\":\"time_of_day\""));
        assert!(json.contains("\"accuracy\":100"));
    }
}
