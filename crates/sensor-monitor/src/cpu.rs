// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host CPU load.
//!
//! Utilisation is approximated by the 1-minute load average from
//! `/proc/loadavg` divided by the online core count, which needs a single
//! read instead of two `/proc/stat` samples.

use crate::procfs::read_trimmed;
use crate::SensorError;
use std::path::Path;

const CPU_BASE: &str = "/sys/devices/system/cpu";
const LOADAVG_PATH: &str = "/proc/loadavg";

/// CPU load snapshot.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CpuLoad {
    /// 1-minute load average.
    pub load_1m: f32,
    pub online_cores: u32,
}

impl CpuLoad {
    /// Reads the load average and core count from the host.
    pub fn read() -> Result<Self, SensorError> {
        let online_cores = read_online_cores()?;
        let load_1m = read_loadavg(Path::new(LOADAVG_PATH))?;
        Ok(Self {
            load_1m,
            online_cores,
        })
    }

    /// Load per core as a percentage, clamped to `[0, 100]`.
    pub fn percent(&self) -> f32 {
        let cores = self.online_cores.max(1) as f32;
        (self.load_1m / cores).clamp(0.0, 1.0) * 100.0
    }
}

/// Determines the number of online CPU cores.
///
/// Tries `/sys/devices/system/cpu/online` first (e.g., `"0-3"` → 4 cores),
/// then falls back to `std::thread::available_parallelism()`.
fn read_online_cores() -> Result<u32, SensorError> {
    let online = format!("{CPU_BASE}/online");
    if let Ok(content) = read_trimmed(Path::new(&online)) {
        if let Some(count) = parse_cpu_range(&content) {
            return Ok(count);
        }
    }

    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .map_err(|e| SensorError::ReadError {
            path: CPU_BASE.to_string(),
            source: e,
        })
}

/// Parses a CPU range string like `"0-3"` → 4, `"0"` → 1, `"0,2-3"` → 3.
fn parse_cpu_range(s: &str) -> Option<u32> {
    let mut total = 0u32;
    for part in s.split(',') {
        let part = part.trim();
        if let Some((start_s, end_s)) = part.split_once('-') {
            let start: u32 = start_s.trim().parse().ok()?;
            let end: u32 = end_s.trim().parse().ok()?;
            let span = end.checked_sub(start)?.checked_add(1)?;
            total = total.checked_add(span)?;
        } else {
            let _: u32 = part.parse().ok()?;
            total = total.checked_add(1)?;
        }
    }
    (total > 0).then_some(total)
}

fn read_loadavg(path: &Path) -> Result<f32, SensorError> {
    let content = read_trimmed(path)?;
    parse_loadavg(&content).ok_or_else(|| SensorError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected a load average, got '{content}'"),
    })
}

/// Extracts the first field of `/proc/loadavg` (`"0.35 0.28 0.22 1/234 5678"`).
fn parse_loadavg(content: &str) -> Option<f32> {
    content.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_range() {
        assert_eq!(parse_cpu_range("0-3"), Some(4));
        assert_eq!(parse_cpu_range("0"), Some(1));
        assert_eq!(parse_cpu_range("0,2-3"), Some(3));
        assert_eq!(parse_cpu_range("0-1,3-5"), Some(5));
    }

    #[test]
    fn test_parse_cpu_range_invalid() {
        assert_eq!(parse_cpu_range(""), None);
        assert_eq!(parse_cpu_range("abc"), None);
        assert_eq!(parse_cpu_range("3-1"), None);
    }

    #[test]
    fn test_parse_cpu_range_overflow() {
        assert_eq!(parse_cpu_range("0-4294967295"), None);
        assert_eq!(parse_cpu_range("1-4294967295"), Some(u32::MAX));
        assert_eq!(parse_cpu_range("1-4294967295,0"), None);
    }

    #[test]
    fn test_parse_loadavg() {
        assert_eq!(parse_loadavg("0.35 0.28 0.22 1/234 5678"), Some(0.35));
        assert_eq!(parse_loadavg(""), None);
        assert_eq!(parse_loadavg("high"), None);
    }

    #[test]
    fn test_percent() {
        let load = CpuLoad {
            load_1m: 2.0,
            online_cores: 4,
        };
        assert!((load.percent() - 50.0).abs() < 1e-4);

        let saturated = CpuLoad {
            load_1m: 9.0,
            online_cores: 4,
        };
        assert_eq!(saturated.percent(), 100.0);
    }

    #[test]
    fn test_read_on_host() {
        if Path::new(LOADAVG_PATH).exists() {
            let load = CpuLoad::read().unwrap();
            assert!(load.online_cores >= 1);
            assert!((0.0..=100.0).contains(&load.percent()));
        }
    }
}
