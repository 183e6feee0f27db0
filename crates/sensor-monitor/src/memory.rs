// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host memory usage via `/proc/meminfo`.

use crate::procfs::read_trimmed;
use crate::SensorError;
use std::path::Path;

const MEMINFO_PATH: &str = "/proc/meminfo";

/// Host memory state in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    /// `MemAvailable`: free memory plus reclaimable cache.
    pub available_bytes: u64,
}

impl MemoryInfo {
    pub fn read() -> Result<Self, SensorError> {
        Self::read_from(Path::new(MEMINFO_PATH))
    }

    pub(crate) fn read_from(path: &Path) -> Result<Self, SensorError> {
        let content = read_trimmed(path)?;
        Self::parse(&content).map_err(|detail| SensorError::ParseError {
            path: path.display().to_string(),
            detail,
        })
    }

    /// Parses `/proc/meminfo` text. Values there are in kB.
    fn parse(content: &str) -> Result<Self, String> {
        let field = |name: &str| -> Result<u64, String> {
            let line = content
                .lines()
                .find_map(|l| l.strip_prefix(name)?.strip_prefix(':'))
                .ok_or_else(|| format!("{name} not found"))?;
            let kb = line.split_whitespace().next().unwrap_or_default();
            kb.parse::<u64>()
                .map(|kb| kb * 1024)
                .map_err(|_| format!("expected integer kB value for {name}, got '{kb}'"))
        };

        Ok(Self {
            total_bytes: field("MemTotal")?,
            available_bytes: field("MemAvailable")?,
        })
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    /// Memory in use as a percentage of total.
    pub fn used_percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.used_bytes() as f64 / self.total_bytes as f64 * 100.0) as f32
    }
}
