// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Running inference statistics.
//!
//! [`InferenceStats`] is fed by the engine after every run: how many
//! passes, how long the forward pass took, and how often each
//! [`Decision`] came out.

use crate::Decision;
use std::collections::HashMap;
use std::time::Duration;

/// Aggregate counters over every inference an engine has run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct InferenceStats {
    /// Calls to `run`, including those that returned `Decision::None`.
    pub runs: u64,
    /// Runs that executed a forward pass.
    pub forward_passes: u64,
    /// How often each decision was returned.
    pub decisions: HashMap<Decision, u64>,
    /// Total time spent in forward passes.
    pub total_forward: Duration,
    /// Duration of the most recent forward pass.
    pub last_forward: Duration,
    /// Tick value stamped on the model after the most recent pass.
    pub last_tick: u32,
}

impl InferenceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one run. `forward` is `None` when no pass was executed.
    pub fn record(&mut self, decision: Decision, forward: Option<Duration>, tick: u32) {
        self.runs += 1;
        *self.decisions.entry(decision).or_insert(0) += 1;
        if let Some(elapsed) = forward {
            self.forward_passes += 1;
            self.total_forward += elapsed;
            self.last_forward = elapsed;
            self.last_tick = tick;
        }
    }

    pub fn count(&self, decision: Decision) -> u64 {
        self.decisions.get(&decision).copied().unwrap_or(0)
    }

    /// Mean forward-pass time, zero before the first pass.
    pub fn mean_forward(&self) -> Duration {
        match u32::try_from(self.forward_passes) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_forward / n,
            Err(_) => Duration::from_secs_f64(
                self.total_forward.as_secs_f64() / self.forward_passes as f64,
            ),
        }
    }

    /// The decision returned most often, ties broken by class order.
    pub fn dominant(&self) -> Option<Decision> {
        Decision::ALL
            .into_iter()
            .filter(|d| self.count(*d) > 0)
            .fold(None, |best: Option<Decision>, d| match best {
                Some(b) if self.count(b) >= self.count(d) => Some(b),
                _ => Some(d),
            })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let histogram = Decision::ALL
            .into_iter()
            .filter_map(|d| match self.count(d) {
                0 => None,
                n => Some(format!("{d}={n}")),
            })
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "Inference: {} runs, {} forward passes, mean {:.1}us, last {:.1}us @ tick {} [{}]",
            self.runs,
            self.forward_passes,
            self.mean_forward().as_secs_f64() * 1e6,
            self.last_forward.as_secs_f64() * 1e6,
            self.last_tick,
            histogram,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let s = InferenceStats::new();
        assert_eq!(s.runs, 0);
        assert_eq!(s.mean_forward(), Duration::ZERO);
        assert_eq!(s.dominant(), None);
    }

    #[test]
    fn test_record() {
        let mut s = InferenceStats::new();
        s.record(Decision::Idle, Some(Duration::from_micros(10)), 5);
        s.record(Decision::Idle, Some(Duration::from_micros(30)), 9);
        s.record(Decision::None, None, 12);

        assert_eq!(s.runs, 3);
        assert_eq!(s.forward_passes, 2);
        assert_eq!(s.count(Decision::Idle), 2);
        assert_eq!(s.count(Decision::None), 1);
        assert_eq!(s.count(Decision::Gaming), 0);
        assert_eq!(s.total_forward, Duration::from_micros(40));
        assert_eq!(s.mean_forward(), Duration::from_micros(20));
        assert_eq!(s.last_forward, Duration::from_micros(30));
        assert_eq!(s.last_tick, 9);
    }

    #[test]
    fn test_dominant_tie_prefers_class_order() {
        let mut s = InferenceStats::new();
        s.record(Decision::Sleeping, None, 0);
        s.record(Decision::Working, None, 0);
        assert_eq!(s.dominant(), Some(Decision::Working));
        s.record(Decision::Sleeping, None, 0);
        assert_eq!(s.dominant(), Some(Decision::Sleeping));
    }

    #[test]
    fn test_summary_format() {
        let mut s = InferenceStats::new();
        s.record(Decision::Gaming, Some(Duration::from_micros(4)), 1);
        let text = s.summary();
        assert!(text.contains("1 runs"));
        assert!(text.contains("gaming=1"));
        assert!(!text.contains("idle="));
    }

    #[test]
    fn test_serialize() {
        let mut s = InferenceStats::new();
        s.record(Decision::Working, Some(Duration::from_micros(1)), 2);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["runs"], 1);
        assert_eq!(json["decisions"]["working"], 1);
    }

    #[test]
    fn test_reset() {
        let mut s = InferenceStats::new();
        s.record(Decision::Idle, None, 0);
        s.reset();
        assert_eq!(s.runs, 0);
        assert!(s.decisions.is_empty());
    }
}
