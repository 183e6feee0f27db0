// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation statistics for profiling and leak checks.
//!
//! [`AllocationStats`] tracks cumulative metrics about how the pool is being
//! used. `live_buffers()` reaching zero after an unload is how the tests
//! prove that nothing leaked.

/// Cumulative statistics about memory pool usage.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AllocationStats {
    /// Allocation requests that succeeded.
    pub total_allocations: u64,
    /// Allocation requests refused (budget, host, or injected failure).
    pub oom_count: u64,
    /// Peak memory usage in bytes.
    pub peak_allocated_bytes: usize,
    /// Total bytes ever handed out, including since-released buffers.
    pub cumulative_allocated_bytes: u64,
    /// Buffers returned to the pool.
    pub total_deallocations: u64,
}

impl AllocationStats {
    /// Number of buffers handed out and not yet returned.
    pub fn live_buffers(&self) -> u64 {
        self.total_allocations.saturating_sub(self.total_deallocations)
    }

    pub(crate) fn record_allocation(&mut self, size: usize) {
        self.total_allocations += 1;
        self.cumulative_allocated_bytes += size as u64;
    }

    pub(crate) fn record_oom(&mut self) {
        self.oom_count += 1;
    }

    pub(crate) fn record_deallocation(&mut self) {
        self.total_deallocations += 1;
    }

    /// Updates the high-water mark if `current_bytes` exceeds it.
    pub(crate) fn update_peak(&mut self, current_bytes: usize) {
        if current_bytes > self.peak_allocated_bytes {
            self.peak_allocated_bytes = current_bytes;
        }
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Allocations: {} ok, {} refused, {} freed, {} live, peak {:.2} KB",
            self.total_allocations,
            self.oom_count,
            self.total_deallocations,
            self.live_buffers(),
            self.peak_allocated_bytes as f64 / 1024.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let s = AllocationStats::default();
        assert_eq!(s.total_allocations, 0);
        assert_eq!(s.live_buffers(), 0);
    }

    #[test]
    fn test_live_buffers() {
        let mut s = AllocationStats::default();
        s.record_allocation(100);
        s.record_allocation(200);
        s.record_deallocation();
        assert_eq!(s.live_buffers(), 1);
        assert_eq!(s.cumulative_allocated_bytes, 300);
    }

    #[test]
    fn test_peak_tracking() {
        let mut s = AllocationStats::default();
        s.update_peak(100);
        s.update_peak(50);
        assert_eq!(s.peak_allocated_bytes, 100);
        s.update_peak(200);
        assert_eq!(s.peak_allocated_bytes, 200);
    }

    #[test]
    fn test_summary() {
        let mut s = AllocationStats::default();
        s.record_allocation(2048);
        s.record_oom();
        s.update_peak(2048);
        let summary = s.summary();
        assert!(summary.contains("1 ok"));
        assert!(summary.contains("1 refused"));
        assert!(summary.contains("1 live"));
        assert!(summary.contains("2.00 KB"));
    }
}
