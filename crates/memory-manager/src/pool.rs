// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Budget-enforced buffer pool.
//!
//! The [`MemoryPool`] is the allocator collaborator of the model loader. It:
//!
//! 1. Enforces a hard memory ceiling. Allocations that would exceed the
//!    budget return `Err(OutOfMemory)`.
//! 2. Converts host allocation failure into the same `OutOfMemory` error
//!    instead of aborting.
//! 3. Supports failure injection ([`MemoryPool::fail_after`]) so that every
//!    rollback path of a multi-step construction can be exercised.
//! 4. Tracks allocation statistics.
//!
//! # Sharing
//! `MemoryPool` is a cheap handle (`Clone` copies an `Arc`). The loader and
//! the registry hold clones of the same pool, and every [`BufferGuard`]
//! keeps the pool state alive until it is dropped.

use crate::{AllocationStats, BufferGuard, MemoryBudget, MemoryError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Countdown value meaning "no failure scheduled".
const DISARMED: usize = usize::MAX;

/// Internal pool state, shared between the pool handle and its guards.
pub struct PoolInner {
    budget: MemoryBudget,
    /// Live bytes (handed out, not yet returned).
    allocated_bytes: AtomicUsize,
    /// Successful allocations remaining before an injected failure.
    fail_countdown: AtomicUsize,
    stats: Mutex<AllocationStats>,
}

impl PoolInner {
    /// Called by `BufferGuard::drop`.
    pub(crate) fn release(&self, size_bytes: usize) {
        self.allocated_bytes.fetch_sub(size_bytes, Ordering::AcqRel);
        if let Ok(mut stats) = self.stats.lock() {
            stats.record_deallocation();
        }
    }

    fn record_oom(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.record_oom();
        }
    }

    /// Consumes one tick of the injected-failure countdown. Returns `true`
    /// if this allocation must fail.
    fn injected_failure_due(&self) -> bool {
        let previous = self
            .fail_countdown
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| match c {
                DISARMED => None,
                0 => Some(DISARMED),
                n => Some(n - 1),
            });
        matches!(previous, Ok(0))
    }
}

/// The allocator for model buffers.
///
/// # Example
/// ```
/// use memory_manager::{MemoryError, MemoryPool, MemoryBudget};
///
/// let pool = MemoryPool::new(MemoryBudget::from_bytes(64));
///
/// let a = pool.allocate::<f32>(8).unwrap();  // 32 bytes
/// let b = pool.allocate::<f32>(8).unwrap();  // 32 bytes, budget now full
/// assert!(matches!(pool.allocate::<u8>(1), Err(MemoryError::OutOfMemory { .. })));
///
/// drop(a);
/// assert_eq!(pool.available_bytes(), 32);
/// # drop(b);
/// ```
#[derive(Clone)]
pub struct MemoryPool {
    inner: Arc<PoolInner>,
}

impl MemoryPool {
    /// Creates a new memory pool with the given budget.
    pub fn new(budget: MemoryBudget) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                budget,
                allocated_bytes: AtomicUsize::new(0),
                fail_countdown: AtomicUsize::new(DISARMED),
                stats: Mutex::new(AllocationStats::default()),
            }),
        }
    }

    /// Allocates a zero/default-initialised buffer of `len` elements.
    ///
    /// Returns `Err(OutOfMemory)` if the buffer would exceed the budget, if
    /// the host cannot provide the memory, or if an injected failure is due.
    /// The returned [`BufferGuard`] credits the bytes back when dropped.
    pub fn allocate<T: Copy + Default>(&self, len: usize) -> Result<BufferGuard<T>, MemoryError> {
        if len == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }

        let budget = self.inner.budget.as_bytes();
        let current = self.inner.allocated_bytes.load(Ordering::Acquire);
        let oom = |requested_bytes: usize| MemoryError::OutOfMemory {
            requested_bytes,
            available_bytes: budget.saturating_sub(current),
            budget_bytes: budget,
        };

        let Some(size_bytes) = len.checked_mul(std::mem::size_of::<T>()) else {
            self.inner.record_oom();
            return Err(oom(usize::MAX));
        };

        if current.saturating_add(size_bytes) > budget {
            self.inner.record_oom();
            tracing::debug!(
                "pool: refusing {size_bytes} bytes ({} of {budget} in use)",
                current
            );
            return Err(oom(size_bytes));
        }

        if self.inner.injected_failure_due() {
            self.inner.record_oom();
            tracing::debug!("pool: injected failure for {size_bytes} bytes");
            return Err(oom(size_bytes));
        }

        let mut data = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            self.inner.record_oom();
            return Err(oom(size_bytes));
        }
        data.resize(len, T::default());

        let now = self
            .inner
            .allocated_bytes
            .fetch_add(size_bytes, Ordering::AcqRel)
            + size_bytes;

        if let Ok(mut stats) = self.inner.stats.lock() {
            stats.record_allocation(size_bytes);
            stats.update_peak(now);
        }
        tracing::trace!("pool: allocated {size_bytes} bytes, {now} in use");

        Ok(BufferGuard::new(data, Arc::clone(&self.inner), size_bytes))
    }

    /// Allocates a buffer and fills it with a copy of `src`.
    pub fn allocate_copy<T: Copy + Default>(&self, src: &[T]) -> Result<BufferGuard<T>, MemoryError> {
        let mut guard = self.allocate::<T>(src.len())?;
        guard.copy_from_slice(src);
        Ok(guard)
    }

    /// Schedules an injected failure: the next `successes` allocations
    /// succeed (budget permitting) and the one after that fails with
    /// `OutOfMemory`. The schedule then disarms itself.
    pub fn fail_after(&self, successes: usize) {
        let armed = successes.min(DISARMED - 1);
        self.inner.fail_countdown.store(armed, Ordering::Release);
    }

    /// Cancels any scheduled injected failure.
    pub fn clear_injected_failure(&self) {
        self.inner.fail_countdown.store(DISARMED, Ordering::Release);
    }

    /// Returns the number of bytes currently allocated (live, not yet returned).
    pub fn allocated_bytes(&self) -> usize {
        self.inner.allocated_bytes.load(Ordering::Acquire)
    }

    /// Returns the number of bytes remaining before hitting the budget.
    pub fn available_bytes(&self) -> usize {
        self.inner
            .budget
            .as_bytes()
            .saturating_sub(self.allocated_bytes())
    }

    /// Returns the memory budget.
    pub fn budget(&self) -> MemoryBudget {
        self.inner.budget
    }

    /// Returns a snapshot of allocation statistics.
    pub fn stats(&self) -> AllocationStats {
        self.inner
            .stats
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryPool {
    fn default() -> Self {
        Self::new(MemoryBudget::default())
    }
}

impl std::fmt::Debug for MemoryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPool")
            .field("budget", &self.inner.budget)
            .field("allocated_bytes", &self.allocated_bytes())
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_drop() {
        let pool = MemoryPool::new(MemoryBudget::from_kb(1));

        let guard = pool.allocate::<f32>(16).unwrap();
        assert_eq!(pool.allocated_bytes(), 64);
        assert_eq!(guard.size_bytes(), 64);
        assert_eq!(guard.len(), 16);

        drop(guard);
        assert_eq!(pool.allocated_bytes(), 0);
    }

    #[test]
    fn test_buffer_is_zeroed() {
        let pool = MemoryPool::default();
        let mut guard = pool.allocate::<f32>(4).unwrap();
        assert!(guard.iter().all(|&v| v == 0.0));

        guard[2] = 1.5;
        assert_eq!(guard.as_slice(), &[0.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_allocate_copy() {
        let pool = MemoryPool::default();
        let bytes = pool.allocate_copy(b"TFL3").unwrap();
        assert_eq!(&bytes[..], b"TFL3");
        assert_eq!(pool.allocated_bytes(), 4);
    }

    #[test]
    fn test_oom() {
        let pool = MemoryPool::new(MemoryBudget::from_bytes(1024));

        let _g1 = pool.allocate::<u8>(512).unwrap();
        let _g2 = pool.allocate::<u8>(512).unwrap();

        let result = pool.allocate::<u8>(1);
        assert!(matches!(
            result,
            Err(MemoryError::OutOfMemory { requested_bytes: 1, available_bytes: 0, budget_bytes: 1024 })
        ));
    }

    #[test]
    fn test_zero_allocation() {
        let pool = MemoryPool::default();
        assert!(matches!(
            pool.allocate::<f32>(0),
            Err(MemoryError::ZeroSizedAllocation)
        ));
    }

    #[test]
    fn test_size_overflow_is_oom() {
        let pool = MemoryPool::default();
        assert!(matches!(
            pool.allocate::<f32>(usize::MAX),
            Err(MemoryError::OutOfMemory { .. })
        ));
        assert_eq!(pool.allocated_bytes(), 0);
    }

    #[test]
    fn test_fail_after() {
        let pool = MemoryPool::default();
        pool.fail_after(2);

        let a = pool.allocate::<u8>(8).unwrap();
        let b = pool.allocate::<u8>(8).unwrap();
        assert!(matches!(
            pool.allocate::<u8>(8),
            Err(MemoryError::OutOfMemory { .. })
        ));
        // Disarmed after firing once.
        let c = pool.allocate::<u8>(8).unwrap();

        assert_eq!(pool.stats().oom_count, 1);
        drop((a, b, c));
        assert_eq!(pool.allocated_bytes(), 0);
    }

    #[test]
    fn test_fail_after_zero_fails_next() {
        let pool = MemoryPool::default();
        pool.fail_after(0);
        assert!(pool.allocate::<u8>(1).is_err());
        assert!(pool.allocate::<u8>(1).is_ok());
    }

    #[test]
    fn test_clear_injected_failure() {
        let pool = MemoryPool::default();
        pool.fail_after(0);
        pool.clear_injected_failure();
        assert!(pool.allocate::<u8>(1).is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let pool = MemoryPool::new(MemoryBudget::from_bytes(100));
        let other = pool.clone();
        let _g = other.allocate::<u8>(60).unwrap();
        assert_eq!(pool.allocated_bytes(), 60);
        assert!(pool.allocate::<u8>(41).is_err());
    }

    #[test]
    fn test_available_bytes() {
        let pool = MemoryPool::new(MemoryBudget::from_bytes(10000));

        assert_eq!(pool.available_bytes(), 10000);
        let _g = pool.allocate::<u8>(3000).unwrap();
        assert_eq!(pool.available_bytes(), 7000);
    }

    #[test]
    fn test_stats_peak_and_live() {
        let pool = MemoryPool::default();

        let g1 = pool.allocate::<u8>(1000).unwrap();
        let g2 = pool.allocate::<u8>(2000).unwrap();
        drop(g1);
        let stats = pool.stats();
        assert_eq!(stats.live_buffers(), 1);
        drop(g2);

        let stats = pool.stats();
        assert_eq!(stats.peak_allocated_bytes, 3000);
        assert_eq!(stats.live_buffers(), 0);
    }

    #[test]
    fn test_stats_oom_count() {
        let pool = MemoryPool::new(MemoryBudget::from_bytes(100));
        let _ = pool.allocate::<u8>(200);
        let _ = pool.allocate::<u8>(200);
        assert_eq!(pool.stats().oom_count, 2);
    }

    #[test]
    fn test_debug_format() {
        let pool = MemoryPool::new(MemoryBudget::from_mb(1));
        let debug = format!("{pool:?}");
        assert!(debug.contains("MemoryPool"));
        assert!(debug.contains("budget"));
    }
}
