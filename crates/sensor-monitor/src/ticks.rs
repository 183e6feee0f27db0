// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Monotonic tick sources.
//!
//! The engine timestamps inferences with a wrapping `u32` tick counter,
//! the same shape as a periodic timer interrupt incrementing a global.

use crate::SensorError;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Tick frequency of the reference device timer.
pub const DEFAULT_TICK_HZ: u32 = 100;

/// A monotonic, wrapping tick counter.
pub trait TickSource {
    /// Ticks since the source started, wrapping at `u32::MAX`.
    fn monotonic_ticks(&self) -> u32;

    /// Ticks per second.
    fn tick_hz(&self) -> u32 {
        DEFAULT_TICK_HZ
    }

    /// Current tick count converted to milliseconds, wrapping.
    fn millis(&self) -> u32 {
        let hz = u64::from(self.tick_hz().max(1));
        (u64::from(self.monotonic_ticks()) * 1000 / hz) as u32
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn monotonic_ticks(&self) -> u32 {
        (**self).monotonic_ticks()
    }

    fn tick_hz(&self) -> u32 {
        (**self).tick_hz()
    }
}

impl<T: TickSource + ?Sized> TickSource for Arc<T> {
    fn monotonic_ticks(&self) -> u32 {
        (**self).monotonic_ticks()
    }

    fn tick_hz(&self) -> u32 {
        (**self).tick_hz()
    }
}

impl<T: TickSource + ?Sized> TickSource for Box<T> {
    fn monotonic_ticks(&self) -> u32 {
        (**self).monotonic_ticks()
    }

    fn tick_hz(&self) -> u32 {
        (**self).tick_hz()
    }
}

// ── SystemTicks ────────────────────────────────────────────────────

/// Ticks derived from the host monotonic clock.
#[derive(Debug, Clone)]
pub struct SystemTicks {
    start: Instant,
    hz: u32,
}

impl SystemTicks {
    /// Starts counting now at `hz` ticks per second.
    pub fn new(hz: u32) -> Result<Self, SensorError> {
        if hz == 0 {
            return Err(SensorError::InvalidTickRate(hz));
        }
        Ok(Self {
            start: Instant::now(),
            hz,
        })
    }
}

impl Default for SystemTicks {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            hz: DEFAULT_TICK_HZ,
        }
    }
}

impl TickSource for SystemTicks {
    fn monotonic_ticks(&self) -> u32 {
        let ticks = self.start.elapsed().as_nanos() * u128::from(self.hz) / 1_000_000_000;
        // Truncation is the wrap.
        ticks as u32
    }

    fn tick_hz(&self) -> u32 {
        self.hz
    }
}

// ── ManualTicks ────────────────────────────────────────────────────

/// A tick counter advanced explicitly. Share it through an `Arc` to drive
/// a component's clock from a test.
#[derive(Debug, Default)]
pub struct ManualTicks {
    ticks: AtomicU32,
}

impl ManualTicks {
    pub fn new(start: u32) -> Self {
        Self {
            ticks: AtomicU32::new(start),
        }
    }

    pub fn set(&self, ticks: u32) {
        self.ticks.store(ticks, Ordering::Release);
    }

    /// Adds `n` ticks, wrapping.
    pub fn advance(&self, n: u32) {
        // fetch_add wraps on overflow.
        self.ticks.fetch_add(n, Ordering::AcqRel);
    }
}

impl TickSource for ManualTicks {
    fn monotonic_ticks(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }
}
