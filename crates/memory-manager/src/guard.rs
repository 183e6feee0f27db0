// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII buffer that credits its bytes back to the pool on drop.
//!
//! [`BufferGuard`] is the `free` half of the allocator contract. There is
//! no explicit free call: once the guard goes out of scope, the pool's
//! live-byte counter drops by exactly the amount it was charged.

use crate::pool::PoolInner;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// An owned, pool-accounted buffer of `T`.
///
/// Dereferences to `[T]`, so it can be passed anywhere a slice is expected.
///
/// # Example
/// ```
/// use memory_manager::{MemoryBudget, MemoryPool};
///
/// let pool = MemoryPool::new(MemoryBudget::from_kb(4));
/// let mut biases = pool.allocate::<f32>(8).unwrap();
/// biases[0] = 0.25;
/// assert_eq!(biases.len(), 8);
/// drop(biases);
/// assert_eq!(pool.allocated_bytes(), 0);
/// ```
pub struct BufferGuard<T> {
    data: Vec<T>,
    pool: Arc<PoolInner>,
    size_bytes: usize,
}

impl<T> BufferGuard<T> {
    pub(crate) fn new(data: Vec<T>, pool: Arc<PoolInner>, size_bytes: usize) -> Self {
        Self {
            data,
            pool,
            size_bytes,
        }
    }

    /// Returns an immutable view of the buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable view of the buffer.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the number of bytes charged against the pool.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }
}

impl<T> Deref for BufferGuard<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> DerefMut for BufferGuard<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Drop for BufferGuard<T> {
    fn drop(&mut self) {
        self.pool.release(self.size_bytes);
    }
}

impl<T> std::fmt::Debug for BufferGuard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferGuard")
            .field("type", &std::any::type_name::<T>())
            .field("len", &self.data.len())
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}
