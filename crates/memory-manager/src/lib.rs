// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memory-manager
//!
//! The allocator that model loading draws from. Every weight matrix, bias
//! vector, activation buffer and raw model image is carved out of a
//! [`MemoryPool`] whose total size is capped by a [`MemoryBudget`], the
//! equivalent of a small fixed kernel heap on the target device.
//!
//! # Key Components
//!
//! - [`MemoryBudget`]: a hard memory ceiling with human-readable parsing
//!   (`"1M"`, `"512K"`, etc.).
//! - [`MemoryPool`]: enforces the budget, counts live bytes, and can be told
//!   to fail a future allocation so rollback paths can be tested.
//! - [`BufferGuard`]: an owned, typed buffer. Dropping it *is* `free`: the
//!   bytes are credited back to the pool automatically.
//! - [`AllocationStats`]: cumulative allocator metrics (peak usage, OOM count).
//!
//! # Ownership Model
//!
//! ```text
//! MemoryPool::allocate::<T>(len)
//!       │
//!       ▼
//!   BufferGuard<T>  ◄─── owns Vec<T>, holds Arc<PoolInner>
//!       │
//!       │  drop()
//!       ▼
//!   PoolInner::release()  ──► allocated_bytes -= size
//! ```
//!
//! Because release happens in `Drop`, an early `?` return in the middle of
//! building a model frees everything built so far with no cleanup code.
//!
//! # Example
//! ```
//! use memory_manager::{MemoryPool, MemoryBudget};
//!
//! let pool = MemoryPool::new(MemoryBudget::from_kb(64));
//!
//! let weights = pool.allocate::<f32>(32).unwrap();   // 128 bytes
//! let image = pool.allocate::<u8>(1024).unwrap();    // 1 KB
//! assert_eq!(pool.allocated_bytes(), 128 + 1024);
//!
//! drop(weights);
//! assert_eq!(pool.allocated_bytes(), 1024);
//! ```

mod budget;
mod error;
mod guard;
pub mod pool;
mod stats;

pub use budget::MemoryBudget;
pub use error::MemoryError;
pub use guard::BufferGuard;
pub use pool::MemoryPool;
pub use stats::AllocationStats;
