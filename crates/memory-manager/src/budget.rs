// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Memory budget configuration and parsing.
//!
//! A [`MemoryBudget`] is the size of the heap the loader may draw from.
//! On the reference device this is a 1 MiB kernel heap, which is also the
//! default here.

use crate::MemoryError;
use std::fmt;

const KIB: usize = 1024;
const MIB: usize = 1024 * 1024;

/// Suffixes accepted by [`MemoryBudget::parse`], longest first so that
/// `"KB"` is tried before `"B"`.
const SUFFIXES: &[(&str, usize)] = &[
    ("KB", KIB),
    ("MB", MIB),
    ("K", KIB),
    ("M", MIB),
    ("B", 1),
];

/// A hard ceiling on the bytes a [`MemoryPool`](crate::MemoryPool) will hand out.
///
/// # Parsing
/// - `"512K"` or `"512KB"` → 512 × 1024 bytes
/// - `"1M"` or `"1MB"` → 1024² bytes
/// - `"4096"` or `"4096B"` → raw byte count
///
/// # Examples
/// ```
/// use memory_manager::MemoryBudget;
///
/// let b = MemoryBudget::parse("1M").unwrap();
/// assert_eq!(b, MemoryBudget::default());
/// assert_eq!(MemoryBudget::parse("64k").unwrap().as_bytes(), 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    /// Size of the device heap the engine was designed around.
    pub const DEVICE_HEAP: MemoryBudget = MemoryBudget { bytes: MIB };

    /// Creates a budget from a byte count.
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Creates a budget from kibibytes.
    pub fn from_kb(kb: usize) -> Self {
        Self { bytes: kb * KIB }
    }

    /// Creates a budget from mebibytes.
    pub fn from_mb(mb: usize) -> Self {
        Self { bytes: mb * MIB }
    }

    /// Returns the budget in bytes.
    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Returns the budget in kibibytes (truncated).
    pub fn as_kb(&self) -> usize {
        self.bytes / KIB
    }

    /// Parses a human-readable budget string. Case-insensitive; surrounding
    /// whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, MemoryError> {
        let trimmed = s.trim();
        let invalid = |detail: &str| MemoryError::InvalidBudget {
            input: s.to_string(),
            detail: detail.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty string"));
        }

        let upper = trimmed.to_uppercase();
        let (digits, multiplier) = SUFFIXES
            .iter()
            .find_map(|&(suffix, mult)| {
                upper
                    .strip_suffix(suffix)
                    .map(|rest| (rest.trim().to_string(), mult))
            })
            .unwrap_or((upper.clone(), 1));

        let value: usize = digits
            .parse()
            .map_err(|_| invalid("expected a number followed by an optional K/M suffix"))?;

        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("value overflows usize"))?;

        if bytes == 0 {
            return Err(invalid("budget must be non-zero"));
        }

        Ok(Self { bytes })
    }
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self::DEVICE_HEAP
    }
}

impl fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes >= MIB && self.bytes % MIB == 0 {
            write!(f, "{} MB", self.bytes / MIB)
        } else if self.bytes >= KIB && self.bytes % KIB == 0 {
            write!(f, "{} KB", self.bytes / KIB)
        } else {
            write!(f, "{} B", self.bytes)
        }
    }
}
