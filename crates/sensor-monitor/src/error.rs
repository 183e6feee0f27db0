// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for sensor and clock access.

/// Errors that can occur when reading host sensors or building a clock.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// Failed to read a procfs or sysfs file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse a numeric value from a system file.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// The expected system file does not exist on this host.
    #[error("system path not found: {path}")]
    NotAvailable { path: String },

    /// A tick source was configured with a zero frequency.
    #[error("tick rate must be positive (got {0} Hz)")]
    InvalidTickRate(u32),
}
