// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared helper for reading small kernel pseudo-files.

use crate::SensorError;
use std::path::Path;

/// Reads a sysfs/procfs file and returns its trimmed content.
pub(crate) fn read_trimmed(path: &Path) -> Result<String, SensorError> {
    if !path.exists() {
        return Err(SensorError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| SensorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = read_trimmed(Path::new("/nonexistent/ctx_infer/file"));
        assert!(matches!(result, Err(SensorError::NotAvailable { .. })));
    }

    #[test]
    fn test_trims_content() {
        let dir = std::env::temp_dir().join("ctx_infer_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("procfs_trim");
        std::fs::write(&path, "  0-3\n").unwrap();
        assert_eq!(read_trimmed(&path).unwrap(), "0-3");
        let _ = std::fs::remove_file(&path);
    }
}
