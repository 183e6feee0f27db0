// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Arg-max over a score vector.

/// Returns the index of the largest value in `values`.
///
/// Ties resolve to the lowest index: a later element only wins if it is
/// strictly greater. `NaN` entries never win unless they are first.
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let (&first, rest) = values.split_first()?;
    let mut best_idx = 0;
    let mut best = first;
    for (i, &v) in rest.iter().enumerate() {
        if v > best {
            best = v;
            best_idx = i + 1;
        }
    }
    Some(best_idx)
}
