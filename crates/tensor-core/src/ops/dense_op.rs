// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dense (fully-connected) matrix-vector product.

use crate::{Activation, TensorError};

/// Computes `output = weights · input + biases`.
///
/// `weights` is row-major with `output.len()` rows and `input.len()`
/// columns; `biases` has one entry per output row. The bias is added after
/// the full row has been accumulated. No activation is applied here, see
/// [`apply_activation`].
///
/// # Errors
/// Returns [`TensorError::LengthMismatch`] if `weights` or `biases` do not
/// match the dimensions implied by `input` and `output`.
/// Returns [`TensorError::EmptyInput`] if either vector is empty.
pub fn dense(
    weights: &[f32],
    biases: &[f32],
    input: &[f32],
    output: &mut [f32],
) -> Result<(), TensorError> {
    let in_features = input.len();
    let out_features = output.len();

    if in_features == 0 || out_features == 0 {
        return Err(TensorError::EmptyInput { op: "dense" });
    }
    if weights.len() != in_features * out_features {
        return Err(TensorError::LengthMismatch {
            op: "dense",
            operand: "weights",
            expected: in_features * out_features,
            actual: weights.len(),
        });
    }
    if biases.len() != out_features {
        return Err(TensorError::LengthMismatch {
            op: "dense",
            operand: "biases",
            expected: out_features,
            actual: biases.len(),
        });
    }

    for ((out, row), &bias) in output
        .iter_mut()
        .zip(weights.chunks_exact(in_features))
        .zip(biases)
    {
        let acc: f32 = row.iter().zip(input).map(|(w, x)| w * x).sum();
        *out = acc + bias;
    }

    Ok(())
}

/// Applies `activation` to every element of `values` in place.
pub fn apply_activation(values: &mut [f32], activation: Activation) {
    if activation == Activation::Linear {
        return;
    }
    for v in values.iter_mut() {
        *v = activation.apply(*v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_2x3() {
        // W = [[1, 2, 3], [4, 5, 6]], x = [1, 0, -1], b = [0.5, -0.5]
        let w = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [0.5, -0.5];
        let x = [1.0, 0.0, -1.0];
        let mut y = [0.0; 2];

        dense(&w, &b, &x, &mut y).unwrap();
        assert_eq!(y, [-1.5, -2.5]);
    }

    #[test]
    fn test_dense_overwrites_output() {
        let w = [2.0];
        let b = [1.0];
        let mut y = [123.0];
        dense(&w, &b, &[3.0], &mut y).unwrap();
        assert_eq!(y, [7.0]);
    }

    #[test]
    fn test_dense_weight_mismatch() {
        let mut y = [0.0; 2];
        let err = dense(&[1.0; 5], &[0.0; 2], &[1.0; 3], &mut y).unwrap_err();
        assert!(matches!(
            err,
            TensorError::LengthMismatch { operand: "weights", expected: 6, actual: 5, .. }
        ));
    }

    #[test]
    fn test_dense_bias_mismatch() {
        let mut y = [0.0; 2];
        let err = dense(&[1.0; 6], &[0.0; 3], &[1.0; 3], &mut y).unwrap_err();
        assert!(matches!(err, TensorError::LengthMismatch { operand: "biases", .. }));
    }

    #[test]
    fn test_dense_empty() {
        let mut y: [f32; 0] = [];
        assert_eq!(
            dense(&[], &[], &[1.0], &mut y),
            Err(TensorError::EmptyInput { op: "dense" })
        );
    }

    #[test]
    fn test_apply_activation_relu() {
        let mut v = [-1.0, 0.5, -0.0, 2.0];
        apply_activation(&mut v, Activation::Relu);
        assert_eq!(v, [0.0, 0.5, 0.0, 2.0]);
    }

    #[test]
    fn test_apply_activation_linear_is_identity() {
        let mut v = [-1.0, 0.5, 42.0];
        apply_activation(&mut v, Activation::Linear);
        assert_eq!(v, [-1.0, 0.5, 42.0]);
    }

    #[test]
    fn test_apply_activation_sigmoid_saturation() {
        let mut v = [11.0, -11.0, 0.0];
        apply_activation(&mut v, Activation::Sigmoid);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 0.0);
        assert!((v[2] - 0.5).abs() < 1e-6);
    }
}
