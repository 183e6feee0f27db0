// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise activation functions.
//!
//! All functions are scalar and pure; [`apply_activation`](crate::apply_activation)
//! maps them over a slice in place.

/// Magnitude beyond which [`sigmoid`] returns an exact `1.0` or `0.0`.
pub const SIGMOID_SATURATION: f32 = 10.0;

/// The non-linearity applied after a dense layer's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Identity.
    #[default]
    Linear,
    /// `max(0, x)`.
    Relu,
    /// Logistic function with hard saturation at ±[`SIGMOID_SATURATION`].
    Sigmoid,
    /// Hyperbolic tangent, overflow-safe.
    Tanh,
}

impl Activation {
    /// Parses an activation name.
    ///
    /// Accepts the canonical names plus a few common aliases
    /// (`"identity"`, `"none"`, `"logistic"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "identity" | "none" => Some(Self::Linear),
            "relu" => Some(Self::Relu),
            "sigmoid" | "logistic" => Some(Self::Sigmoid),
            "tanh" => Some(Self::Tanh),
            _ => None,
        }
    }

    /// Returns a human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
        }
    }

    /// Applies this activation to a single value.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            Self::Relu => relu(x),
            Self::Sigmoid => sigmoid(x),
            Self::Tanh => tanh(x),
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectified linear unit: `max(0, x)`.
#[inline(always)]
pub fn relu(x: f32) -> f32 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

/// Logistic sigmoid `1 / (1 + e^-x)`.
///
/// Returns exactly `1.0` for `x > 10` and exactly `0.0` for `x < -10`.
#[inline(always)]
pub fn sigmoid(x: f32) -> f32 {
    if x > SIGMOID_SATURATION {
        return 1.0;
    }
    if x < -SIGMOID_SATURATION {
        return 0.0;
    }
    1.0 / (1.0 + (-x).exp())
}

/// Hyperbolic tangent using the two-branch form, which keeps the exponent
/// non-positive in the divisor and never produces `inf / inf`.
#[inline(always)]
pub fn tanh(x: f32) -> f32 {
    if x > 0.0 {
        1.0 - 2.0 / ((2.0 * x).exp() + 1.0)
    } else {
        -1.0 + 2.0 / ((-2.0 * x).exp() + 1.0)
    }
}
