// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Behavioural categories produced by the engine.

use std::fmt;

/// The outcome of one inference.
///
/// A loaded model always yields one of `Idle`, `Working`, `Gaming` or
/// `Sleeping`. `None` means no usable model. The remaining variants are
/// reserved identifiers that [`InferenceEngine`](crate::InferenceEngine)
/// never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    #[default]
    None,
    Idle,
    Working,
    Gaming,
    Sleeping,
    Anomaly,
    ContextSwitch,
    LearnPattern,
}

impl Decision {
    /// The categories a loaded model can produce, in class-index order.
    pub const CLASSES: [Decision; 4] = [
        Decision::Idle,
        Decision::Working,
        Decision::Gaming,
        Decision::Sleeping,
    ];

    /// Every variant, reserved ones included.
    pub const ALL: [Decision; 8] = [
        Decision::None,
        Decision::Idle,
        Decision::Working,
        Decision::Gaming,
        Decision::Sleeping,
        Decision::Anomaly,
        Decision::ContextSwitch,
        Decision::LearnPattern,
    ];

    /// Maps an output class index to its category. Indices past the four
    /// known classes map to `None`.
    pub fn from_class_index(index: usize) -> Self {
        Self::CLASSES.get(index).copied().unwrap_or(Self::None)
    }

    /// Inverse of [`from_class_index`](Self::from_class_index).
    pub fn class_index(&self) -> Option<usize> {
        Self::CLASSES.iter().position(|d| d == self)
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Anomaly | Self::ContextSwitch | Self::LearnPattern)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Gaming => "gaming",
            Self::Sleeping => "sleeping",
            Self::Anomaly => "anomaly",
            Self::ContextSwitch => "context_switch",
            Self::LearnPattern => "learn_pattern",
        }
    }

    /// One-line, user-facing description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "No decision - no model loaded",
            Self::Idle => "Idle mode - waiting for interaction",
            Self::Working => "Work mode - focus on productivity",
            Self::Gaming => "Active mode - touch and movement",
            Self::Sleeping => "Rest mode - power saving",
            Self::Anomaly => "Anomaly detected",
            Self::ContextSwitch => "Context switch",
            Self::LearnPattern => "Learning usage pattern",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_mapping() {
        assert_eq!(Decision::from_class_index(0), Decision::Idle);
        assert_eq!(Decision::from_class_index(1), Decision::Working);
        assert_eq!(Decision::from_class_index(2), Decision::Gaming);
        assert_eq!(Decision::from_class_index(3), Decision::Sleeping);
        assert_eq!(Decision::from_class_index(4), Decision::None);
        assert_eq!(Decision::from_class_index(usize::MAX), Decision::None);
    }

    #[test]
    fn test_class_index_inverse() {
        for (i, d) in Decision::CLASSES.iter().enumerate() {
            assert_eq!(d.class_index(), Some(i));
        }
        assert_eq!(Decision::None.class_index(), None);
        assert_eq!(Decision::Anomaly.class_index(), None);
    }

    #[test]
    fn test_reserved() {
        let reserved: Vec<_> = Decision::ALL.iter().filter(|d| d.is_reserved()).collect();
        assert_eq!(reserved.len(), 3);
        assert!(Decision::CLASSES.iter().all(|d| !d.is_reserved()));
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Decision::ContextSwitch.to_string(), "context_switch");
        assert_eq!(
            serde_json::to_string(&Decision::Sleeping).unwrap(),
            "\"sleeping\""
        );
        let back: Decision = serde_json::from_str("\"gaming\"").unwrap();
        assert_eq!(back, Decision::Gaming);
    }

    #[test]
    fn test_descriptions_distinct() {
        let mut seen = std::collections::HashSet::new();
        for d in Decision::ALL {
            assert!(seen.insert(d.description()));
        }
    }
}
