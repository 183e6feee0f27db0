// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed programmatically.
//!
//! Leaving out `model_path` selects the built-in context awareness model.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/context.bin"
//! memory_budget = "1M"
//! format_policy = "permissive"
//! sensor_source = "simulated"
//! tick_hz = 100
//! enable_stats = true
//! ```

use crate::LoadError;
use memory_manager::MemoryBudget;
use sensor_monitor::{HostSensors, SensorProvider, SimulatedSensors, SystemTicks};
use std::path::{Path, PathBuf};

/// What to do with a source whose magic bytes name a foreign format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPolicy {
    /// Build the demo network anyway, flagged as informational.
    #[default]
    Permissive,
    /// Reject ONNX and TFLite sources with `UnsupportedFormat`.
    Strict,
}

/// Where sensor readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorSource {
    #[default]
    Simulated,
    Host,
}

impl SensorSource {
    /// Parses `"simulated"`/`"sim"` or `"host"`, case-insensitively.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" => Some(Self::Simulated),
            "host" => Some(Self::Host),
            _ => None,
        }
    }

    /// Creates the matching provider.
    pub fn provider(&self) -> Box<dyn SensorProvider> {
        match self {
            Self::Simulated => Box::new(SimulatedSensors::new()),
            Self::Host => Box::new(HostSensors::new()),
        }
    }
}

/// Configuration for the loader, engine and CLI.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Path to the model file; `None` for the built-in model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
    /// Allocator budget (human-readable, e.g. `"1M"`, `"512K"`).
    #[serde(default = "default_budget")]
    pub memory_budget: String,
    #[serde(default)]
    pub format_policy: FormatPolicy,
    #[serde(default)]
    pub sensor_source: SensorSource,
    /// Tick source frequency in Hz.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// Whether the engine keeps [`InferenceStats`](crate::InferenceStats).
    #[serde(default = "default_true")]
    pub enable_stats: bool,
}

fn default_budget() -> String {
    "1M".to_string()
}

fn default_tick_hz() -> u32 {
    sensor_monitor::DEFAULT_TICK_HZ
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, LoadError> {
        toml::from_str(toml_str).map_err(|e| LoadError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, LoadError> {
        toml::to_string_pretty(self)
            .map_err(|e| LoadError::Config(format!("TOML serialise error: {e}")))
    }

    /// Parses the memory budget string into a [`MemoryBudget`].
    pub fn parse_budget(&self) -> Result<MemoryBudget, LoadError> {
        MemoryBudget::parse(&self.memory_budget)
            .map_err(|e| LoadError::Config(format!("invalid budget: {e}")))
    }

    /// Creates the tick source at the configured rate.
    pub fn tick_source(&self) -> Result<SystemTicks, LoadError> {
        SystemTicks::new(self.tick_hz).map_err(|e| LoadError::Config(e.to_string()))
    }

    /// The model path as the `&str` key storage providers use, or `None`
    /// for the built-in model.
    pub fn model_key(&self) -> Result<Option<&str>, LoadError> {
        self.model_path
            .as_deref()
            .map(|path| {
                path.to_str().ok_or_else(|| {
                    LoadError::InvalidArgument(format!(
                        "model path is not valid UTF-8: {}",
                        path.display()
                    ))
                })
            })
            .transpose()
    }

    /// Human-readable name of the configured model.
    pub fn model_label(&self) -> String {
        match &self.model_path {
            Some(path) => path.display().to_string(),
            None => crate::BUILTIN_MODEL_NAME.to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            memory_budget: default_budget(),
            format_policy: FormatPolicy::default(),
            sensor_source: SensorSource::default(),
            tick_hz: default_tick_hz(),
            enable_stats: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = EngineConfig::default();
        assert_eq!(c.memory_budget, "1M");
        assert_eq!(c.format_policy, FormatPolicy::Permissive);
        assert_eq!(c.sensor_source, SensorSource::Simulated);
        assert_eq!(c.tick_hz, 100);
        assert!(c.enable_stats);
        assert_eq!(c.model_path, None);
        assert_eq!(c.model_key().unwrap(), None);
        assert_eq!(c.model_label(), crate::BUILTIN_MODEL_NAME);
    }

    #[test]
    fn test_parse_budget() {
        let c = EngineConfig {
            memory_budget: "512K".into(),
            ..Default::default()
        };
        assert_eq!(c.parse_budget().unwrap().as_kb(), 512);

        let bad = EngineConfig {
            memory_budget: "lots".into(),
            ..Default::default()
        };
        assert!(matches!(bad.parse_budget(), Err(LoadError::Config(_))));
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
model_path = "/tmp/model.onnx"
memory_budget = "64K"
format_policy = "strict"
sensor_source = "host"
tick_hz = 1000
enable_stats = false
"#;
        let c = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(c.model_path, Some(PathBuf::from("/tmp/model.onnx")));
        assert_eq!(c.model_key().unwrap(), Some("/tmp/model.onnx"));
        assert_eq!(c.memory_budget, "64K");
        assert_eq!(c.format_policy, FormatPolicy::Strict);
        assert_eq!(c.sensor_source, SensorSource::Host);
        assert_eq!(c.tick_hz, 1000);
        assert!(!c.enable_stats);
    }

    #[test]
    fn test_from_toml_minimal() {
        let c = EngineConfig::from_toml("model_path = \"m.bin\"").unwrap();
        assert_eq!(c.model_path, Some(PathBuf::from("m.bin")));
        assert_eq!(c.memory_budget, "1M");
        assert_eq!(c.tick_hz, 100);
        assert!(c.enable_stats);
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            EngineConfig::from_toml("format_policy = \"lenient\""),
            Err(LoadError::Config(_))
        ));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = EngineConfig {
            format_policy: FormatPolicy::Strict,
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        assert!(toml.contains("format_policy = \"strict\""));
        assert!(!toml.contains("model_path"));
        let back = EngineConfig::from_toml(&toml).unwrap();
        assert_eq!(back.model_path, None);
        assert_eq!(back.format_policy, FormatPolicy::Strict);
        assert_eq!(back.memory_budget, c.memory_budget);
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join("ctx_infer_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.toml");
        std::fs::write(&path, "model_path = \"x.bin\"\ntick_hz = 50\n").unwrap();

        let c = EngineConfig::from_file(&path).unwrap();
        assert_eq!(c.tick_hz, 50);
        assert!(EngineConfig::from_file(&dir.join("missing.toml")).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_zero_tick_rate() {
        let c = EngineConfig {
            tick_hz: 0,
            ..Default::default()
        };
        assert!(matches!(c.tick_source(), Err(LoadError::Config(_))));
    }

    #[test]
    fn test_sensor_source_parse() {
        assert_eq!(SensorSource::from_str_loose("HOST"), Some(SensorSource::Host));
        assert_eq!(SensorSource::from_str_loose("sim"), Some(SensorSource::Simulated));
        assert_eq!(SensorSource::from_str_loose("gps"), None);
        assert_eq!(SensorSource::Host.provider().name(), "host");
    }
}
