// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Source format detection and the descriptive metadata record.
//!
//! Neither is consulted by the forward pass. The format tag only records
//! what the source bytes *look like*; the network itself is always the
//! built-in topology.

use crate::RuntimeModel;

/// Little-endian `u32` read from the first four bytes of an ONNX file.
pub const ONNX_MAGIC: u32 = 0x0892_A9FF;

/// First four bytes of a TensorFlow Lite flatbuffer.
pub const TFLITE_MAGIC: &[u8; 4] = b"TFL3";

/// Longest name kept in [`ModelMetadata::name`], in characters.
pub const MAX_NAME_LEN: usize = 63;

/// Format tag detected by magic-byte sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Onnx,
    Tflite,
    Custom,
}

impl ModelFormat {
    /// Classifies `bytes` by their first four bytes.
    ///
    /// Inputs shorter than four bytes are `Custom`.
    ///
    /// ```
    /// use model_ir::ModelFormat;
    ///
    /// assert_eq!(ModelFormat::sniff(&[0xFF, 0xA9, 0x92, 0x08, 0x00]), ModelFormat::Onnx);
    /// assert_eq!(ModelFormat::sniff(b"TFL3...."), ModelFormat::Tflite);
    /// assert_eq!(ModelFormat::sniff(b"TFL"), ModelFormat::Custom);
    /// ```
    pub fn sniff(bytes: &[u8]) -> Self {
        let Some(&[a, b, c, d]) = bytes.get(..4) else {
            return Self::Custom;
        };
        let head = [a, b, c, d];
        if u32::from_le_bytes(head) == ONNX_MAGIC {
            Self::Onnx
        } else if &head == TFLITE_MAGIC {
            Self::Tflite
        } else {
            Self::Custom
        }
    }

    /// `true` for formats that name a real third-party graph encoding.
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Onnx | Self::Tflite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onnx => "ONNX",
            Self::Tflite => "TFLITE",
            Self::Custom => "CUSTOM",
        }
    }
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive record of a loaded model.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModelMetadata {
    /// Source name, truncated to [`MAX_NAME_LEN`] characters.
    pub name: String,
    pub format: ModelFormat,
    pub version: u32,
    /// Input tensors; not a dense layer.
    pub input_layers: u32,
    /// Dense layers producing the model output.
    pub output_layers: u32,
    /// Hidden dense layers.
    pub intermediate_layers: u32,
    /// Weights plus biases across all layers.
    pub total_weights: u32,
    /// Length of the source in bytes.
    pub model_size: u32,
    /// `true` when the network was not decoded from `format`, i.e. the tag
    /// is descriptive only.
    pub format_is_informational: bool,
}

impl ModelMetadata {
    pub const VERSION: u32 = 1;

    /// Builds the record for `model`, which was constructed from a source
    /// named `name` of `model_size` bytes sniffed as `format`.
    pub fn describe(name: &str, format: ModelFormat, model: &RuntimeModel, model_size: u32) -> Self {
        let layers = model.num_layers() as u32;
        Self {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            format,
            version: Self::VERSION,
            input_layers: 1,
            output_layers: 1,
            intermediate_layers: layers.saturating_sub(1),
            total_weights: u32::try_from(model.parameter_count()).unwrap_or(u32::MAX),
            model_size,
            format_is_informational: true,
        }
    }

    /// Dense layers implied by the record: hidden plus output.
    pub fn num_layers(&self) -> u32 {
        self.intermediate_layers + self.output_layers
    }

    pub fn summary(&self) -> String {
        format!(
            "{} [{}{}] v{}, {} layers, {} weights, {} bytes",
            self.name,
            self.format,
            if self.format_is_informational { ", demo network" } else { "" },
            self.version,
            self.num_layers(),
            self.total_weights,
            self.model_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayerDescriptor, LayerSpec};
    use memory_manager::MemoryPool;
    use tensor_core::Activation;

    #[test]
    fn test_sniff_onnx() {
        let bytes = ONNX_MAGIC.to_le_bytes();
        assert_eq!(ModelFormat::sniff(&bytes), ModelFormat::Onnx);
        // Big-endian order is not ONNX.
        assert_eq!(ModelFormat::sniff(&ONNX_MAGIC.to_be_bytes()), ModelFormat::Custom);
    }

    #[test]
    fn test_sniff_tflite() {
        assert_eq!(ModelFormat::sniff(b"TFL3"), ModelFormat::Tflite);
        assert_eq!(ModelFormat::sniff(b"TFL3\x00\x01\x02"), ModelFormat::Tflite);
        assert_eq!(ModelFormat::sniff(b"tfl3"), ModelFormat::Custom);
    }

    #[test]
    fn test_sniff_short_input() {
        assert_eq!(ModelFormat::sniff(&[]), ModelFormat::Custom);
        assert_eq!(ModelFormat::sniff(&[0xFF, 0xA9, 0x92]), ModelFormat::Custom);
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(ModelFormat::Tflite.to_string(), "TFLITE");
        assert!(ModelFormat::Onnx.is_foreign());
        assert!(!ModelFormat::Custom.is_foreign());
        assert_eq!(serde_json::to_string(&ModelFormat::Onnx).unwrap(), "\"onnx\"");
    }

    #[test]
    fn test_describe() {
        let pool = MemoryPool::default();
        let mut model = RuntimeModel::new();
        for (i, (inp, out)) in [(4, 8), (8, 6), (6, 4)].into_iter().enumerate() {
            let layer = LayerDescriptor::allocate(&pool, LayerSpec::new(inp, out, Activation::Relu), i).unwrap();
            model.push_layer(layer).unwrap();
        }

        let meta = ModelMetadata::describe("model.bin", ModelFormat::Custom, &model, 6);
        assert_eq!(meta.version, 1);
        assert_eq!(meta.input_layers, 1);
        assert_eq!(meta.intermediate_layers, 2);
        assert_eq!(meta.num_layers(), model.num_layers() as u32);
        assert_eq!(meta.total_weights, 122);
        assert_eq!(meta.model_size, 6);
        assert!(meta.summary().contains("CUSTOM"));
    }

    #[test]
    fn test_layer_counts_track_model() {
        let pool = MemoryPool::default();
        let mut model = RuntimeModel::new();
        for i in 0..5 {
            let layer = LayerDescriptor::allocate(&pool, LayerSpec::new(3, 3, Activation::Relu), i).unwrap();
            model.push_layer(layer).unwrap();
        }
        let meta = ModelMetadata::describe("deep.bin", ModelFormat::Custom, &model, 1);
        assert_eq!(meta.intermediate_layers, 4);
        assert_eq!(meta.num_layers(), 5);
    }

    #[test]
    fn test_name_truncated() {
        let long = "m".repeat(200);
        let meta = ModelMetadata::describe(&long, ModelFormat::Custom, &RuntimeModel::new(), 1);
        assert_eq!(meta.name.chars().count(), MAX_NAME_LEN);
    }
}
