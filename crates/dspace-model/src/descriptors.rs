//! Host document and layer descriptors.
//!
//! The host hands over export configuration as JSON shaped like
//! `{"document": {"exportAssets": [...]}, "layers": [{"layerID": 1, "exportAssets": [...]}]}`.
//! A missing or non-array `exportAssets` reads as an empty list; an entry with
//! badly typed fields is rejected.

use std::io::Read;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::asset::AssetProps;
use crate::error::Result;
use crate::ids::LayerId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportsPayload {
    #[serde(default)]
    pub document: DocumentDescriptor,
    #[serde(default)]
    pub layers: Vec<LayerDescriptor>,
}

impl ExportsPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    #[serde(rename = "documentID", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_export_assets")]
    pub export_assets: Vec<AssetProps>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    #[serde(rename = "layerID")]
    pub layer_id: LayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub artboard: bool,
    #[serde(default)]
    pub export_enabled: bool,
    #[serde(default, deserialize_with = "lenient_export_assets")]
    pub export_assets: Vec<AssetProps>,
}

impl LayerDescriptor {
    pub fn new(layer_id: LayerId) -> Self {
        Self {
            layer_id,
            name: None,
            artboard: false,
            export_enabled: false,
            export_assets: Vec::new(),
        }
    }
}

fn lenient_export_assets<'de, D>(deserializer: D) -> std::result::Result<Vec<AssetProps>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| AssetProps::deserialize(item).map_err(D::Error::custom))
            .collect(),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => {
            warn!(kind = value_kind(&other), "ignoring non-array exportAssets");
            Ok(Vec::new())
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExportFormat;

    #[test]
    fn test_parses_full_payload() {
        let payload = ExportsPayload::from_json(
            r#"{
                "document": {"documentID": 7, "name": "icons", "exportAssets": [{"scale": 2}]},
                "layers": [
                    {"layerID": 1, "name": "logo", "exportEnabled": true,
                     "exportAssets": [{"scale": 1, "format": "jpg"}]},
                    {"layerID": 2, "artboard": true}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(payload.document.document_id, Some(7));
        assert_eq!(payload.document.export_assets.len(), 1);
        assert_eq!(payload.layers.len(), 2);
        assert!(payload.layers[0].export_enabled);
        assert_eq!(
            payload.layers[0].export_assets[0].format,
            Some(ExportFormat::Jpg)
        );
        assert!(payload.layers[1].artboard);
        assert!(payload.layers[1].export_assets.is_empty());
    }

    #[test]
    fn test_non_array_export_assets_read_as_empty() {
        let payload = ExportsPayload::from_json(
            r#"{"layers": [
                {"layerID": 1, "exportAssets": "oops"},
                {"layerID": 2, "exportAssets": null},
                {"layerID": 3, "exportAssets": {"scale": 2}}
            ]}"#,
        )
        .unwrap();
        assert!(payload.document.export_assets.is_empty());
        assert!(
            payload
                .layers
                .iter()
                .all(|layer| layer.export_assets.is_empty())
        );
    }

    #[test]
    fn test_badly_typed_entry_is_rejected() {
        let result = ExportsPayload::from_json(
            r#"{"layers": [{"layerID": 1, "exportAssets": [{"scale": "two"}]}]}"#,
        );
        assert!(result.is_err());
        let result = ExportsPayload::from_json(
            r#"{"layers": [{"layerID": 1, "exportAssets": [{"format": "gif"}]}]}"#,
        );
        assert!(result.is_err());
    }
}
