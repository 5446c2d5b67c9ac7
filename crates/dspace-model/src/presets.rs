//! Batches of export assets added in one step from the export panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::asset::{AssetProps, Scale};
use crate::enums::ExportFormat;
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportPreset {
    /// 1x, 2x and 3x PNGs with `@Nx` suffixes.
    Ios,
    /// The six Android density buckets, ldpi through xxxhdpi.
    Android,
}

const ANDROID_DENSITIES: [(f64, &str); 6] = [
    (0.75, "-ldpi"),
    (1.0, "-mdpi"),
    (1.5, "-hdpi"),
    (2.0, "-xhdpi"),
    (3.0, "-xxhdpi"),
    (4.0, "-xxxhdpi"),
];

impl ExportPreset {
    pub const ALL: [ExportPreset; 2] = [ExportPreset::Ios, ExportPreset::Android];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPreset::Ios => "ios",
            ExportPreset::Android => "android",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportPreset::Ios => "iOS",
            ExportPreset::Android => "Android",
        }
    }

    /// Properties of the assets this preset adds, in insertion order.
    pub fn assets(&self) -> Vec<AssetProps> {
        match self {
            ExportPreset::Ios => Scale::PRESETS[..3]
                .iter()
                .map(|&scale| {
                    AssetProps::new()
                        .with_scale(scale)
                        .with_format(ExportFormat::Png)
                })
                .collect(),
            ExportPreset::Android => ANDROID_DENSITIES
                .iter()
                .filter_map(|&(value, suffix)| {
                    let scale = Scale::new(value).ok()?;
                    Some(
                        AssetProps::new()
                            .with_scale(scale)
                            .with_suffix(suffix)
                            .with_format(ExportFormat::Png),
                    )
                })
                .collect(),
        }
    }
}

impl fmt::Display for ExportPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ExportPreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(ExportPreset::Ios),
            "android" => Ok(ExportPreset::Android),
            _ => Err(ModelError::UnknownPreset(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExportAsset;

    #[test]
    fn test_ios_preset_uses_derived_suffixes() {
        let suffixes: Vec<String> = ExportPreset::Ios
            .assets()
            .into_iter()
            .map(|props| ExportAsset::new(props).suffix().to_string())
            .collect();
        assert_eq!(suffixes, vec!["@1x", "@2x", "@3x"]);
    }

    #[test]
    fn test_android_preset_has_custom_suffixes() {
        let assets: Vec<ExportAsset> = ExportPreset::Android
            .assets()
            .into_iter()
            .map(ExportAsset::new)
            .collect();
        assert_eq!(assets.len(), 6);
        assert_eq!(assets[0].suffix(), "-ldpi");
        assert!(assets.iter().all(ExportAsset::suffix_customized));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("iOS".parse::<ExportPreset>().unwrap(), ExportPreset::Ios);
        assert!("windows".parse::<ExportPreset>().is_err());
    }
}
