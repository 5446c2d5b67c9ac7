//! A single configured export target.
//!
//! `ExportAsset` is an immutable value: every update returns a new asset and
//! leaves the original untouched. The filename suffix follows the scale
//! (`@2x` for scale 2) until the user edits it, after which scale changes no
//! longer touch it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enums::{ExportFormat, ExportStatus};
use crate::error::{ModelError, Result};

/// Positive multiplier applied to the layer bounds when exporting.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    pub const ONE: Scale = Scale(1.0);

    /// Canonical scale choices, in menu order.
    pub const PRESETS: [Scale; 8] = [
        Scale(1.0),
        Scale(2.0),
        Scale(3.0),
        Scale(4.0),
        Scale(5.0),
        Scale(0.5),
        Scale(0.75),
        Scale(1.5),
    ];

    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidScale(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// The suffix an asset at this scale gets unless the user overrides it.
    pub fn derived_suffix(self) -> String {
        format!("@{self}x")
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for Scale {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Scale {
    type Err = ModelError;

    /// Accepts `2`, `0.5` and the menu spelling `2x`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix(['x', 'X'])
            .unwrap_or(trimmed)
            .parse::<f64>()
            .map_err(|_| ModelError::UnparsableScale(s.to_string()))?;
        Self::new(number)
    }
}

/// A partial set of asset properties.
///
/// Used both as the raw shape of an `exportAssets` descriptor entry and as
/// the argument of a merge, where an absent field means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl AssetProps {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ExportStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One export target of a layer or of the document root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AssetProps")]
pub struct ExportAsset {
    scale: Scale,
    suffix: String,
    format: ExportFormat,
    status: ExportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<PathBuf>,
}

impl ExportAsset {
    /// Builds a fresh asset. Missing properties take their defaults and a
    /// missing suffix is derived from the scale.
    pub fn new(props: AssetProps) -> Self {
        let scale = props.scale.unwrap_or_default();
        Self {
            scale,
            suffix: props.suffix.unwrap_or_else(|| scale.derived_suffix()),
            format: props.format.unwrap_or_default(),
            status: props.status.unwrap_or_default(),
            file_path: props.file_path,
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn status(&self) -> ExportStatus {
        self.status
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// True when the suffix differs from the one derived from the current scale.
    pub fn suffix_customized(&self) -> bool {
        self.suffix != self.scale.derived_suffix()
    }

    /// Applies a partial update.
    ///
    /// A scale change re-derives the suffix only when the suffix was not
    /// customized before the merge and the update does not set one itself.
    #[must_use]
    pub fn merge_props(&self, props: &AssetProps) -> Self {
        let follow_scale =
            props.scale.is_some() && props.suffix.is_none() && !self.suffix_customized();
        let mut next = self.clone();
        if let Some(scale) = props.scale {
            next.scale = scale;
        }
        if let Some(suffix) = &props.suffix {
            next.suffix.clone_from(suffix);
        }
        if let Some(format) = props.format {
            next.format = format;
        }
        if let Some(status) = props.status {
            next.status = status;
        }
        if let Some(path) = &props.file_path {
            next.file_path = Some(path.clone());
        }
        if follow_scale {
            next.suffix = next.scale.derived_suffix();
        }
        next
    }

    /// Returns a copy whose suffix is the derived one, dropping any customization.
    #[must_use]
    pub fn derive_suffix(&self) -> Self {
        Self {
            suffix: self.scale.derived_suffix(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_status_requested(&self) -> Self {
        self.with_status(ExportStatus::Requested)
    }

    #[must_use]
    pub fn set_status_stable(&self) -> Self {
        self.with_status(ExportStatus::Stable)
    }

    #[must_use]
    pub fn set_status_error(&self) -> Self {
        self.with_status(ExportStatus::Error)
    }

    fn with_status(&self, status: ExportStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Two assets are similar when they would produce the same file: scale,
    /// suffix and format match. Status and file path are ignored.
    pub fn similar(&self, other: &ExportAsset) -> bool {
        self.scale == other.scale && self.suffix == other.suffix && self.format == other.format
    }

    /// File name produced for a layer or document named `base`.
    pub fn file_name(&self, base: &str) -> String {
        format!("{base}{}.{}", self.suffix, self.format.extension())
    }

    /// Full property set, as written back into a host descriptor.
    pub fn to_props(&self) -> AssetProps {
        AssetProps {
            scale: Some(self.scale),
            suffix: Some(self.suffix.clone()),
            format: Some(self.format),
            status: Some(self.status),
            file_path: self.file_path.clone(),
        }
    }
}

impl Default for ExportAsset {
    fn default() -> Self {
        Self::new(AssetProps::default())
    }
}

impl From<AssetProps> for ExportAsset {
    fn from(props: AssetProps) -> Self {
        Self::new(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(value: f64) -> Scale {
        Scale::new(value).unwrap()
    }

    #[test]
    fn test_new_derives_missing_suffix() {
        let asset = ExportAsset::new(AssetProps::new().with_scale(scale(0.5)));
        assert_eq!(asset.suffix(), "@0.5x");
        assert_eq!(asset.format(), ExportFormat::Png);
        assert_eq!(asset.status(), ExportStatus::New);
        assert!(!asset.suffix_customized());

        let default = ExportAsset::default();
        assert_eq!(default.scale(), Scale::ONE);
        assert_eq!(default.suffix(), "@1x");
    }

    #[test]
    fn test_customized_suffix_survives_scale_change() {
        let original =
            ExportAsset::new(AssetProps::new().with_scale(scale(2.0)).with_suffix("@2x"));
        assert!(!original.suffix_customized());

        let custom = original.merge_props(&AssetProps::new().with_suffix("icon"));
        assert!(custom.suffix_customized());

        let rescaled_custom = custom.merge_props(&AssetProps::new().with_scale(scale(3.0)));
        assert_eq!(rescaled_custom.suffix(), "icon");

        let rescaled = original.merge_props(&AssetProps::new().with_scale(scale(3.0)));
        assert_eq!(rescaled.suffix(), "@3x");
        assert_eq!(original.suffix(), "@2x");
    }

    #[test]
    fn test_explicit_suffix_wins_over_derivation() {
        let original = ExportAsset::default();
        let merged =
            original.merge_props(&AssetProps::new().with_scale(scale(2.0)).with_suffix("-large"));
        assert_eq!(merged.suffix(), "-large");
        assert_eq!(merged.scale(), scale(2.0));
    }

    #[test]
    fn test_derive_suffix_discards_customization() {
        let custom =
            ExportAsset::new(AssetProps::new().with_scale(scale(4.0)).with_suffix("big"));
        let derived = custom.derive_suffix();
        assert_eq!(derived.suffix(), "@4x");
        assert!(!derived.suffix_customized());
    }

    #[test]
    fn test_status_transitions_are_unguarded() {
        let asset = ExportAsset::default();
        let failed = asset.set_status_requested().set_status_error();
        assert_eq!(failed.status(), ExportStatus::Error);
        let retried = failed.set_status_requested();
        assert_eq!(retried.status(), ExportStatus::Requested);
        assert_eq!(retried.set_status_stable().status(), ExportStatus::Stable);
        assert_eq!(asset.set_status_stable().status(), ExportStatus::Stable);
    }

    #[test]
    fn test_similar_ignores_status_and_path() {
        let a = ExportAsset::new(AssetProps::new().with_scale(scale(2.0)));
        let b = a
            .set_status_stable()
            .merge_props(&AssetProps::new().with_file_path("/tmp/out@2x.png"));
        assert!(a.similar(&b));
        assert_ne!(a, b);
        let c = a.merge_props(&AssetProps::new().with_format(ExportFormat::Jpg));
        assert!(!a.similar(&c));
    }

    #[test]
    fn test_file_name() {
        let asset = ExportAsset::new(
            AssetProps::new()
                .with_scale(scale(1.5))
                .with_format(ExportFormat::Jpg),
        );
        assert_eq!(asset.file_name("hero"), "hero@1.5x.jpg");
    }

    #[test]
    fn test_scale_parsing() {
        assert_eq!("2x".parse::<Scale>().unwrap(), scale(2.0));
        assert_eq!("0.75".parse::<Scale>().unwrap(), scale(0.75));
        assert!(matches!("0".parse::<Scale>(), Err(ModelError::InvalidScale(_))));
        assert!(matches!(
            "big".parse::<Scale>(),
            Err(ModelError::UnparsableScale(_))
        ));
        assert_eq!(Scale::PRESETS[0].derived_suffix(), "@1x");
        assert_eq!(Scale::PRESETS[7].derived_suffix(), "@1.5x");
    }

    #[test]
    fn test_deserialize_from_descriptor_entry() {
        let asset: ExportAsset =
            serde_json::from_str(r#"{"scale": 3, "format": "svg", "status": "stable"}"#).unwrap();
        assert_eq!(asset.suffix(), "@3x");
        assert_eq!(asset.format(), ExportFormat::Svg);
        assert_eq!(asset.status(), ExportStatus::Stable);
        assert!(serde_json::from_str::<ExportAsset>(r#"{"scale": -1}"#).is_err());
    }

    #[test]
    fn test_props_is_empty() {
        assert!(AssetProps::new().is_empty());
        assert!(!AssetProps::new().with_format(ExportFormat::Pdf).is_empty());
        assert!(!AssetProps::new().with_file_path("out/a.png").is_empty());
    }
}
