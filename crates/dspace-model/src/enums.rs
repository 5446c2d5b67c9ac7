//! Closed option sets for export assets.
//!
//! These mirror the values the host writes into `exportAssets` descriptors
//! and the choices offered by the export panel dropdowns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Output file format of an export asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ExportFormat {
    /// Formats in the order they are offered to the user.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Jpg,
        ExportFormat::Svg,
        ExportFormat::Pdf,
    ];

    /// Returns the wire name, which doubles as the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ModelError;

    /// Case-insensitive; accepts `jpeg` as an alias of `jpg`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ModelError::UnknownFormat(s.to_string())),
        }
    }
}

/// Lifecycle of a single export asset.
///
/// `New` is the initial state. `Requested` means an export is in flight;
/// it settles to `Stable` on success or `Error` on failure. Any state may be
/// re-requested, which is how a failed export is retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    #[default]
    New,
    Requested,
    Stable,
    Error,
}

impl ExportStatus {
    pub const ALL: [ExportStatus; 4] = [
        ExportStatus::New,
        ExportStatus::Requested,
        ExportStatus::Stable,
        ExportStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStatus::New => "new",
            ExportStatus::Requested => "requested",
            ExportStatus::Stable => "stable",
            ExportStatus::Error => "error",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, ExportStatus::Requested)
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(ExportStatus::New),
            "requested" => Ok(ExportStatus::Requested),
            "stable" => Ok(ExportStatus::Stable),
            "error" => Ok(ExportStatus::Error),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}
