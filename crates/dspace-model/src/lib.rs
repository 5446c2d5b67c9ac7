//! Export asset model for Design Space documents.
//!
//! Mirrors the export configuration the host keeps per document: a list of
//! [`ExportAsset`]s for the document itself and one per layer, held in an
//! immutable [`DocumentExports`] aggregate.

pub mod asset;
pub mod collection;
pub mod descriptors;
pub mod document;
pub mod enums;
pub mod error;
pub mod exports;
pub mod ids;
mod memo;
pub mod presets;

pub use asset::{AssetProps, ExportAsset, Scale};
pub use descriptors::{DocumentDescriptor, ExportsPayload, LayerDescriptor};
pub use document::{Document, Layer};
pub use enums::{ExportFormat, ExportStatus};
pub use error::{ModelError, Result};
pub use exports::{AssetGroup, AssetList, DocumentExports, ExportOutcome};
pub use ids::LayerId;
pub use presets::ExportPreset;
