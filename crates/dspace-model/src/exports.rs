//! Per-document export configuration.
//!
//! `DocumentExports` holds the document-level ("root") export list plus one
//! list per layer. It is immutable: every mutation returns a new instance
//! that shares the untouched lists with its predecessor. Selection queries
//! are memoized per instance, so a new instance always starts with an empty
//! cache.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::asset::{AssetProps, ExportAsset};
use crate::collection::{uniform_value, zip_longest};
use crate::descriptors::{DocumentDescriptor, ExportsPayload, LayerDescriptor};
use crate::document::{Document, Layer};
use crate::ids::LayerId;
use crate::memo::SelectionMemo;
use crate::presets::ExportPreset;

/// An ordered, shared list of assets.
pub type AssetList = Arc<[ExportAsset]>;

/// One row across a layer selection: the `i`-th asset of each layer, or
/// `None` where a layer has fewer assets.
pub type AssetGroup = Vec<Option<ExportAsset>>;

/// What the export pipeline reports back for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written to this path.
    Written(PathBuf),
    Failed,
}

impl ExportOutcome {
    fn apply(&self, asset: &ExportAsset) -> ExportAsset {
        match self {
            ExportOutcome::Written(path) => asset
                .merge_props(&AssetProps::new().with_file_path(path.clone()))
                .set_status_stable(),
            ExportOutcome::Failed => asset.set_status_error(),
        }
    }
}

#[derive(Debug, Default)]
struct QueryCache {
    asset_groups: SelectionMemo<Arc<[AssetGroup]>>,
    uniform_assets: SelectionMemo<Arc<[Option<ExportAsset>]>>,
    uniform_assets_only: SelectionMemo<Arc<[ExportAsset]>>,
    last_uniform_index: SelectionMemo<Option<usize>>,
}

impl QueryCache {
    fn len(&self) -> usize {
        self.asset_groups.len()
            + self.uniform_assets.len()
            + self.uniform_assets_only.len()
            + self.last_uniform_index.len()
    }
}

#[derive(Debug)]
pub struct DocumentExports {
    root_exports: AssetList,
    layer_exports: BTreeMap<LayerId, AssetList>,
    layer_ids_with_exports: BTreeSet<LayerId>,
    cache: QueryCache,
}

impl DocumentExports {
    pub fn new(root_exports: AssetList, layer_exports: BTreeMap<LayerId, AssetList>) -> Self {
        let layer_ids_with_exports = layer_exports
            .iter()
            .filter(|(_, assets)| !assets.is_empty())
            .map(|(id, _)| *id)
            .collect();
        Self {
            root_exports,
            layer_exports,
            layer_ids_with_exports,
            cache: QueryCache::default(),
        }
    }

    /// Builds the aggregate from host descriptors. Every layer descriptor
    /// gets an entry, empty when it carries no assets.
    pub fn from_descriptors(payload: &ExportsPayload) -> Self {
        let root_exports = build_list(&payload.document.export_assets);
        let layer_exports: BTreeMap<LayerId, AssetList> = payload
            .layers
            .iter()
            .map(|layer| (layer.layer_id, build_list(&layer.export_assets)))
            .collect();
        let exports = Self::new(root_exports, layer_exports);
        debug!(
            root_assets = exports.root_exports.len(),
            layers = exports.layer_exports.len(),
            layers_with_exports = exports.layer_ids_with_exports.len(),
            "hydrated document exports"
        );
        exports
    }

    /// Writes the aggregate back into descriptor form. Layers follow the
    /// document's order; layers unknown to the document come last.
    pub fn to_payload(&self, document: &Document) -> ExportsPayload {
        let mut layers: Vec<LayerDescriptor> = document
            .layers()
            .iter()
            .map(|layer| LayerDescriptor {
                layer_id: layer.id,
                name: layer.name.clone(),
                artboard: layer.artboard,
                export_enabled: layer.export_enabled,
                export_assets: self
                    .get_layer_exports(layer.id)
                    .map(to_props_list)
                    .unwrap_or_default(),
            })
            .collect();
        for (id, assets) in &self.layer_exports {
            if document.layer(*id).is_none() {
                let mut descriptor = LayerDescriptor::new(*id);
                descriptor.export_assets = to_props_list(assets);
                layers.push(descriptor);
            }
        }
        ExportsPayload {
            document: DocumentDescriptor {
                document_id: document.id,
                name: document.name.clone(),
                export_assets: to_props_list(&self.root_exports),
            },
            layers,
        }
    }

    pub fn root_exports(&self) -> &[ExportAsset] {
        &self.root_exports
    }

    /// Returns `None` when the layer has no entry at all, which is distinct
    /// from an entry holding an empty list.
    pub fn get_layer_exports(&self, layer_id: LayerId) -> Option<&[ExportAsset]> {
        self.layer_exports.get(&layer_id).map(|assets| &assets[..])
    }

    pub fn layer_ids_with_exports(&self) -> &BTreeSet<LayerId> {
        &self.layer_ids_with_exports
    }

    /// The document's layers that have at least one export asset.
    ///
    /// `artboards` and `export_enabled` restrict the result to layers whose
    /// flag matches; `None` means either. Order is the document's.
    pub fn get_layers_with_exports<'d>(
        &self,
        document: &'d Document,
        artboards: Option<bool>,
        export_enabled: Option<bool>,
    ) -> Vec<&'d Layer> {
        document
            .filter_layers(artboards, export_enabled)
            .filter(|layer| self.layer_ids_with_exports.contains(&layer.id))
            .collect()
    }

    /// Aligns the export lists of `layers` by position.
    pub fn get_asset_groups(&self, layers: &[LayerId]) -> Arc<[AssetGroup]> {
        self.cache.asset_groups.get_or_compute(layers, || {
            let lists: Vec<&[ExportAsset]> = layers
                .iter()
                .map(|id| self.get_layer_exports(*id).unwrap_or_default())
                .collect();
            zip_longest(&lists).into()
        })
    }

    /// One entry per asset group: the shared asset when every present member
    /// is similar, otherwise `None`.
    pub fn get_uniform_assets(&self, layers: &[LayerId]) -> Arc<[Option<ExportAsset>]> {
        self.cache.uniform_assets.get_or_compute(layers, || {
            self.get_asset_groups(layers)
                .iter()
                .map(|group| {
                    uniform_value(group.iter().map(Option::as_ref), ExportAsset::similar).cloned()
                })
                .collect()
        })
    }

    pub fn get_uniform_assets_only(&self, layers: &[LayerId]) -> Arc<[ExportAsset]> {
        self.cache.uniform_assets_only.get_or_compute(layers, || {
            self.get_uniform_assets(layers)
                .iter()
                .flatten()
                .cloned()
                .collect()
        })
    }

    /// Position of the last uniform row, if any.
    pub fn get_last_uniform_asset_index(&self, layers: &[LayerId]) -> Option<usize> {
        self.cache.last_uniform_index.get_or_compute(layers, || {
            self.get_uniform_assets(layers)
                .iter()
                .rposition(Option::is_some)
        })
    }

    /// Number of memoized query results held by this instance.
    pub fn cached_query_count(&self) -> usize {
        self.cache.len()
    }

    /// Merges `asset_props[i]` into the `i`-th asset of each layer. `None`
    /// entries leave their slot alone; entries past the end of a list are
    /// appended as new assets.
    #[must_use]
    pub fn merge_layer_assets(
        &self,
        layer_ids: &[LayerId],
        asset_props: &[Option<AssetProps>],
    ) -> Self {
        self.update_layers(layer_ids, |assets| merge_list(assets, asset_props))
    }

    #[must_use]
    pub fn merge_root_assets(&self, asset_props: &[Option<AssetProps>]) -> Self {
        self.update_root(|assets| merge_list(assets, asset_props))
    }

    /// Inserts new assets at `index` in each layer's list. An index past the
    /// end appends.
    #[must_use]
    pub fn splice_layer_assets(
        &self,
        layer_ids: &[LayerId],
        asset_props: &[AssetProps],
        index: usize,
    ) -> Self {
        self.update_layers(layer_ids, |assets| splice_list(assets, asset_props, index))
    }

    #[must_use]
    pub fn splice_root_assets(&self, asset_props: &[AssetProps], index: usize) -> Self {
        self.update_root(|assets| splice_list(assets, asset_props, index))
    }

    /// Removes the asset at `index` from each layer's list. Out-of-range
    /// indices leave the list unchanged.
    #[must_use]
    pub fn remove_layer_asset(&self, layer_ids: &[LayerId], index: usize) -> Self {
        self.update_layers(layer_ids, |assets| remove_from_list(assets, index))
    }

    #[must_use]
    pub fn remove_root_asset(&self, index: usize) -> Self {
        self.update_root(|assets| remove_from_list(assets, index))
    }

    /// Marks every root asset as requested, ahead of an export.
    #[must_use]
    pub fn set_root_exports_requested(&self) -> Self {
        debug!(assets = self.root_exports.len(), "root exports requested");
        self.update_root(request_list)
    }

    #[must_use]
    pub fn set_layer_exports_requested(&self, layer_ids: &[LayerId]) -> Self {
        debug!(layers = layer_ids.len(), "layer exports requested");
        self.update_layers(layer_ids, request_list)
    }

    /// Folds a pipeline result into the asset at `index` of each layer.
    /// Out-of-range indices change nothing.
    #[must_use]
    pub fn record_layer_outcome(
        &self,
        layer_ids: &[LayerId],
        index: usize,
        outcome: &ExportOutcome,
    ) -> Self {
        debug!(layers = layer_ids.len(), index, ?outcome, "recording export outcome");
        self.update_layers(layer_ids, |assets| outcome_list(assets, index, outcome))
    }

    #[must_use]
    pub fn record_root_outcome(&self, index: usize, outcome: &ExportOutcome) -> Self {
        debug!(index, ?outcome, "recording root export outcome");
        self.update_root(|assets| outcome_list(assets, index, outcome))
    }

    /// Adds a preset batch right after the last uniform row of the selection,
    /// so every selected layer receives it at the same position.
    #[must_use]
    pub fn add_layer_preset(&self, layer_ids: &[LayerId], preset: ExportPreset) -> Self {
        let index = self
            .get_last_uniform_asset_index(layer_ids)
            .map_or(0, |last| last + 1);
        self.splice_layer_assets(layer_ids, &preset.assets(), index)
    }

    #[must_use]
    pub fn add_root_preset(&self, preset: ExportPreset) -> Self {
        self.splice_root_assets(&preset.assets(), self.root_exports.len())
    }

    fn update_root(&self, update: impl Fn(&[ExportAsset]) -> AssetList) -> Self {
        Self::new(update(&self.root_exports[..]), self.layer_exports.clone())
    }

    /// Applies `update` to each distinct layer. Layers without an entry are
    /// treated as empty and only gain one when the update produces assets.
    fn update_layers(
        &self,
        layer_ids: &[LayerId],
        update: impl Fn(&[ExportAsset]) -> AssetList,
    ) -> Self {
        let mut layer_exports = self.layer_exports.clone();
        let mut seen = BTreeSet::new();
        for id in layer_ids {
            if !seen.insert(*id) {
                continue;
            }
            let current = layer_exports.get(id).cloned();
            let next = update(current.as_deref().unwrap_or_default());
            if current.is_some() || !next.is_empty() {
                layer_exports.insert(*id, next);
            }
        }
        Self::new(Arc::clone(&self.root_exports), layer_exports)
    }
}

impl Default for DocumentExports {
    fn default() -> Self {
        Self::new(Arc::from([]), BTreeMap::new())
    }
}

impl Clone for DocumentExports {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.root_exports), self.layer_exports.clone())
    }
}

impl PartialEq for DocumentExports {
    fn eq(&self, other: &Self) -> bool {
        self.root_exports == other.root_exports && self.layer_exports == other.layer_exports
    }
}

fn build_list(props: &[AssetProps]) -> AssetList {
    props.iter().cloned().map(ExportAsset::new).collect()
}

fn to_props_list(assets: &[ExportAsset]) -> Vec<AssetProps> {
    assets.iter().map(ExportAsset::to_props).collect()
}

fn merge_list(assets: &[ExportAsset], props: &[Option<AssetProps>]) -> AssetList {
    let merged = assets
        .iter()
        .enumerate()
        .map(|(index, asset)| match props.get(index) {
            Some(Some(update)) => asset.merge_props(update),
            _ => asset.clone(),
        });
    let appended = props
        .iter()
        .skip(assets.len())
        .flatten()
        .cloned()
        .map(ExportAsset::new);
    merged.chain(appended).collect()
}

fn splice_list(assets: &[ExportAsset], props: &[AssetProps], index: usize) -> AssetList {
    let at = index.min(assets.len());
    let (before, after) = assets.split_at(at);
    before
        .iter()
        .cloned()
        .chain(props.iter().cloned().map(ExportAsset::new))
        .chain(after.iter().cloned())
        .collect()
}

fn remove_from_list(assets: &[ExportAsset], index: usize) -> AssetList {
    assets
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, asset)| asset.clone())
        .collect()
}

fn request_list(assets: &[ExportAsset]) -> AssetList {
    assets.iter().map(ExportAsset::set_status_requested).collect()
}

fn outcome_list(assets: &[ExportAsset], index: usize, outcome: &ExportOutcome) -> AssetList {
    assets
        .iter()
        .enumerate()
        .map(|(position, asset)| {
            if position == index {
                outcome.apply(asset)
            } else {
                asset.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::{ExportFormat, ExportStatus, Scale};

    fn asset(scale: f64) -> ExportAsset {
        ExportAsset::new(AssetProps::new().with_scale(Scale::new(scale).unwrap()))
    }

    #[test]
    fn test_layer_ids_with_exports_skips_empty_lists() {
        let mut layers: BTreeMap<LayerId, AssetList> = BTreeMap::new();
        layers.insert(LayerId::new(1), Arc::from(vec![asset(1.0)]));
        layers.insert(LayerId::new(2), Arc::from(Vec::new()));
        let exports = DocumentExports::new(Arc::from([]), layers);
        assert_eq!(
            exports.layer_ids_with_exports().iter().copied().collect::<Vec<_>>(),
            vec![LayerId::new(1)]
        );
        assert_eq!(exports.get_layer_exports(LayerId::new(2)), Some(&[][..]));
        assert_eq!(exports.get_layer_exports(LayerId::new(3)), None);
    }

    #[test]
    fn test_untouched_lists_are_shared() {
        let mut layers: BTreeMap<LayerId, AssetList> = BTreeMap::new();
        layers.insert(LayerId::new(1), Arc::from(vec![asset(1.0)]));
        layers.insert(LayerId::new(2), Arc::from(vec![asset(2.0)]));
        let exports = DocumentExports::new(Arc::from([]), layers);
        let next = exports.set_layer_exports_requested(&[LayerId::new(1)]);
        assert!(Arc::ptr_eq(
            &exports.layer_exports[&LayerId::new(2)],
            &next.layer_exports[&LayerId::new(2)]
        ));
        assert!(!Arc::ptr_eq(
            &exports.layer_exports[&LayerId::new(1)],
            &next.layer_exports[&LayerId::new(1)]
        ));
    }

    #[test]
    fn test_remove_on_missing_layer_adds_no_entry() {
        let exports = DocumentExports::default();
        let next = exports.remove_layer_asset(&[LayerId::new(5)], 0);
        assert_eq!(next.get_layer_exports(LayerId::new(5)), None);
        let merged = exports.merge_layer_assets(
            &[LayerId::new(5)],
            &[Some(AssetProps::new().with_format(ExportFormat::Svg))],
        );
        assert_eq!(merged.get_layer_exports(LayerId::new(5)).map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_duplicate_layer_ids_apply_once() {
        let exports = DocumentExports::default();
        let next = exports.splice_layer_assets(
            &[LayerId::new(1), LayerId::new(1)],
            &[AssetProps::new()],
            0,
        );
        assert_eq!(next.get_layer_exports(LayerId::new(1)).map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_clone_starts_with_empty_cache() {
        let mut layers: BTreeMap<LayerId, AssetList> = BTreeMap::new();
        layers.insert(LayerId::new(1), Arc::from(vec![asset(1.0)]));
        let exports = DocumentExports::new(Arc::from([]), layers);
        exports.get_uniform_assets(&[LayerId::new(1)]);
        assert_eq!(exports.cached_query_count(), 2);
        let copy = exports.clone();
        assert_eq!(copy.cached_query_count(), 0);
        assert_eq!(copy, exports);
    }

    #[test]
    fn test_outcomes_settle_one_slot() {
        let mut layers: BTreeMap<LayerId, AssetList> = BTreeMap::new();
        layers.insert(LayerId::new(1), Arc::from(vec![asset(1.0), asset(2.0)]));
        let exports = DocumentExports::new(Arc::from(vec![asset(1.0)]), layers)
            .set_layer_exports_requested(&[LayerId::new(1)]);

        let written = exports.record_layer_outcome(
            &[LayerId::new(1)],
            1,
            &ExportOutcome::Written(PathBuf::from("out/logo@2x.png")),
        );
        let assets = written.get_layer_exports(LayerId::new(1)).unwrap();
        assert_eq!(assets[0].status(), ExportStatus::Requested);
        assert_eq!(assets[1].status(), ExportStatus::Stable);
        assert_eq!(assets[1].file_path(), Some(Path::new("out/logo@2x.png")));

        let failed = exports.record_root_outcome(0, &ExportOutcome::Failed);
        assert_eq!(failed.root_exports()[0].status(), ExportStatus::Error);
        assert_eq!(failed.root_exports()[0].file_path(), None);

        let unchanged = exports.record_root_outcome(4, &ExportOutcome::Failed);
        assert_eq!(unchanged, exports);
    }
}
