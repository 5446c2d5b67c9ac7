//! Property tests for suffix derivation and list edits.

use dspace_model::{
    AssetProps, DocumentExports, ExportAsset, ExportsPayload, LayerDescriptor, LayerId, Scale,
};
use proptest::prelude::*;

fn scale_strategy() -> impl Strategy<Value = Scale> {
    prop_oneof![
        proptest::sample::select(Scale::PRESETS.to_vec()),
        (1u32..=4000).prop_map(|hundredths| Scale::new(f64::from(hundredths) / 100.0).unwrap()),
    ]
}

fn payload_with(counts: &[usize]) -> ExportsPayload {
    let layers = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            let mut layer = LayerDescriptor::new(LayerId::new(index as u32 + 1));
            layer.export_assets = vec![AssetProps::new(); *count];
            layer
        })
        .collect();
    ExportsPayload {
        layers,
        ..ExportsPayload::default()
    }
}

proptest! {
    #[test]
    fn derive_suffix_is_idempotent(scale in scale_strategy(), suffix in "[a-z@-]{0,8}") {
        let asset = ExportAsset::new(AssetProps::new().with_scale(scale).with_suffix(suffix));
        let once = asset.derive_suffix();
        let twice = once.derive_suffix();
        prop_assert_eq!(once.suffix(), twice.suffix());
        prop_assert!(!once.suffix_customized());
    }

    #[test]
    fn uncustomized_suffix_follows_scale(from in scale_strategy(), to in scale_strategy()) {
        let asset = ExportAsset::new(AssetProps::new().with_scale(from));
        let moved = asset.merge_props(&AssetProps::new().with_scale(to));
        prop_assert_eq!(moved.suffix(), to.derived_suffix());
    }

    #[test]
    fn hydration_keeps_every_asset(counts in proptest::collection::vec(0usize..5, 0..8)) {
        let exports = DocumentExports::from_descriptors(&payload_with(&counts));
        for (index, count) in counts.iter().enumerate() {
            let id = LayerId::new(index as u32 + 1);
            prop_assert_eq!(exports.get_layer_exports(id).map(<[_]>::len), Some(*count));
            prop_assert_eq!(exports.layer_ids_with_exports().contains(&id), *count > 0);
        }
    }

    #[test]
    fn remove_past_the_end_changes_nothing(count in 0usize..6, extra in 0usize..100) {
        let exports = DocumentExports::from_descriptors(&payload_with(&[count]));
        let next = exports.remove_layer_asset(&[LayerId::new(1)], count + extra);
        prop_assert_eq!(next, exports);
    }
}
