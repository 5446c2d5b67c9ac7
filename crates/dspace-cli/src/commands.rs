//! Subcommand implementations.

use anyhow::{Result, bail};
use tracing::{info, info_span};

use dspace_model::{DocumentExports, ExportPreset, LayerId};

use crate::cli::{
    AddArgs, AddPresetArgs, Command, EditArgs, RemoveArgs, ResolveArgs, SetArgs, SummaryArgs,
    UniformArgs,
};
use crate::payload::{load_payload, write_payload};
use crate::summary::{presets_table, print_summary, print_uniform};

pub fn run(command: &Command) -> Result<()> {
    match command {
        Command::Summary(args) => run_summary(args),
        Command::Uniform(args) => run_uniform(args),
        Command::Request(args) => run_request(args),
        Command::AddPreset(args) => run_add_preset(args),
        Command::Set(args) => run_set(args),
        Command::Add(args) => run_add(args),
        Command::Remove(args) => run_remove(args),
        Command::Resolve(args) => run_resolve(args),
        Command::Presets => run_presets(),
    }
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let loaded = load_payload(&args.payload)?;
    let layers = loaded.exports.get_layers_with_exports(
        &loaded.document,
        args.artboards,
        args.export_enabled,
    );
    print_summary(&loaded, &layers);
    Ok(())
}

pub fn run_uniform(args: &UniformArgs) -> Result<()> {
    let loaded = load_payload(&args.payload)?;
    loaded.check_layers(&args.layers);
    let exports = &loaded.exports;
    print_uniform(
        &exports.get_uniform_assets(&args.layers),
        &exports.get_uniform_assets_only(&args.layers),
        exports.get_last_uniform_asset_index(&args.layers),
    );
    Ok(())
}

pub fn run_request(args: &EditArgs) -> Result<()> {
    run_edit(args, "request", |exports, layers| {
        if layers.is_empty() {
            exports.set_root_exports_requested()
        } else {
            exports.set_layer_exports_requested(layers)
        }
    })
}

pub fn run_add_preset(args: &AddPresetArgs) -> Result<()> {
    let preset = ExportPreset::from(args.preset);
    run_edit(&args.edit, "add-preset", |exports, layers| {
        if layers.is_empty() {
            exports.add_root_preset(preset)
        } else {
            exports.add_layer_preset(layers, preset)
        }
    })
}

/// Merges the given properties into one slot, leaving every other slot alone.
pub fn run_set(args: &SetArgs) -> Result<()> {
    let props = args.props.to_props();
    if props.is_empty() {
        bail!("set needs at least one asset property flag");
    }
    let mut updates = vec![None; args.index];
    updates.push(Some(props));
    run_edit(&args.edit, "set", |exports, layers| {
        if layers.is_empty() {
            exports.merge_root_assets(&updates)
        } else {
            exports.merge_layer_assets(layers, &updates)
        }
    })
}

pub fn run_add(args: &AddArgs) -> Result<()> {
    let props = [args.props.to_props()];
    let index = args.index.unwrap_or(usize::MAX);
    run_edit(&args.edit, "add", |exports, layers| {
        if layers.is_empty() {
            exports.splice_root_assets(&props, index)
        } else {
            exports.splice_layer_assets(layers, &props, index)
        }
    })
}

pub fn run_remove(args: &RemoveArgs) -> Result<()> {
    let index = args.index;
    run_edit(&args.edit, "remove", |exports, layers| {
        if layers.is_empty() {
            exports.remove_root_asset(index)
        } else {
            exports.remove_layer_asset(layers, index)
        }
    })
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let outcome = args.outcome();
    run_edit(&args.edit, "resolve", |exports, layers| {
        if layers.is_empty() {
            exports.record_root_outcome(args.index, &outcome)
        } else {
            exports.record_layer_outcome(layers, args.index, &outcome)
        }
    })
}

pub fn run_presets() -> Result<()> {
    println!("{}", presets_table());
    Ok(())
}

/// Loads the payload, applies `edit` to its exports and writes the result.
/// Without target layers the edit receives an empty slice and works on the
/// root list.
fn run_edit(
    args: &EditArgs,
    command: &str,
    edit: impl FnOnce(&DocumentExports, &[LayerId]) -> DocumentExports,
) -> Result<()> {
    let span = info_span!("edit", command, payload = %args.payload.display());
    let _guard = span.enter();
    let loaded = load_payload(&args.payload)?;
    loaded.check_layers(&args.layers);
    let updated = loaded.with_exports(edit(&loaded.exports, &args.layers));
    info!(
        target_layers = args.layers.len(),
        root_assets = updated.exports.root_exports().len(),
        "applied edit"
    );
    write_payload(&updated, args.output.as_deref())
}
