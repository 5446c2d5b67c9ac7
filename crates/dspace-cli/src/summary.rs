use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dspace_model::{
    DocumentExports, ExportAsset, ExportFormat, ExportPreset, ExportStatus, Layer, Scale,
};

use crate::payload::LoadedDocument;

pub fn print_summary(loaded: &LoadedDocument, layers: &[&Layer]) {
    let document = &loaded.document;
    println!("Document: {}", document.display_name());
    println!(
        "Layers with exports: {} of {}",
        layers.len(),
        document.layers().len()
    );
    println!();
    println!("Root exports:");
    println!(
        "{}",
        root_table(loaded.exports.root_exports(), &document.display_name())
    );
    if !layers.is_empty() {
        println!();
        println!("Layer exports:");
        println!("{}", layer_table(&loaded.exports, layers));
    }
}

pub fn print_uniform(
    uniform: &[Option<ExportAsset>],
    shared: &[ExportAsset],
    last_uniform: Option<usize>,
) {
    println!("{}", uniform_table(uniform));
    println!(
        "{} of {} rows shared by the selection",
        shared.len(),
        uniform.len()
    );
    let insert_at = last_uniform.map_or(0, |index| index + 1);
    println!("Presets insert at row {insert_at}");
}

pub fn root_table(assets: &[ExportAsset], base_name: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Scale"),
        header_cell("Suffix"),
        header_cell("Format"),
        header_cell("Status"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, asset) in assets.iter().enumerate() {
        let mut row = vec![Cell::new(index)];
        row.extend(asset_cells(asset, base_name));
        table.add_row(row);
    }
    table
}

pub fn layer_table(exports: &DocumentExports, layers: &[&Layer]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Layer"),
        header_cell("Name"),
        header_cell("#"),
        header_cell("Scale"),
        header_cell("Suffix"),
        header_cell("Format"),
        header_cell("Status"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for layer in layers {
        let Some(assets) = exports.get_layer_exports(layer.id) else {
            continue;
        };
        let name = layer.display_name();
        for (index, asset) in assets.iter().enumerate() {
            let (id_cell, name_cell) = if index == 0 {
                (
                    Cell::new(layer.id)
                        .fg(Color::Blue)
                        .add_attribute(Attribute::Bold),
                    layer_name_cell(layer),
                )
            } else {
                (Cell::new(""), Cell::new(""))
            };
            let mut row = vec![id_cell, name_cell, Cell::new(index)];
            row.extend(asset_cells(asset, &name));
            table.add_row(row);
        }
    }
    table
}

pub fn uniform_table(uniform: &[Option<ExportAsset>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Scale"),
        header_cell("Suffix"),
        header_cell("Format"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, entry) in uniform.iter().enumerate() {
        match entry {
            Some(asset) => table.add_row(vec![
                Cell::new(index),
                Cell::new(scale_label(asset.scale())),
                suffix_cell(asset),
                Cell::new(asset.format()),
            ]),
            None => table.add_row(vec![
                Cell::new(index),
                dim_cell("mixed"),
                dim_cell("mixed"),
                dim_cell("mixed"),
            ]),
        };
    }
    table
}

pub fn presets_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Option"), header_cell("Values")]);
    apply_table_style(&mut table);
    let scales: Vec<String> = Scale::PRESETS.iter().copied().map(scale_label).collect();
    let formats: Vec<&str> = ExportFormat::ALL.iter().map(ExportFormat::as_str).collect();
    table.add_row(vec![Cell::new("Scales"), Cell::new(scales.join(", "))]);
    table.add_row(vec![Cell::new("Formats"), Cell::new(formats.join(", "))]);
    for preset in ExportPreset::ALL {
        let suffixes: Vec<String> = preset
            .assets()
            .into_iter()
            .map(|props| ExportAsset::new(props).suffix().to_string())
            .collect();
        table.add_row(vec![
            Cell::new(format!("Preset {} ({})", preset.label(), preset.as_str())),
            Cell::new(suffixes.join(", ")),
        ]);
    }
    table
}

/// Plain-text listing of uniform rows, one line per row.
pub fn describe_uniform(uniform: &[Option<ExportAsset>]) -> String {
    uniform
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Some(asset) => format!(
                "{index}: {} {} {}",
                scale_label(asset.scale()),
                asset.suffix(),
                asset.format()
            ),
            None => format!("{index}: mixed"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn asset_cells(asset: &ExportAsset, base_name: &str) -> Vec<Cell> {
    vec![
        Cell::new(scale_label(asset.scale())),
        suffix_cell(asset),
        Cell::new(asset.format()),
        status_cell(asset.status()),
        file_cell(asset, base_name),
    ]
}

fn scale_label(scale: Scale) -> String {
    format!("{scale}x")
}

fn suffix_cell(asset: &ExportAsset) -> Cell {
    if asset.suffix_customized() {
        Cell::new(asset.suffix()).add_attribute(Attribute::Italic)
    } else {
        Cell::new(asset.suffix())
    }
}

fn status_cell(status: ExportStatus) -> Cell {
    match status {
        ExportStatus::New => dim_cell(status),
        ExportStatus::Requested => Cell::new(status).fg(Color::Yellow),
        ExportStatus::Stable => Cell::new(status).fg(Color::Green),
        ExportStatus::Error => Cell::new(status)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

/// The exported path when known, otherwise the file name an export would use.
fn file_cell(asset: &ExportAsset, base_name: &str) -> Cell {
    match asset.file_path() {
        Some(path) => Cell::new(path.display()),
        None => dim_cell(asset.file_name(base_name)),
    }
}

fn layer_name_cell(layer: &Layer) -> Cell {
    let cell = Cell::new(layer.display_name());
    match (layer.artboard, layer.export_enabled) {
        (true, _) => cell.add_attribute(Attribute::Bold),
        (false, false) => cell.fg(Color::DarkGrey),
        (false, true) => cell,
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
