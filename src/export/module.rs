//! JS data modules embedding the tree table and boundary GeoJSON.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::boundary::Boundary;
use crate::inventory::TreeRecord;
use crate::io::{finalize_write, open_for_write};
use crate::photos::PhotoIndex;
use crate::style::{GenusStyle, MarkerShape, StylePalette, resolve_style};

/// Inputs for photo URL resolution in the tree module.
#[derive(Default)]
pub struct ModuleOptions<'a> {
    pub photos: Option<&'a PhotoIndex>,
    /// Prepended to matched photo file names; a trailing slash is added when
    /// missing.
    pub photo_base_url: Option<&'a str>,
}

/// Write `trees.js`: the genus style table plus one entry per record with
/// derived style, crown radius, and photo URL.
pub fn write_tree_module(
    records: &[TreeRecord],
    styles: &BTreeMap<String, GenusStyle>,
    palette: &StylePalette,
    opts: &ModuleOptions,
    path: &Path,
    force: bool,
) -> Result<()> {
    let entries: Vec<Value> = records.iter()
        .map(|record| tree_entry(record, styles, palette, opts))
        .collect();
    let style_table: Value = styles.iter()
        .map(|(genus, style)| (genus.clone(), style_json(style)))
        .collect::<serde_json::Map<_, _>>()
        .into();

    let mut sink = open_for_write(path, force)?;
    writeln!(sink, "// Tree inventory data - generated by arbormap")?;
    writeln!(sink)?;
    writeln!(sink, "export const genusStyles = {}", pretty(&style_table)?)?;
    writeln!(sink)?;
    writeln!(sink, "export const treeData = {}", pretty(&json!(entries))?)?;
    finalize_write(sink)
}

/// Write `boundary.js`: the boundary FeatureCollection as a module constant.
pub fn write_boundary_module(boundary: &Boundary, path: &Path, force: bool) -> Result<()> {
    let mut sink = open_for_write(path, force)?;
    writeln!(sink, "// School boundary data - generated by arbormap from shapefile")?;
    writeln!(sink)?;
    writeln!(sink, "export const boundaryData = {}", pretty(&boundary.to_geojson())?)?;
    finalize_write(sink)
}

/// One record as a JSON object, style and canopy radius resolved.
pub(crate) fn tree_entry(
    record: &TreeRecord,
    styles: &BTreeMap<String, GenusStyle>,
    palette: &StylePalette,
    opts: &ModuleOptions,
) -> Value {
    let style = resolve_style(record.genus.as_deref(), styles, palette);
    json!({
        "treeCode": record.code,
        "lat": record.lat,
        "lon": record.lon,
        "genus": record.genus,
        "species": record.species,
        "dbh": record.dbh_cm,
        "height": record.height_m,
        "crownNS": record.crown_ns_m,
        "crownEW": record.crown_ew_m,
        "crownRadius": record.crown_radius_m(),
        "color": style.color,
        "shape": shape_json(&style.shape),
        "photoUrl": photo_url(record, opts),
    })
}

fn style_json(style: &GenusStyle) -> Value {
    json!({
        "color": style.color,
        "shape": shape_json(&style.shape),
    })
}

fn shape_json(shape: &MarkerShape) -> Value {
    json!({ "sides": shape.sides, "rotation": shape.rotation_deg })
}

fn photo_url(record: &TreeRecord, opts: &ModuleOptions) -> Option<String> {
    let photo = opts.photos?.find(&record.code)?;
    let name = photo.file_name()?.to_str()?;
    let base = opts.photo_base_url.unwrap_or("photos/");
    if base.is_empty() || base.ends_with('/') {
        Some(format!("{base}{name}"))
    } else {
        Some(format!("{base}/{name}"))
    }
}

fn pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .context("[export::module] Failed to serialize module data")
}
