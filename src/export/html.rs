//! Standalone Leaflet map document.
//!
//! The output is a single HTML file: tile layers, boundary overlay, canopy
//! circles, and a regular-polygon marker per tree, with all data embedded.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};

use crate::boundary::Boundary;
use crate::inventory::{TreeRecord, center};
use crate::io::{finalize_write, open_for_write};
use crate::style::{GenusStyle, StylePalette};

use super::module::{ModuleOptions, tree_entry};

/// Marker circumradius in screen pixels.
const MARKER_RADIUS_PX: f64 = 7.0;

const DEFAULT_ZOOM: u32 = 18;

/// Render the map document and write it to `path`.
pub fn write_map(
    records: &[TreeRecord],
    styles: &BTreeMap<String, GenusStyle>,
    palette: &StylePalette,
    boundary: Option<&Boundary>,
    path: &Path,
    force: bool,
) -> Result<()> {
    let html = render_map(records, styles, palette, boundary)?;
    let mut sink = open_for_write(path, force)?;
    sink.write_all(html.as_bytes())
        .with_context(|| format!("[export::html] Failed to write map to {:?}", path))?;
    finalize_write(sink)
}

/// Render the map document as a string.
pub fn render_map(
    records: &[TreeRecord],
    styles: &BTreeMap<String, GenusStyle>,
    palette: &StylePalette,
    boundary: Option<&Boundary>,
) -> Result<String> {
    let Some(view_center) = center(records) else {
        bail!("[export::html] No mappable rows in inventory");
    };

    let opts = ModuleOptions::default();
    let trees: Vec<Value> = records.iter()
        .map(|record| tree_entry(record, styles, palette, &opts))
        .collect();

    // One icon per genus, plus the fallback under the empty key.
    let mut icons: BTreeMap<String, String> = styles.iter()
        .map(|(genus, style)| (genus.clone(), marker_svg(style)))
        .collect();
    icons.insert(String::new(), marker_svg(&palette.fallback));

    let boundary_json = match boundary {
        Some(b) if !b.is_empty() => serde_json::to_string(&b.to_geojson())?,
        _ => "null".to_string(),
    };

    let mut html = String::new();
    write!(html, r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>Tree inventory map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map {{ height: 100%; margin: 0; }}
.tree-marker {{ background: none; border: none; }}
</style>
</head>
<body>
<div id="map"></div>
<script>
const TREES = {trees};
const BOUNDARY = {boundary};
const ICONS = {icons};
const CENTER = [{lat:.6}, {lon:.6}];
const ZOOM = {zoom};
const ICON_SIZE = {icon_size};
"##,
        trees = serde_json::to_string(&json!(trees))?,
        boundary = boundary_json,
        icons = serde_json::to_string(&json!(icons))?,
        lat = view_center.y(),
        lon = view_center.x(),
        zoom = DEFAULT_ZOOM,
        icon_size = MARKER_RADIUS_PX * 2.0,
    )?;

    html.push_str(r##"
const map = L.map('map', { center: CENTER, zoom: ZOOM });

const osm = L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
const positron = L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
  attribution: '&copy; OpenStreetMap contributors &copy; CARTO'
});
const esri = L.tileLayer('https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}', {
  attribution: 'Esri World Imagery'
});

const overlays = {};
if (BOUNDARY) {
  overlays['School boundary'] = L.geoJSON(BOUNDARY, {
    style: { color: 'black', weight: 1, fillOpacity: 0 }
  }).addTo(map);
}

for (const tree of TREES) {
  if (tree.crownRadius) {
    L.circle([tree.lat, tree.lon], {
      radius: tree.crownRadius,
      stroke: false,
      fillOpacity: 0.3
    }).addTo(map);
  }

  const icon = L.divIcon({
    className: 'tree-marker',
    html: ICONS[tree.genus] ?? ICONS[''],
    iconSize: [ICON_SIZE, ICON_SIZE],
    iconAnchor: [ICON_SIZE / 2, ICON_SIZE / 2]
  });

  const popup = '<div style="font-size:13px;">'
    + '<b>Tree code:</b> ' + (tree.treeCode ?? '') + '<br>'
    + '<b>Genus:</b> ' + (tree.genus ?? '') + '<br>'
    + '<b>Species:</b> ' + (tree.species ?? '') + '<br>'
    + '<b>DBH (cm):</b> ' + (tree.dbh ?? '') + '<br>'
    + '<b>Height (m):</b> ' + (tree.height ?? '')
    + '</div>';

  L.marker([tree.lat, tree.lon], { icon: icon }).bindPopup(popup).addTo(map);
}

L.control.layers({
  'OSM': osm,
  'CartoDB positron': positron,
  'Esri Satellite': esri
}, overlays).addTo(map);
</script>
</body>
</html>
"##);

    Ok(html)
}

/// Inline SVG for one genus marker, rendered into a Leaflet divIcon.
pub(crate) fn marker_svg(style: &GenusStyle) -> String {
    let size = MARKER_RADIUS_PX * 2.0;
    let points = polygon_points(style.shape.sides, style.shape.rotation_deg, MARKER_RADIUS_PX);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}"><polygon points="{points}" fill="{color}" fill-opacity="0.9" stroke="{color}" stroke-width="1"/></svg>"##,
        color = style.color,
    )
}

/// Build an SVG points string for a regular polygon inscribed in a circle of
/// `radius`, first vertex pointing up before `rotation_deg` is applied.
fn polygon_points(sides: u32, rotation_deg: f64, radius: f64) -> String {
    let mut out = String::new();

    for i in 0..sides {
        let theta = (360.0 * i as f64 / sides as f64 + rotation_deg - 90.0).to_radians();
        let x = radius + radius * theta.cos();
        let y = radius + radius * theta.sin();
        if i > 0 { out.push(' ') }
        out.push_str(&format!("{x:.3},{y:.3}"));
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::inventory::TreeRecord;
    use crate::style::{GenusStyle, MarkerShape, StylePalette, assign_styles};

    use super::{marker_svg, polygon_points, render_map};

    fn record(code: &str, genus: Option<&str>, crown_ns: Option<f64>) -> TreeRecord {
        TreeRecord {
            code: code.to_string(),
            lat: 34.1,
            lon: -117.2,
            genus: genus.map(str::to_string),
            species: None,
            dbh_cm: None,
            height_m: None,
            crown_ns_m: crown_ns,
            crown_ew_m: None,
        }
    }

    #[test]
    fn marker_svg_uses_genus_color_and_side_count() {
        let style = GenusStyle {
            color: "darkgreen",
            shape: MarkerShape { sides: 5, rotation_deg: 0.0 },
        };
        let svg = marker_svg(&style);
        assert!(svg.contains(r#"fill="darkgreen""#));
        // Five vertices → four separators.
        let points = svg.split(r#"points=""#).nth(1).unwrap();
        let points = &points[..points.find('"').unwrap()];
        assert_eq!(points.split(' ').count(), 5);
    }

    #[test]
    fn square_rotation_shifts_first_vertex() {
        // First vertex of a 45°-rotated square: up, rotated 45° clockwise.
        let points = polygon_points(4, 45.0, 7.0);
        let first = points.split(' ').next().unwrap();
        let (x, y) = first.split_once(',').unwrap();
        assert!((x.parse::<f64>().unwrap() - 11.95).abs() < 0.01);
        assert!((y.parse::<f64>().unwrap() - 2.05).abs() < 0.01);
    }

    #[test]
    fn rendered_map_embeds_trees_and_icons() {
        let palette = StylePalette::default();
        let records = vec![
            record("WT001", Some("Quercus"), Some(4.0)),
            record("WT002", None, None),
        ];
        let styles = assign_styles(["Quercus"], &palette);
        let html = render_map(&records, &styles, &palette, None).unwrap();

        assert!(html.contains("const TREES = ["));
        assert!(html.contains("\"WT001\""));
        assert!(html.contains("const BOUNDARY = null"));
        assert!(html.contains("\"Quercus\":\"<svg"));
        // Fallback icon under the empty key.
        assert!(html.contains("\"\":\"<svg"));
        assert!(html.contains("leaflet@1.9.4"));
    }

    #[test]
    fn empty_inventory_is_an_error() {
        let palette = StylePalette::default();
        let styles = assign_styles(Vec::<String>::new(), &palette);
        assert!(render_map(&[], &styles, &palette, None).is_err());
    }
}
