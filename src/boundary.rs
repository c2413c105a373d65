//! Boundary shapefile loading and conversion to WGS84 GeoJSON.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use geo::{Coord, LineString, MapCoords, MultiPolygon, Polygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};
use serde_json::{Value, json};
use shapefile::{PolygonRing, Reader, Shape};

/// PROJ.4 string for EPSG:3310 (California Albers, meters), the assumed
/// source CRS when a boundary file does not declare one.
const ALBERS_CA_PROJ4: &str =
    "+proj=aea +lat_1=34 +lat_2=40.5 +lat_0=0 +lon_0=-120 +x_0=0 +y_0=-4000000 +datum=NAD83 +units=m +no_defs +type=crs";

const WGS84_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Boundary polygons, stored in WGS84 lon/lat after loading.
#[derive(Debug, Clone)]
pub struct Boundary {
    shapes: Vec<MultiPolygon<f64>>,
}

impl Boundary {
    /// Reads every polygon from the shapefile at `path`, reprojecting to
    /// WGS84 when the source is a projected CRS.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = Reader::from_path(path)
            .with_context(|| format!("[boundary] Failed to open shapefile: {}", path.display()))?;

        let mut shapes = Vec::with_capacity(reader.shape_count()?);
        for result in reader.iter_shapes_and_records() {
            let (shape, _record) = result.context("[boundary] Error reading shape+record")?;
            if let Some(mp) = shape_to_multipolygon(shape) {
                shapes.push(mp);
            }
        }

        if !source_is_geographic(path, &shapes) {
            shapes = reproject_to_wgs84(shapes)?;
        }
        Ok(Self { shapes })
    }

    pub fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Boundary polygons as a GeoJSON FeatureCollection.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self.shapes.iter().enumerate().map(|(idx, mp)| {
            let coordinates: Vec<Value> = mp.0.iter().map(|polygon| {
                let mut rings = vec![ring_coords(polygon.exterior())];
                rings.extend(polygon.interiors().iter().map(ring_coords));
                json!(rings)
            }).collect();

            json!({
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": coordinates,
                },
                "properties": {
                    "index": idx,
                },
            })
        }).collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

/// GeoJSON ring: [[x, y], ...]
fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Convert one shapefile shape into a MultiPolygon. Non-polygon shapes are
/// skipped; Z/M values are dropped.
fn shape_to_multipolygon(shape: Shape) -> Option<MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(poly) => Some(assemble_rings(poly.rings().iter().map(|ring| match ring {
            PolygonRing::Outer(pts) => (true, pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
            PolygonRing::Inner(pts) => (false, pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
        }))),
        Shape::PolygonZ(poly) => Some(assemble_rings(poly.rings().iter().map(|ring| match ring {
            PolygonRing::Outer(pts) => (true, pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
            PolygonRing::Inner(pts) => (false, pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
        }))),
        Shape::PolygonM(poly) => Some(assemble_rings(poly.rings().iter().map(|ring| match ring {
            PolygonRing::Outer(pts) => (true, pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
            PolygonRing::Inner(pts) => (false, pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
        }))),
        _ => None,
    }
}

/// Assemble (is_outer, ring) pairs into polygons. Shapefile ring order puts
/// each inner ring after the outer ring that contains it.
fn assemble_rings(rings: impl Iterator<Item = (bool, Vec<Coord<f64>>)>) -> MultiPolygon<f64> {
    let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    for (is_outer, coords) in rings {
        let ring = LineString(coords);
        if is_outer {
            polygons.push((ring, Vec::new()));
        } else if let Some((_, holes)) = polygons.last_mut() {
            holes.push(ring);
        }
    }
    MultiPolygon(polygons.into_iter()
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect())
}

/// Decide whether the source file is already geographic (lon/lat).
///
/// A `.prj` sidecar settles it; without one, coordinates within the lon/lat
/// value range are taken as geographic (projected CRSs are in meters, far
/// outside that range).
fn source_is_geographic(path: &Path, shapes: &[MultiPolygon<f64>]) -> bool {
    if let Ok(wkt) = std::fs::read_to_string(path.with_extension("prj")) {
        return !wkt.contains("PROJCS");
    }
    shapes.iter()
        .flat_map(|mp| mp.0.iter())
        .flat_map(|p| p.exterior().coords())
        .all(|c| c.x.abs() <= 180.0 && c.y.abs() <= 90.0)
}

/// Reproject shapes from the assumed source CRS (EPSG:3310) to WGS84 lon/lat.
fn reproject_to_wgs84(shapes: Vec<MultiPolygon<f64>>) -> Result<Vec<MultiPolygon<f64>>> {
    let from = Proj4::from_proj_string(ALBERS_CA_PROJ4)
        .with_context(|| anyhow!("failed to build source PROJ.4: {ALBERS_CA_PROJ4}"))?;
    let to = Proj4::from_proj_string(WGS84_PROJ4)
        .with_context(|| anyhow!("failed to build target PROJ.4: {WGS84_PROJ4}"))?;

    // Meters in, radians out for a geographic target.
    let projected = shapes.into_iter()
        .map(|shape| shape.map_coords(|coord: Coord<f64>| {
            let mut point = (coord.x, coord.y, 0.0);
            transform(&from, &to, &mut point)
                .expect("CRS transform failed");
            Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
        }))
        .collect();

    Ok(projected)
}

#[cfg(test)]
mod tests {
    use geo::{Coord, LineString, MultiPolygon, Polygon};

    use super::*;

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString(vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 1.0, y: 1.0 },
                Coord { x: 0.0, y: 1.0 },
                Coord { x: 0.0, y: 0.0 },
            ]),
            vec![],
        )])
    }

    #[test]
    fn geojson_has_one_feature_per_shape() {
        let boundary = Boundary { shapes: vec![unit_square(), unit_square()] };
        let value = boundary.to_geojson();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 2);
        assert_eq!(value["features"][1]["properties"]["index"], 1);

        let geometry = &value["features"][0]["geometry"];
        assert_eq!(geometry["type"], "MultiPolygon");
        // One polygon, one ring, five positions (closed).
        let ring = &geometry["coordinates"][0][0];
        assert_eq!(ring.as_array().unwrap().len(), 5);
        assert_eq!(ring[0][0], 0.0);
    }

    #[test]
    fn assemble_attaches_holes_to_preceding_outer() {
        let outer = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 4.0, y: 0.0 },
            Coord { x: 4.0, y: 4.0 },
            Coord { x: 0.0, y: 4.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        let hole = vec![
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 1.0, y: 2.0 },
            Coord { x: 2.0, y: 2.0 },
            Coord { x: 1.0, y: 1.0 },
        ];
        let mp = assemble_rings(vec![(true, outer), (false, hole)].into_iter());
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn reprojection_lands_in_california() {
        // EPSG:3310 coordinates in the Central Valley.
        let shape = MultiPolygon(vec![Polygon::new(
            LineString(vec![
                Coord { x: 100000.0, y: 0.0 },
                Coord { x: 101000.0, y: 0.0 },
                Coord { x: 101000.0, y: 1000.0 },
                Coord { x: 100000.0, y: 0.0 },
            ]),
            vec![],
        )]);
        let projected = reproject_to_wgs84(vec![shape]).unwrap();
        let first = projected[0].0[0].exterior().0[0];
        assert!((-125.0..-114.0).contains(&first.x), "lon {}", first.x);
        assert!((32.0..42.0).contains(&first.y), "lat {}", first.y);
    }

    #[test]
    fn lonlat_range_counts_as_geographic() {
        let path = std::path::Path::new("no-such-file.shp");
        assert!(source_is_geographic(path, &[unit_square()]));
        let projected = MultiPolygon(vec![Polygon::new(
            LineString(vec![
                Coord { x: 470000.0, y: -440000.0 },
                Coord { x: 471000.0, y: -440000.0 },
                Coord { x: 470000.0, y: -440000.0 },
            ]),
            vec![],
        )]);
        assert!(!source_is_geographic(path, &[projected]));
    }
}
