//! Tree inventory table: record model and CSV loading.

mod read;

pub use read::read_inventory;

use std::collections::BTreeSet;

use crate::style::canopy_radius;

/// One row of the tree inventory. Built once at load and never mutated.
///
/// Positions are WGS84 decimal degrees; trunk diameter is centimeters; the
/// height and crown measurements are meters. Every measurement is optional.
#[derive(Debug, Clone)]
pub struct TreeRecord {
    pub code: String,
    pub lat: f64,
    pub lon: f64,
    pub genus: Option<String>,
    pub species: Option<String>,
    pub dbh_cm: Option<f64>,
    pub height_m: Option<f64>,
    pub crown_ns_m: Option<f64>,
    pub crown_ew_m: Option<f64>,
}

impl TreeRecord {
    /// Derived canopy radius in meters, when either crown diameter was
    /// measured.
    pub fn crown_radius_m(&self) -> Option<f64> {
        canopy_radius(self.crown_ns_m, self.crown_ew_m)
    }
}

/// Mean position of the loaded rows, used as the map view center.
/// `None` when the inventory is empty.
pub fn center(records: &[TreeRecord]) -> Option<geo::Point<f64>> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let (lat, lon) = records.iter()
        .fold((0.0, 0.0), |(lat, lon), r| (lat + r.lat, lon + r.lon));
    Some(geo::Point::new(lon / n, lat / n))
}

/// Distinct genus labels present in the inventory, sorted.
pub fn distinct_genera(records: &[TreeRecord]) -> Vec<String> {
    records.iter()
        .filter_map(|r| r.genus.as_deref())
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
