/// Approximate crown radius from up to two measured crown diameters
/// (north-south and east-west, in meters).
///
/// Both present: average diameter halved. One present: that diameter halved.
/// Neither: `None`, and the caller draws no canopy indicator.
pub fn canopy_radius(ns: Option<f64>, ew: Option<f64>) -> Option<f64> {
    match (ns, ew) {
        (Some(ns), Some(ew)) => Some((ns + ew) / 4.0),
        (Some(d), None) | (None, Some(d)) => Some(d / 2.0),
        (None, None) => None,
    }
}
