//! Compass point names for meteorological directions.

/// The 16 compass points, clockwise from north at 22.5 degree spacing.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Angular spacing between adjacent compass points in degrees.
pub const COMPASS_STEP_DEG: f64 = 360.0 / COMPASS_POINTS.len() as f64;

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Nearest compass point for a direction in degrees.
pub fn compass_label(deg: f64) -> &'static str {
    let idx = (normalize_degrees(deg) / COMPASS_STEP_DEG).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[idx]
}

/// Compass points paired with their angle in degrees.
pub fn compass_ticks() -> impl Iterator<Item = (f64, &'static str)> {
    COMPASS_POINTS
        .iter()
        .enumerate()
        .map(|(i, name)| (i as f64 * COMPASS_STEP_DEG, *name))
}
