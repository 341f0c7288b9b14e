//! Common test fixtures for wind rose tests.
//!
//! Fixtures are plain data so that every crate in the workspace can build
//! its own record type from them.

/// The four-direction reference scenario.
pub mod four_bins {
    pub const BINS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
    pub const FREQ: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
    pub const SPEED: f64 = 8.0;
    pub const TI: f64 = 0.12;

    /// Expected dominant direction (degrees).
    pub const DOMINANT_DIRECTION: f64 = 0.0;
    /// Expected maximum frequency as a percentage.
    pub const MAX_FREQUENCY_PCT: f64 = 40.0;
}

/// Degenerate scenario: every direction equally likely.
pub mod equal_freq {
    pub const BINS: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];
    pub const FREQ: [f64; 8] = [0.125; 8];
    pub const SPEED: f64 = 6.5;
    pub const TI: f64 = 0.1;
}

/// Irregularly spaced directions.
pub mod irregular {
    pub const BINS: [f64; 4] = [0.0, 30.0, 180.0, 270.0];
    pub const FREQ: [f64; 4] = [0.25, 0.35, 0.3, 0.1];
    pub const SPEED: f64 = 9.2;
    pub const TI: f64 = 0.15;
}

/// A 16-point JSON document in the on-disk shape.
pub const SIXTEEN_POINT_JSON: &str = r#"{
    "bins": [0.0, 22.5, 45.0, 67.5, 90.0, 112.5, 135.0, 157.5,
             180.0, 202.5, 225.0, 247.5, 270.0, 292.5, 315.0, 337.5],
    "freq": [0.05, 0.04, 0.03, 0.04, 0.06, 0.05, 0.04, 0.05,
             0.08, 0.09, 0.11, 0.10, 0.08, 0.07, 0.06, 0.05],
    "speed": 8.4,
    "ti": 0.11
}"#;

/// Same data using the long-form field names.
pub const LONG_FORM_JSON: &str = r#"{
    "directions": [0, 90, 180, 270],
    "frequencies": [0.4, 0.3, 0.2, 0.1],
    "wind_speed": 8.0,
    "turbulence_intensity": 0.12
}"#;

/// A document missing the frequency field.
pub const MALFORMED_JSON: &str = r#"{ "bins": [0, 90], "speed": 4.0, "ti": 0.1 }"#;

/// Build a JSON document in the on-disk shape from raw parts.
pub fn wind_json(bins: &[f64], freq: &[f64], speed: f64, ti: f64) -> String {
    serde_json::json!({
        "bins": bins,
        "freq": freq,
        "speed": speed,
        "ti": ti,
    })
    .to_string()
}
