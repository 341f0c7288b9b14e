//! Tests for loading wind records from JSON files.

use test_utils::{fixtures, four_bins, temp_test_dir, write_test_file};
use windrose_common::{load, WindInput, WindRoseError};

#[test]
fn test_load_sixteen_point_file() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "wind.json", fixtures::SIXTEEN_POINT_JSON);

    let input = load(&path).unwrap();
    assert_eq!(input.len(), 16);
    assert_eq!(input.dominant_direction(), Some(225.0));
    assert_eq!(input.dominant_compass(), Some("SW"));
    assert!((input.total_frequency() - 1.0).abs() < 1e-9);
}

#[test]
fn test_load_long_form_names() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "wind.json", fixtures::LONG_FORM_JSON);

    let input = load(&path).unwrap();
    let expected = WindInput::new(
        four_bins::BINS.to_vec(),
        four_bins::FREQ.to_vec(),
        four_bins::SPEED,
        four_bins::TI,
    );
    assert_eq!(input, expected);
}

#[test]
fn test_load_missing_file() {
    let dir = temp_test_dir();
    let err = load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, WindRoseError::InputRead { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_load_malformed_document() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "bad.json", fixtures::MALFORMED_JSON);
    let err = load(&path).unwrap_err();
    assert!(matches!(err, WindRoseError::InputParse { .. }));
}

#[test]
fn test_load_rejects_empty_sequences() {
    let dir = temp_test_dir();
    let json = fixtures::wind_json(&[], &[], 5.0, 0.1);
    let path = write_test_file(dir.path(), "empty.json", &json);
    assert!(matches!(load(&path), Err(WindRoseError::EmptyInput)));
}

#[test]
fn test_load_rejects_mismatched_lengths() {
    let dir = temp_test_dir();
    let json = fixtures::wind_json(&[0.0, 90.0, 180.0], &[0.5, 0.5], 5.0, 0.1);
    let path = write_test_file(dir.path(), "mismatch.json", &json);
    assert!(matches!(
        load(&path),
        Err(WindRoseError::LengthMismatch { bins: 3, freq: 2 })
    ));
}
