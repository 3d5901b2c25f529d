//! JSON shape of the result types handed to frontends.

use harmonicviz_core::{StopInput, artificial_harmonics, harmonic_nodes, note_from_frequency};
use serde_json::json;

#[test]
fn note_serializes_with_plain_fields() {
    let value = serde_json::to_value(note_from_frequency(440.0)).unwrap();
    let fields: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(value["name"], "A4");
    assert_eq!(value["frequency"], 440.0);
    assert!(value["cents"].as_f64().unwrap().abs() < 1e-9);
}

#[test]
fn stop_input_is_tagged_by_mode() {
    let value = serde_json::to_value(StopInput::Cents(250)).unwrap();
    assert_eq!(value, json!({ "mode": "cents", "value": 250 }));

    let back: StopInput = serde_json::from_value(json!({ "mode": "fret", "value": 7 })).unwrap();
    assert_eq!(back, StopInput::Fret(7));
}

#[test]
fn artificial_harmonics_serialize_as_an_array_of_eight() {
    let value = serde_json::to_value(artificial_harmonics(196.0, StopInput::Fret(4))).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 8);
    assert_eq!(entries[1]["difficulty"], "Unreachable");
    assert_eq!(entries[3]["touch_fret"], 9);
}

#[test]
fn nodes_serialize_with_their_fraction() {
    let value = serde_json::to_value(harmonic_nodes(3)).unwrap();
    assert_eq!(value[0]["numerator"], 1);
    assert_eq!(value[1]["numerator"], 2);
    assert_eq!(value[1]["denominator"], 3);
}
