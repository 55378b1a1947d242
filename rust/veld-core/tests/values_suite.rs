//! Cross-type coercion and parsing behavior of the script value types.

use veld_core::{Float, Integer, List, LslString, Quaternion, Value, Vector3};

// ─── float tolerance ───

#[test]
fn floats_equal_within_half_a_millionth() {
    assert_eq!(Float(1.0), Float(1.000_000_4));
    assert_eq!(Float(-2.0), Float(-2.000_000_3));
    assert_ne!(Float(1.0), Float(1.1));
    assert_ne!(Float(1.0), Float(1.000_01));
}

// ─── integer cast grammar ───

#[test]
fn integer_cast_reference_cases() {
    assert_eq!(Integer::from_lsl("0x1A"), Integer(26));
    assert_eq!(Integer::from_lsl("  +5abc"), Integer(5));
    assert_eq!(Integer::from_lsl(""), Integer(0));
    assert_eq!(Integer::from_lsl("FALSE"), Integer(0));
}

// ─── vector and rotation guards ───

#[test]
fn zero_vector_normalizes_to_itself() {
    let n = Vector3::ZERO.norm();
    assert_eq!(n, Vector3::ZERO);
    assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
}

#[test]
fn zero_rotation_is_forced_to_identity() {
    assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0), Quaternion::IDENTITY);
}

// ─── string literal round trips ───

#[test]
fn vector_string_round_trip_within_tolerance() {
    let cases = [
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(-0.125, 0.25, -0.5),
        Vector3::new(120.5, -64.0, 0.001),
        Vector3::ZERO,
    ];
    for v in cases {
        let parsed = Vector3::from_lsl(&v.to_string());
        assert_eq!(parsed, v, "round trip of {v}");
    }
}

#[test]
fn rotation_string_round_trip_within_tolerance() {
    let q = Quaternion::new(0.1, -0.2, 0.3, 0.9);
    assert_eq!(Quaternion::from_lsl(&q.to_string()), q);
}

#[test]
fn six_decimal_formatting_is_lossy_beyond_tolerance() {
    let v = Vector3::new(0.123_456_789, 0.0, 0.0);
    let parsed = Vector3::from_lsl(&v.to_string());
    // not bit-identical, but equal under the script tolerance
    assert_ne!(parsed.x, v.x);
    assert_eq!(parsed, v);
}

// ─── string conversions ───

#[test]
fn string_casts_to_numbers() {
    let s = LslString::from("  -12.75e1 trailing");
    assert_eq!(s.to_float(), Float(-127.5));
    assert_eq!(s.to_integer(), Integer(-12));
}

#[test]
fn string_from_scalars_uses_script_forms() {
    assert_eq!(LslString::from(Integer(7)).as_str(), "7");
    assert_eq!(LslString::from(Float(7.0)).as_str(), "7.000000");
}

#[test]
fn uuid_shaped_strings() {
    let key = LslString::from("5748decc-f629-461c-9a36-a35a221fe21f");
    assert!(key.as_uuid().is_some());
    assert!(key.is_truthy());
    let nil = LslString::from("00000000-0000-0000-0000-000000000000");
    assert!(nil.as_uuid().is_some());
    assert!(!nil.is_truthy());
}

// ─── list interchange ───

#[test]
fn list_serde_round_trip() {
    let l = List::from(vec![
        Value::from(1),
        Value::from(2.5),
        Value::from("three"),
        Value::from(Vector3::new(1.0, 2.0, 3.0)),
        Value::from(Quaternion::IDENTITY),
    ]);
    let json = serde_json::to_string(&l).unwrap();
    let back: List = serde_json::from_str(&json).unwrap();
    assert_eq!(back, l);
}

#[test]
fn zero_rotation_survives_deserialization_as_identity() {
    let json = r#"{"Rotation":{"x":0.0,"y":0.0,"z":0.0,"s":0.0}}"#;
    let v: Value = serde_json::from_str(json).unwrap();
    assert_eq!(v.as_rotation().unwrap(), Quaternion::IDENTITY);
}

#[test]
fn csv_round_trip_of_string_forms() {
    let l = List::from(vec![
        Value::from(1),
        Value::from(Vector3::new(1.0, 2.0, 3.0)),
        Value::from("tail"),
    ]);
    let csv = l.to_csv();
    let back = List::from_csv(csv.as_str());
    assert_eq!(back.len(), 3);
    assert_eq!(back.get_string(0).unwrap().as_str(), "1");
    assert_eq!(
        back.get_string(1).unwrap().as_str(),
        "<1.000000,2.000000,3.000000>"
    );
    assert_eq!(back.get_string(2).unwrap().as_str(), "tail");
}
