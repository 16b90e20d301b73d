// ABOUTME: Conformance suite for the decoder, driven by hex-encoded vectors.
// ABOUTME: Covers scalars, containers, tags, error classification, and the leniency contract.

use cbor_dyn::{
    cbor, decode, decode_with_consumed, decode_with_config, DecoderConfig, Error, ErrorKind, Value,
};

fn tagged(tag: u64, inner: Value) -> Value {
    Value::Tagged(tag, Box::new(inner))
}

#[test]
fn decodes_scalar_vectors() {
    let cases: Vec<(&str, Value)> = vec![
        ("00", Value::Int(0)),
        ("01", Value::Int(1)),
        ("0a", Value::Int(10)),
        ("17", Value::Int(23)),
        ("1818", Value::Int(24)),
        ("1819", Value::Int(25)),
        ("1864", Value::Int(100)),
        ("1903e8", Value::Int(1000)),
        ("1a000f4240", Value::Int(1_000_000)),
        ("1b000000e8d4a51000", Value::Int(1_000_000_000_000)),
        ("1bffffffffffffffff", Value::UInt(u64::MAX)),
        ("20", Value::Int(-1)),
        ("29", Value::Int(-10)),
        ("3863", Value::Int(-100)),
        ("3903e7", Value::Int(-1000)),
        ("f4", Value::Bool(false)),
        ("f5", Value::Bool(true)),
        ("f6", Value::Null),
        ("f7", Value::Null),
    ];

    for (hex, expected) in cases {
        assert_eq!(decode(hex).unwrap(), expected, "vector {hex}");
    }
}

#[test]
fn decodes_string_vectors() {
    let cases: Vec<(&str, Value)> = vec![
        ("40", Value::Bytes(vec![])),
        ("4401020304", Value::Bytes(vec![1, 2, 3, 4])),
        ("60", Value::Text(vec![])),
        ("6161", Value::from("a")),
        ("6449455446", Value::from("IETF")),
        ("62c3bc", Value::from("\u{fc}")),
    ];

    for (hex, expected) in cases {
        assert_eq!(decode(hex).unwrap(), expected, "vector {hex}");
    }
}

#[test]
fn decodes_container_vectors() {
    let cases: Vec<(&str, Value)> = vec![
        ("80", cbor!([])),
        ("83010203", cbor!([1, 2, 3])),
        ("8301820203820405", cbor!([1, [2, 3], [4, 5]])),
        (
            "98190102030405060708090a0b0c0d0e0f101112131415161718181819",
            (1..=25i64).map(Value::Int).collect::<Value>(),
        ),
        ("a0", cbor!({})),
        ("a201020304", cbor!({1: 2, 3: 4})),
        ("a26161016162820203", cbor!({"a": 1, "b": [2, 3]})),
        ("826161a161626163", cbor!(["a", {"b": "c"}])),
    ];

    for (hex, expected) in cases {
        assert_eq!(decode(hex).unwrap(), expected, "vector {hex}");
    }
}

#[test]
fn decodes_tagged_vectors() {
    let cases: Vec<(&str, Value)> = vec![
        ("c11a514b67b0", tagged(1, Value::Int(1_363_896_240))),
        ("d74401020304", tagged(23, Value::Bytes(vec![1, 2, 3, 4]))),
        (
            "d818456449455446",
            tagged(24, Value::Bytes(vec![0x64, 0x49, 0x45, 0x54, 0x46])),
        ),
        ("c1c100", tagged(1, tagged(1, Value::Int(0)))),
    ];

    for (hex, expected) in cases {
        assert_eq!(decode(hex).unwrap(), expected, "vector {hex}");
    }
}

#[test]
fn decodes_simple_value_vectors() {
    // Reserved codes 0-19 decode as null; code 24 carries the next byte raw.
    let cases: Vec<(&str, Value)> = vec![
        ("f0", Value::Null),
        ("f3", Value::Null),
        ("f818", Value::Simple(24)),
        ("f8ff", Value::Simple(255)),
    ];

    for (hex, expected) in cases {
        assert_eq!(decode(hex).unwrap(), expected, "vector {hex}");
    }
}

#[test]
fn rejects_invalid_and_unsupported_vectors() {
    let cases: Vec<(&str, Error, ErrorKind)> = vec![
        ("1c", Error::UnknownArgument(28), ErrorKind::InvalidFormat),
        ("1d", Error::UnknownArgument(29), ErrorKind::InvalidFormat),
        ("1e", Error::UnknownArgument(30), ErrorKind::InvalidFormat),
        ("1f", Error::UnknownArgument(31), ErrorKind::InvalidFormat),
        ("3c", Error::UnknownArgument(28), ErrorKind::InvalidFormat),
        // Indefinite-length string/container headers use marker 31.
        ("5f", Error::UnknownArgument(31), ErrorKind::InvalidFormat),
        ("7f", Error::UnknownArgument(31), ErrorKind::InvalidFormat),
        ("9f", Error::UnknownArgument(31), ErrorKind::InvalidFormat),
        ("bf", Error::UnknownArgument(31), ErrorKind::InvalidFormat),
        ("df", Error::UnknownArgument(31), ErrorKind::InvalidFormat),
        ("f93c00", Error::UnsupportedFloat(25), ErrorKind::NotImplemented),
        ("fa47c35000", Error::UnsupportedFloat(26), ErrorKind::NotImplemented),
        (
            "fb7e37e43c8800759c",
            Error::UnsupportedFloat(27),
            ErrorKind::NotImplemented,
        ),
        ("ff", Error::IndefiniteLength, ErrorKind::NotImplemented),
        ("fc", Error::UnsupportedSimple(28), ErrorKind::NotImplemented),
        ("fd", Error::UnsupportedSimple(29), ErrorKind::NotImplemented),
        ("fe", Error::UnsupportedSimple(30), ErrorKind::NotImplemented),
        (
            "3bffffffffffffffff",
            Error::IntegerOverflow,
            ErrorKind::NotImplemented,
        ),
        (
            "9bffffffffffffffff",
            Error::MaxContainerSizeExceeded,
            ErrorKind::LimitExceeded,
        ),
    ];

    for (hex, expected, kind) in cases {
        let error = decode(hex).unwrap_err();
        assert_eq!(error, expected, "vector {hex}");
        assert_eq!(error.kind(), kind, "vector {hex}");
    }
}

#[test]
fn reports_bytes_consumed() {
    let cases: Vec<(&str, usize)> = vec![
        ("00", 1),
        ("1864", 2),
        ("1903e8", 3),
        ("4401020304", 5),
        ("6449455446", 5),
        ("83010203", 4),
        ("a161610f", 4),
        ("c101", 2),
        ("f5", 1),
        ("f818", 2),
        // Trailing bytes are not consumed.
        ("00ffff", 1),
    ];

    for (hex, consumed) in cases {
        let (_, got) = decode_with_consumed(hex).unwrap();
        assert_eq!(got, consumed, "vector {hex}");
    }
}

#[test]
fn truncated_input_decodes_as_zero_padded() {
    let cases: Vec<(&str, Value, usize)> = vec![
        // Empty buffer: the fill byte decodes as integer 0, nothing consumed.
        ("", Value::Int(0), 0),
        // Width marker with missing argument bytes.
        ("18", Value::Int(0), 1),
        ("1901", Value::Int(256), 2),
        ("1a01", Value::Int(0x0100_0000), 2),
        // Declared string length past the end returns the short slice.
        ("45aabb", Value::Bytes(vec![0xaa, 0xbb]), 3),
        // Missing array elements are synthesized from fill bytes.
        ("8201", cbor!([1, 0]), 2),
        ("a101", cbor!({1: 0}), 2),
    ];

    for (hex, expected, consumed) in cases {
        let (value, got) = decode_with_consumed(hex).unwrap();
        assert_eq!(value, expected, "vector {hex}");
        assert_eq!(got, consumed, "vector {hex}");
    }
}

#[test]
fn later_duplicate_key_wins() {
    // {"a": 1, "b": 2, "a": 3}
    let value = decode("a3616101616202616103").unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Value::from("a")), Some(&Value::Int(3)));
    assert_eq!(map.get(&Value::from("b")), Some(&Value::Int(2)));
    let keys: Vec<&Value> = map.keys().collect();
    assert_eq!(keys, vec![&Value::from("a"), &Value::from("b")]);
}

#[test]
fn hex_input_is_case_insensitive_and_pads_odd_lengths() {
    assert_eq!(decode("F5").unwrap(), Value::Bool(true));
    assert_eq!(decode("f5").unwrap(), Value::Bool(true));
    // "1" pads to 0x10: inline unsigned 16.
    assert_eq!(decode("1").unwrap(), Value::Int(16));
}

#[test]
fn concatenated_values_decode_by_slicing() {
    let data = hex::decode("820102a1616105f6").unwrap();
    let mut offset = 0;
    let mut values = Vec::new();
    while offset < data.len() {
        let (value, consumed) = decode_with_consumed(&data[offset..]).unwrap();
        values.push(value);
        offset += consumed;
    }
    assert_eq!(values, vec![cbor!([1, 2]), cbor!({"a": 5}), Value::Null]);
}

#[test]
fn configured_limits_apply_at_the_entry_point() {
    let config = DecoderConfig {
        max_depth: 2,
        max_container_size: 4,
    };
    assert_eq!(
        decode_with_config("81818101", config.clone()),
        Err(Error::MaxDepthExceeded)
    );
    assert_eq!(
        decode_with_config("850102030405", config.clone()),
        Err(Error::MaxContainerSizeExceeded)
    );
    assert_eq!(
        decode_with_config("82810102", config).unwrap(),
        cbor!([[1], 2])
    );
}
