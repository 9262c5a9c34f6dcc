//! Decode rejection paths: every failure names the offending token

use cheevos::{decode_condition, decode_logic, Error};

#[test]
fn test_unknown_flag_code() {
    let err = decode_condition("X:0xH0010=1").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownFlagCode {
            code: "X".to_string(),
            token: "X:0xH0010=1".to_string(),
        }
    );
}

#[test]
fn test_unknown_float_size_code() {
    let err = decode_condition("fZ0010=1").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownSizeCode {
            code: "fZ".to_string(),
            token: "fZ0010=1".to_string(),
        }
    );
}

#[test]
fn test_missing_address() {
    assert!(matches!(
        decode_condition("0xH=1"),
        Err(Error::MalformedCondition { .. })
    ));
    assert!(matches!(
        decode_condition("0x"),
        Err(Error::MalformedCondition { .. })
    ));
}

#[test]
fn test_empty_operand_side() {
    assert!(matches!(
        decode_condition("=5"),
        Err(Error::MalformedCondition { .. })
    ));
    assert!(matches!(
        decode_condition("0xH0010="),
        Err(Error::MalformedCondition { .. })
    ));
}

#[test]
fn test_comparatorless_garbage() {
    let err = decode_condition("hello").unwrap_err();
    match err {
        Error::MalformedCondition { token, .. } => assert_eq!(token, "hello"),
        other => panic!("expected MalformedCondition, got {other:?}"),
    }
}

#[test]
fn test_transform_prefix_requires_memory_reference() {
    // `d5` is a delta prefix followed by a non-reference
    assert!(matches!(
        decode_condition("d5=1"),
        Err(Error::MalformedCondition { .. })
    ));
}

#[test]
fn test_hit_count_overflow_rejected() {
    assert!(matches!(
        decode_condition("0xH0010=1.99999999999."),
        Err(Error::MalformedCondition { .. })
    ));
}

#[test]
fn test_failure_localizes_to_offending_token() {
    // First token is fine; the second one carries the bad size code.
    let err = decode_logic("0xH0010=1_0xZ0020=2").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownSizeCode {
            code: "Z".to_string(),
            token: "0xZ0020=2".to_string(),
        }
    );
}

#[test]
fn test_invalid_hex_digits() {
    assert!(matches!(
        decode_condition("0xH00gg=1"),
        Err(Error::MalformedCondition { .. })
    ));
}
