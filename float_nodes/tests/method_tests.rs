//! Selector-level Float sends and unary methods.

mod common;

use common::RecordingHost;
use float_nodes::prelude::*;
use num_bigint::BigInt;

// ==================== Selector Resolution ====================

#[test]
fn test_send_routes_binary_through_shared_node() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let sites = FloatCallSites::new();

    assert_eq!(
        sites.send(&cx, 1.0, "__slash__", &[Value::Fixnum(4)]),
        Ok(Value::Float(0.25))
    );
    assert_eq!(
        sites.send(&cx, 1.0, "/", &[Value::Float(4.0)]),
        Ok(Value::Float(0.25))
    );
    assert_eq!(
        sites.node(FloatOp::Div).installed_shapes(),
        vec![OperandShape::SmallInteger, OperandShape::Float]
    );
    assert_eq!(
        sites.send(&cx, 2.0, "===", &[Value::Fixnum(2)]),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_send_checks_arity() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let sites = FloatCallSites::new();

    assert_eq!(
        sites.send(&cx, 1.0, "+", &[]),
        Err(RuntimeError::argument_error(
            "wrong number of arguments (given 0, expected 1)"
        ))
    );
    assert_eq!(
        sites.send(&cx, 1.0, "round", &[Value::Fixnum(1), Value::Fixnum(2)]),
        Err(RuntimeError::argument_error(
            "wrong number of arguments (given 2, expected 0..1)"
        ))
    );
}

#[test]
fn test_send_unknown_selector() {
    let host = RecordingHost::silent();
    let sites = FloatCallSites::new();
    let err = sites
        .send(&host.context(), 1.0, "frobnicate", &[])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "NoMethodError: undefined method `frobnicate' for Float"
    );
}

// ==================== Unary Methods ====================

#[test]
fn test_unary_aliases() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let sites = FloatCallSites::new();

    for name in ["abs", "magnitude"] {
        assert_eq!(sites.send(&cx, -2.5, name, &[]), Ok(Value::Float(2.5)));
    }
    for name in ["to_i", "to_int", "truncate"] {
        assert_eq!(sites.send(&cx, -2.9, name, &[]), Ok(Value::Fixnum(-2)));
    }
    for name in ["to_s", "inspect"] {
        assert_eq!(sites.send(&cx, 1e20, name, &[]), Ok(Value::string("1.0e+20")));
    }
    assert_eq!(sites.send(&cx, 0.0, "-@", &[]), Ok(Value::Float(-0.0)));
    assert_eq!(sites.send(&cx, 1.25, "to_f", &[]), Ok(Value::Float(1.25)));
}

#[test]
fn test_large_values_become_bignums() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let sites = FloatCallSites::new();

    assert_eq!(
        sites.send(&cx, 1e20, "floor", &[]),
        Ok(Value::bignum(BigInt::from(100_000_000_000_000_000_000u128)))
    );
    assert_eq!(
        sites.send(&cx, -9.3e18, "ceil", &[]),
        Ok(Value::bignum(BigInt::from(-9_300_000_000_000_000_000i128)))
    );
}

#[test]
fn test_non_finite_conversions_raise() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let sites = FloatCallSites::new();

    for name in ["ceil", "floor", "round", "to_i"] {
        let err = sites.send(&cx, f64::NEG_INFINITY, name, &[]).unwrap_err();
        assert_eq!(err.to_string(), "FloatDomainError: Infinity", "{}", name);
        let err = sites.send(&cx, f64::NAN, name, &[]).unwrap_err();
        assert_eq!(err.to_string(), "FloatDomainError: NaN", "{}", name);
    }
}

#[test]
fn test_round_with_digits_goes_to_runtime() {
    let host = RecordingHost::new(|receiver, method, args| {
        Ok(Value::string(&format!("{}.{}({})", receiver, method, args[0])))
    });
    let sites = FloatCallSites::new();
    assert_eq!(
        sites.send(&host.context(), 2.675, "round", &[Value::Fixnum(2)]),
        Ok(Value::string("2.675.round_internal(2)"))
    );
}

#[test]
fn test_predicates() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let sites = FloatCallSites::new();

    assert_eq!(
        sites.send(&cx, f64::INFINITY, "infinite?", &[]),
        Ok(Value::Fixnum(1))
    );
    assert_eq!(sites.send(&cx, 3.0, "infinite?", &[]), Ok(Value::Nil));
    assert_eq!(sites.send(&cx, f64::NAN, "nan?", &[]), Ok(Value::Bool(true)));
    assert_eq!(sites.send(&cx, 3.0, "nan?", &[]), Ok(Value::Bool(false)));
}

// ==================== Formatting ====================

#[test]
fn test_to_s_table() {
    let host = RecordingHost::silent();
    let cx = host.context();
    let samples = [
        0.0,
        -0.0,
        1.0,
        -2.5,
        0.1,
        1.0 / 3.0,
        100.0,
        1e15,
        1e16,
        123456789.125,
        0.001,
        0.0001,
        0.00001,
        2.5e-10,
        1.7976931348623157e308,
        5e-324,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
    ];
    let table: Vec<String> = samples
        .iter()
        .map(|&f| float_nodes::methods::to_s(&cx, f).to_string())
        .collect();

    insta::assert_snapshot!(table.join("\n"), @r#"
    "0.0"
    "-0.0"
    "1.0"
    "-2.5"
    "0.1"
    "0.3333333333333333"
    "100.0"
    "1000000000000000.0"
    "1.0e+16"
    "123456789.125"
    "0.001"
    "0.0001"
    "1.0e-05"
    "2.5e-10"
    "1.7976931348623157e+308"
    "5.0e-324"
    "Infinity"
    "-Infinity"
    "NaN"
    "#);
}
