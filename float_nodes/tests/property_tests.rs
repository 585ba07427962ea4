//! Property-based checks of Float semantics through operation nodes.

mod common;

use common::RecordingHost;
use float_nodes::prelude::*;
use proptest::prelude::*;

fn finite() -> impl Strategy<Value = f64> {
    prop::num::f64::POSITIVE
        | prop::num::f64::NEGATIVE
        | prop::num::f64::NORMAL
        | prop::num::f64::SUBNORMAL
        | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn prop_modulo_takes_divisor_sign(a in finite(), b in finite()) {
        prop_assume!(b != 0.0);
        let host = RecordingHost::silent();
        let node = OperationNode::new(FloatOp::Mod);

        match node.execute(&host.context(), a, &Value::Float(b)) {
            Ok(Value::Float(r)) => {
                prop_assert!(r == 0.0 || (r < 0.0) == (b < 0.0), "{} % {} = {}", a, b, r);
                prop_assert!(r.abs() <= b.abs());
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn prop_to_s_round_trips(a in any::<f64>()) {
        prop_assume!(a.is_finite());
        let host = RecordingHost::silent();
        let cx = host.context();
        let text = match float_nodes::methods::to_s(&cx, a) {
            Value::Str(s) => s.to_string(),
            other => return Err(TestCaseError::fail(format!("not a string: {:?}", other))),
        };
        let parsed: f64 = text.parse().map_err(|e| TestCaseError::fail(format!("{}: {}", text, e)))?;
        prop_assert_eq!(parsed.to_bits(), a.to_bits(), "{}", text);
    }

    #[test]
    fn prop_compare_is_nil_only_for_nan(a in any::<f64>(), b in any::<f64>()) {
        let host = RecordingHost::silent();
        let node = OperationNode::new(FloatOp::Cmp);
        let result = node.execute(&host.context(), a, &Value::Float(b)).unwrap();
        prop_assert_eq!(result.is_nil(), a.is_nan() || b.is_nan());
    }

    #[test]
    fn prop_fixnum_and_float_operands_agree(a in finite(), n in -(1i64 << 52)..(1i64 << 52)) {
        let host = RecordingHost::silent();
        let cx = host.context();
        for op in [FloatOp::Add, FloatOp::Sub, FloatOp::Mul, FloatOp::Lt, FloatOp::Eq, FloatOp::Cmp] {
            let node = OperationNode::new(op);
            let via_int = node.execute(&cx, a, &Value::Fixnum(n)).unwrap();
            let via_float = node.execute(&cx, a, &Value::Float(n as f64)).unwrap();
            prop_assert_eq!(via_int, via_float);
        }
    }

    #[test]
    fn prop_round_is_half_away_from_zero(n in -1_000_000i64..1_000_000) {
        let host = RecordingHost::silent();
        let cx = host.context();
        let half = n as f64 + 0.5;
        let expected = if half > 0.0 { n + 1 } else { n };
        prop_assert_eq!(float_nodes::methods::round(&cx, half, None), Ok(Value::Fixnum(expected)));
    }
}
