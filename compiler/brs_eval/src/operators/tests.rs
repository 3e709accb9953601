use brs_ir::ValueKind;
use brs_values::components::{BoxedScalar, RoArray};
use brs_values::EvalErrorKind;
use pretty_assertions::assert_eq;

use super::*;

fn binary(left: Value, op: BinaryOp, right: Value) -> Value {
    evaluate_binary(&left, op, &right).unwrap()
}

fn binary_err(left: Value, op: BinaryOp, right: Value) -> EvalErrorKind {
    evaluate_binary(&left, op, &right).unwrap_err().kind
}

#[test]
fn int_plus_float_is_float() {
    let sum = binary(Value::Int32(2), BinaryOp::Add, Value::Float(1.5));
    assert!(matches!(sum, Value::Float(x) if x == 3.5));
}

#[test]
fn int_divided_by_float_is_float() {
    let quotient = binary(Value::Int32(2), BinaryOp::Div, Value::Float(1.5));
    let Value::Float(x) = quotient else {
        panic!("expected a float, got {quotient:?}")
    };
    assert!((x - 1.333_33).abs() < 1e-4);
}

#[test]
fn integer_division_by_slash_is_floating() {
    assert!(matches!(
        binary(Value::Int32(5), BinaryOp::Div, Value::Int32(2)),
        Value::Float(x) if x == 2.5
    ));
    assert!(matches!(
        binary(Value::Int64(5), BinaryOp::Div, Value::Int32(2)),
        Value::Double(x) if x == 2.5
    ));
}

#[test]
fn promotion_ladder() {
    assert_eq!(binary(Value::Int32(1), BinaryOp::Add, Value::Int64(2)).kind(), ValueKind::Int64);
    assert_eq!(binary(Value::Int64(1), BinaryOp::Mul, Value::Float(2.0)).kind(), ValueKind::Float);
    assert_eq!(
        binary(Value::Float(1.0), BinaryOp::Sub, Value::Double(2.0)).kind(),
        ValueKind::Double
    );
}

#[test]
fn int32_arithmetic_wraps() {
    let wrapped = binary(Value::Int32(i32::MAX), BinaryOp::Add, Value::Int32(1));
    assert!(matches!(wrapped, Value::Int32(i32::MIN)));
}

#[test]
fn integer_division_and_modulo() {
    assert!(matches!(binary(Value::Int32(7), BinaryOp::IntDiv, Value::Int32(2)), Value::Int32(3)));
    assert!(matches!(
        binary(Value::Float(7.5), BinaryOp::IntDiv, Value::Int32(2)),
        Value::Int32(3)
    ));
    assert!(matches!(binary(Value::Int32(7), BinaryOp::Mod, Value::Int32(3)), Value::Int32(1)));
    assert_eq!(
        binary_err(Value::Int32(1), BinaryOp::IntDiv, Value::Int32(0)),
        EvalErrorKind::DivideByZero
    );
    assert_eq!(
        binary_err(Value::Int32(1), BinaryOp::Mod, Value::Int32(0)),
        EvalErrorKind::DivideByZero
    );
}

#[test]
fn powers() {
    assert!(matches!(binary(Value::Int32(2), BinaryOp::Pow, Value::Int32(10)), Value::Int32(1024)));
    assert!(matches!(
        binary(Value::Int32(2), BinaryOp::Pow, Value::Int32(-1)),
        Value::Float(x) if x == 0.5
    ));
    assert!(matches!(
        binary(Value::Double(9.0), BinaryOp::Pow, Value::Float(0.5)),
        Value::Double(x) if x == 3.0
    ));
}

#[test]
fn shifts() {
    assert!(matches!(binary(Value::Int32(1), BinaryOp::Shl, Value::Int32(4)), Value::Int32(16)));
    assert!(matches!(binary(Value::Int64(256), BinaryOp::Shr, Value::Int32(4)), Value::Int64(16)));
    assert!(matches!(
        binary_err(Value::Float(1.0), BinaryOp::Shl, Value::Int32(1)),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn string_concatenation_only_with_strings() {
    assert_eq!(binary("ab".into(), BinaryOp::Add, "cd".into()).as_str(), Some("abcd"));
    assert_eq!(
        binary_err("ab".into(), BinaryOp::Add, Value::Int32(1)),
        EvalErrorKind::TypeMismatch {
            operator: "+".to_string(),
            left: ValueKind::String,
            right: ValueKind::Int32,
        }
    );
    assert!(matches!(
        binary_err("ab".into(), BinaryOp::Sub, "a".into()),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn boolean_operators_require_booleans() {
    assert_eq!(binary(true.into(), BinaryOp::And, false.into()).as_bool(), Some(false));
    assert_eq!(binary(true.into(), BinaryOp::Or, false.into()).as_bool(), Some(true));
    assert!(matches!(
        binary_err(true.into(), BinaryOp::And, Value::Int32(1)),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn ordering() {
    assert_eq!(binary(Value::Int32(1), BinaryOp::Lt, Value::Double(1.5)).as_bool(), Some(true));
    assert_eq!(binary(Value::Int32(2), BinaryOp::LtEq, Value::Int32(2)).as_bool(), Some(true));
    assert_eq!(binary("b".into(), BinaryOp::Gt, "a".into()).as_bool(), Some(true));
    assert_eq!(
        binary(Value::Float(f32::NAN), BinaryOp::GtEq, Value::Float(0.0)).as_bool(),
        Some(false)
    );
    assert!(matches!(
        binary_err("1".into(), BinaryOp::Lt, Value::Int32(2)),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn containers_are_not_comparable_even_to_themselves() {
    let array = Value::Object(RoArray::object(Vec::new()));
    assert!(matches!(
        binary_err(array.clone(), BinaryOp::Lt, array),
        EvalErrorKind::NotComparable { .. }
    ));
}

#[test]
fn equality_never_raises() {
    let empty = || Value::Object(RoArray::object(Vec::new()));
    assert_eq!(binary(empty(), BinaryOp::Eq, empty()).as_bool(), Some(false));
    assert_eq!(binary(Value::Invalid, BinaryOp::Eq, Value::Invalid).as_bool(), Some(true));
    assert_eq!(binary(Value::Invalid, BinaryOp::NotEq, Value::Int32(5)).as_bool(), Some(true));
    assert_eq!(binary("5".into(), BinaryOp::Eq, Value::Int32(5)).as_bool(), Some(false));
}

#[test]
fn boxed_operands_are_unboxed() {
    let boxed = Value::Object(BoxedScalar::object(Value::Int32(4)));
    assert!(matches!(binary(boxed.clone(), BinaryOp::Mul, Value::Int32(2)), Value::Int32(8)));
    assert_eq!(binary(boxed, BinaryOp::Gt, Value::Int32(3)).as_bool(), Some(true));
}

#[test]
fn unary_operators() {
    assert!(matches!(evaluate_unary(UnaryOp::Neg, &Value::Int32(3)).unwrap(), Value::Int32(-3)));
    assert!(matches!(
        evaluate_unary(UnaryOp::Neg, &Value::Double(1.5)).unwrap(),
        Value::Double(x) if x == -1.5
    ));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Boolean(true)).unwrap().as_bool(), Some(false));
    assert!(matches!(evaluate_unary(UnaryOp::Not, &Value::Int32(0)).unwrap(), Value::Int32(-1)));
    assert!(matches!(
        evaluate_unary(UnaryOp::Neg, &Value::from("x")).unwrap_err().kind,
        EvalErrorKind::UnaryTypeMismatch { .. }
    ));
}

#[test]
fn increments_keep_kind() {
    assert!(matches!(step_by_one(&Value::Int32(1), true), Some(Value::Int32(2))));
    assert!(matches!(step_by_one(&Value::Float(1.5), false), Some(Value::Float(x)) if x == 0.5));
    assert!(step_by_one(&Value::from("s"), true).is_none());
}
