use std::rc::Rc;

use brs_ir::{Literal, ValueKind};
use pretty_assertions::assert_eq;

use super::*;
use crate::components::{BoxedScalar, RoArray, RoAssociativeArray};
use crate::{Callable, Signature};

#[test]
fn renders_scalars() {
    assert_eq!(Value::Invalid.to_string(), "invalid");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Int32(-4).to_string(), "-4");
    assert_eq!(Value::Int64(9_876_543_210).to_string(), "9876543210");
    assert_eq!(Value::from("text").to_string(), "text");
}

#[test]
fn float_formatting() {
    assert_eq!(format_float(3.5), "3.5");
    assert_eq!(format_float(2.0 / 1.5), "1.333333");
    assert_eq!(format_float(100.0), "100");
    assert_eq!(format_float(15_000_000.0), "1.5e+07");
    assert_eq!(format_float(0.000_001), "1e-06");
    assert_eq!(format_float(f32::NAN), "nan");
    assert_eq!(format_float(f32::NEG_INFINITY), "-inf");
    assert_eq!(format_double(1.0 / 3.0), "0.333333333333333");
    assert_eq!(format_double(12_345_678_901.0), "12345678901");
    assert_eq!(format_double(0.0), "0");
}

#[test]
fn renders_callables_by_name() {
    fn noop(_: &mut dyn crate::Executor, _: &[Value]) -> crate::EvalResult {
        Ok(Value::Invalid)
    }
    let callable = Callable::native("helper", Signature::new(vec![], ValueKind::Void), noop);
    assert_eq!(Value::Callable(Rc::new(callable)).to_string(), "<Function: helper>");
}

#[test]
fn invalid_equality() {
    assert!(Value::Invalid.equal_to(&Value::Invalid));
    assert!(!Value::Invalid.equal_to(&Value::Int32(5)));
    assert!(!Value::Int32(5).equal_to(&Value::Invalid));
}

#[test]
fn numeric_equality_promotes() {
    assert!(Value::Int32(2).equal_to(&Value::Double(2.0)));
    assert!(Value::Int64(7).equal_to(&Value::Int32(7)));
    assert!(!Value::Float(1.5).equal_to(&Value::Int32(1)));
}

#[test]
fn mismatched_kinds_are_unequal() {
    assert!(!Value::from("1").equal_to(&Value::Int32(1)));
    assert!(!Value::Boolean(true).equal_to(&Value::Int32(1)));
}

#[test]
fn containers_never_equal() {
    let array = Value::Object(RoArray::object(Vec::new()));
    assert!(!array.equal_to(&Value::Object(RoArray::object(Vec::new()))));
    assert!(!array.equal_to(&array.clone()));
    let aa = Value::Object(RoAssociativeArray::object());
    assert!(!aa.equal_to(&Value::Invalid));
}

#[test]
fn boxed_values_compare_as_contents() {
    let boxed = Value::Object(BoxedScalar::object(Value::Int32(3)));
    assert!(boxed.equal_to(&Value::Int32(3)));
    assert!(Value::Double(3.0).equal_to(&boxed));
    assert_eq!(boxed.as_numeric().map(|n| n.as_i32()), Some(3));
    assert_eq!(boxed.kind(), ValueKind::Object);
    assert_eq!(boxed.unboxed().kind(), ValueKind::Int32);
}

#[test]
fn literals_convert() {
    assert!(matches!(Value::from(Literal::Int64(3)), Value::Int64(3)));
    assert!(matches!(Value::from(&Literal::Boolean(false)), Value::Boolean(false)));
    assert_eq!(Value::from(Literal::String("s".into())).as_str(), Some("s"));
}

#[test]
fn describe_uses_component_names() {
    assert_eq!(Value::Int32(1).describe(), "Integer");
    assert_eq!(Value::Object(RoArray::object(Vec::new())).describe(), "roArray");
}
