use pretty_assertions::assert_eq;

use super::BoxedScalar;
use crate::test_helpers::call_method;
use crate::Value;

fn call_str(object: &crate::ObjectRef, name: &str, args: Vec<Value>) -> String {
    call_method(object, name, args).unwrap().render(None)
}

#[test]
fn component_names_follow_kind() {
    let cases = [
        (Value::Int32(1), "roInt"),
        (Value::Int64(1), "roLongInteger"),
        (Value::Float(1.0), "roFloat"),
        (Value::Double(1.0), "roDouble"),
        (Value::from("s"), "roString"),
        (Value::Boolean(true), "roBoolean"),
        (Value::Invalid, "roInvalid"),
    ];
    for (value, name) in cases {
        assert_eq!(BoxedScalar::object(value).component_name(), name);
    }
}

#[test]
fn boxed_equals_its_contents() {
    let boxed = Value::Object(BoxedScalar::object(Value::Int32(5)));
    assert!(boxed.equal_to(&Value::Int32(5)));
    assert!(Value::Int32(5).equal_to(&boxed));
    assert!(boxed.equal_to(&Value::Double(5.0)));
    assert!(!boxed.equal_to(&Value::from("5")));

    let boxed_invalid = Value::Object(BoxedScalar::object(Value::Invalid));
    assert!(boxed_invalid.equal_to(&Value::Invalid));
}

#[test]
fn getters_and_setters() {
    let boxed = BoxedScalar::object(Value::Int32(1));
    call_method(&boxed, "setInt", vec![Value::Int32(42)]).unwrap();
    assert!(matches!(
        call_method(&boxed, "getInt", vec![]).unwrap(),
        Value::Int32(42)
    ));
    assert!(boxed.get_operation("getString").is_none());
}

#[test]
fn to_str_formats_floats() {
    let boxed = BoxedScalar::object(Value::Float(2.5));
    assert_eq!(call_str(&boxed, "toStr", vec![]), "2.5");
}

#[test]
fn string_ops() {
    let s = BoxedScalar::object(Value::from("  Hello World  "));
    assert_eq!(call_str(&s, "trim", vec![]), "Hello World");

    let s = BoxedScalar::object(Value::from("Hello World"));
    assert_eq!(call_str(&s, "len", vec![]), "11");
    assert_eq!(call_str(&s, "left", vec![Value::Int32(5)]), "Hello");
    assert_eq!(call_str(&s, "right", vec![Value::Int32(5)]), "World");
    assert_eq!(call_str(&s, "mid", vec![Value::Int32(6)]), "World");
    assert_eq!(call_str(&s, "mid", vec![Value::Int32(0), Value::Int32(4)]), "Hell");
    assert_eq!(call_str(&s, "lcase", vec![]), "hello world");
    assert_eq!(call_str(&s, "UCASE", vec![]), "HELLO WORLD");
}

#[test]
fn instr_overloads() {
    let s = BoxedScalar::object(Value::from("abcabc"));
    assert_eq!(call_str(&s, "instr", vec![Value::from("c")]), "2");
    assert_eq!(call_str(&s, "instr", vec![Value::Int32(3), Value::from("c")]), "5");
    assert_eq!(call_str(&s, "instr", vec![Value::from("z")]), "-1");
}

#[test]
fn unboxes() {
    let boxed = BoxedScalar::object(Value::Boolean(true));
    assert_eq!(Value::Object(boxed).as_bool(), Some(true));
}
