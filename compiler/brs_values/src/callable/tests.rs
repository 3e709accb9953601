use brs_ir::ValueKind;
use pretty_assertions::assert_eq;

use super::*;
use crate::components::RoArray;
use crate::{ObjectRef, Value};

fn noop(_: &mut dyn Executor, _: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::Invalid)
}

fn mid() -> Callable {
    Callable::overloaded_method(
        "mid",
        vec![
            Signature::new(
                vec![Argument::required("start", ValueKind::Int32)],
                ValueKind::String,
            ),
            Signature::new(
                vec![
                    Argument::required("start", ValueKind::Int32),
                    Argument::required("length", ValueKind::Int32),
                ],
                ValueKind::String,
            ),
        ],
        noop,
    )
}

#[test]
fn required_count_stops_at_first_default() {
    let sig = Signature::new(
        vec![
            Argument::required("a", ValueKind::Int32),
            Argument::optional("b", ValueKind::Int32, Value::Int32(1)),
            Argument::optional("c", ValueKind::Int32, Value::Int32(2)),
        ],
        ValueKind::Void,
    );
    assert_eq!(sig.required_count(), 1);
    assert!(!sig.accepts(0));
    assert!(sig.accepts(1));
    assert!(sig.accepts(3));
    assert!(!sig.accepts(4));
    assert_eq!(sig.arity_description(), "1-3");
}

#[test]
fn first_matching_arity_wins() {
    let callable = mid();
    assert_eq!(callable.select_signature(1).map(|s| s.args.len()), Some(1));
    assert_eq!(callable.select_signature(2).map(|s| s.args.len()), Some(2));
    assert!(callable.select_signature(3).is_none());
    assert_eq!(callable.arity_description(), "1 or 2");
}

#[test]
fn bind_shares_signatures_and_sets_receiver() {
    let callable = mid();
    let receiver = ObjectRef::new(RoArray::new(Vec::new()));
    let bound = callable.bind(receiver.clone());
    assert!(callable.receiver().is_none());
    assert!(bound.receiver().is_some_and(|r| r.ptr_eq(&receiver)));
    assert_eq!(bound.name(), "mid");
    assert_eq!(bound.signatures().len(), 2);
}
