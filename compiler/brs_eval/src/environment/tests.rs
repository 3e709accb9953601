use std::sync::Arc;

use brs_ir::{Location, Position};
use brs_values::EvalErrorKind;
use pretty_assertions::assert_eq;

use super::*;

fn ident(name: &str) -> Identifier {
    Identifier::new(name, Location::synthetic())
}

fn ident_at(name: &str, line: u32) -> Identifier {
    Identifier::new(
        name,
        Location::new(Arc::from("main.brs"), Position::new(line, 4), Position::new(line, 12)),
    )
}

fn get_i32(env: &Environment, name: &str) -> Option<i32> {
    env.get(&ident(name)).ok()?.as_numeric().map(|n| n.as_i32())
}

#[test]
fn layers_are_checked_in_order() {
    let mut env = Environment::new();
    env.define(Scope::Mock, "x", Value::Int32(4));
    assert_eq!(get_i32(&env, "x"), Some(4));
    env.define(Scope::Global, "x", Value::Int32(3));
    assert_eq!(get_i32(&env, "x"), Some(3));
    env.define(Scope::Module, "x", Value::Int32(2));
    assert_eq!(get_i32(&env, "x"), Some(2));
    env.define(Scope::Function, "x", Value::Int32(1));
    assert_eq!(get_i32(&env, "x"), Some(1));
}

#[test]
fn names_are_case_insensitive() {
    let mut env = Environment::new();
    env.define(Scope::Function, "Counter", Value::Int32(1));
    assert_eq!(get_i32(&env, "COUNTER"), Some(1));
    assert!(env.has(&ident("counter")));
    assert_eq!(env.names(Scope::Function), vec!["counter"]);
}

#[test]
fn unresolved_names_fail_with_their_location() {
    let env = Environment::new();
    let err = env.get(&ident_at("missing", 3)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnresolvedReference {
            name: "missing".to_string()
        }
    );
    assert_eq!(err.location.map(|l| l.line()), Some(3));
    assert!(!env.has(&ident("missing")));
}

#[test]
fn m_is_always_resolvable() {
    let env = Environment::new();
    assert!(env.has(&ident("M")));
    let m = env.get(&ident("m")).unwrap();
    assert_eq!(m.describe(), "roAssociativeArray");
    assert!(m.as_object().unwrap().ptr_eq(env.get_root_m().as_object().unwrap()));
}

#[test]
fn line_num_resolves_to_the_reference_line() {
    let env = Environment::new();
    let line = env.get(&ident_at("LINE_NUM", 17)).unwrap();
    assert!(matches!(line, Value::Int32(17)));
}

#[test]
fn remove_only_touches_the_function_layer() {
    let mut env = Environment::new();
    env.define(Scope::Function, "local", Value::Int32(1));
    env.define(Scope::Module, "shared", Value::Int32(2));
    env.remove("LOCAL");
    env.remove("shared");
    assert!(!env.has(&ident("local")));
    assert_eq!(get_i32(&env, "shared"), Some(2));
}

#[test]
fn sub_environment_visibility() {
    let mut parent = Environment::new();
    parent.define(Scope::Function, "local", Value::Int32(1));
    parent.define(Scope::Module, "module", Value::Int32(2));
    parent.define(Scope::Global, "global", Value::Int32(3));
    parent.define(Scope::Mock, "mock", Value::Int32(4));

    let mut child = parent.create_sub_environment();
    assert!(!child.has(&ident("local")));
    assert_eq!(get_i32(&child, "module"), Some(2));
    assert_eq!(get_i32(&child, "global"), Some(3));
    assert_eq!(get_i32(&child, "mock"), Some(4));

    // Shared layers are the same stores.
    child.define(Scope::Module, "added", Value::Int32(5));
    assert_eq!(get_i32(&parent, "added"), Some(5));
    child.define(Scope::Function, "inner", Value::Int32(6));
    assert!(!parent.has(&ident("inner")));
}

#[test]
fn sub_environment_shares_m() {
    let parent = Environment::new();
    let child = parent.create_sub_environment();
    let child_m = child.get_m();
    child_m
        .as_object()
        .unwrap()
        .set_field("visited", Value::Boolean(true))
        .unwrap();
    let seen = parent.get_m().as_object().unwrap().get_field("VISITED");
    assert_eq!(seen.and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn m_and_host_node_can_be_replaced() {
    let mut env = Environment::new();
    let receiver = Value::Object(RoAssociativeArray::object());
    env.set_m(receiver.clone());
    assert!(env.get_m().as_object().unwrap().ptr_eq(receiver.as_object().unwrap()));
    assert!(!env.get_root_m().as_object().unwrap().ptr_eq(receiver.as_object().unwrap()));

    assert!(env.host_node().is_none());
    let node = RoAssociativeArray::object();
    env.set_host_node(Some(node.clone()));
    assert!(env.create_sub_environment().host_node().unwrap().ptr_eq(&node));
}

#[test]
fn shared_layers_are_shared_handles() {
    let parent = Environment::new();
    let child = parent.create_sub_environment();
    assert!(child.module.ptr_eq(&parent.module));
    assert!(child.mock.ptr_eq(&parent.mock));
}
