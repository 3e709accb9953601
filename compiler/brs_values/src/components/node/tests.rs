use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::call_method;
use crate::Member;

fn label() -> ObjectRef {
    RoSGNode::object("Label").unwrap()
}

#[test]
fn fields_compose_along_the_extends_chain() {
    let node = RoSGNode::new("label").unwrap();
    assert_eq!(node.subtype(), "Label");
    let names: Vec<String> = node.field_entries().into_iter().map(|(name, _)| name).collect();
    assert_eq!(&names[..3], ["id", "focusable", "focusedChild"]);
    assert!(names.contains(&"visible".to_string()));
    assert!(names.contains(&"text".to_string()));
    assert!(!names.contains(&"layoutDirection".to_string()));
}

#[test]
fn unknown_subtype_has_no_node() {
    assert!(RoSGNode::new("Poster9000").is_none());
}

#[test]
fn fields_are_case_insensitive_and_shadow_operations() {
    let node = label();
    node.set_field("TEXT", Value::from("hello")).unwrap();
    assert_eq!(node.get_field("text").unwrap().as_str(), Some("hello"));
    assert!(matches!(node.get_member("Text"), Member::Field(_)));
    assert!(matches!(node.get_member("getField"), Member::Operation(_)));
}

#[test]
fn wrong_kind_leaves_field_unchanged() {
    let node = label();
    node.set_field("text", Value::from("kept")).unwrap();
    node.set_field("text", Value::Int32(3)).unwrap();
    assert_eq!(node.get_field("text").unwrap().as_str(), Some("kept"));

    let ok = call_method(&node, "setField", vec!["wrap".into(), Value::from("yes")]).unwrap();
    assert_eq!(ok.as_bool(), Some(false));
    assert_eq!(node.get_field("wrap").unwrap().as_bool(), Some(false));
}

#[test]
fn numeric_fields_convert() {
    let node = label();
    node.set_field("width", Value::Int32(120)).unwrap();
    assert_eq!(node.get_field("width").unwrap().kind(), ValueKind::Float);
    node.set_field("numLines", Value::Double(2.7)).unwrap();
    assert_eq!(node.get_field("numLines").unwrap().kind(), ValueKind::Int32);
}

#[test]
fn dot_assignment_declares_unknown_fields() {
    let node = label();
    node.set_field("score", Value::Int32(10)).unwrap();
    assert_eq!(
        call_method(&node, "hasField", vec!["SCORE".into()]).unwrap().as_bool(),
        Some(true)
    );
    node.set_field("score", Value::from("ten")).unwrap();
    assert_eq!(node.get_field("score").unwrap().kind(), ValueKind::Int32);
}

#[test]
fn add_get_remove_fields() {
    let node = RoSGNode::object("Node").unwrap();
    let added = call_method(&node, "addField", vec!["count".into(), "integer".into()]).unwrap();
    assert_eq!(added.as_bool(), Some(true));
    assert_eq!(
        call_method(&node, "getField", vec!["count".into()]).unwrap().kind(),
        ValueKind::Int32
    );
    let bad = call_method(&node, "addField", vec!["x".into(), "quaternion".into()]).unwrap();
    assert_eq!(bad.as_bool(), Some(false));

    assert_eq!(
        call_method(&node, "removeField", vec!["count".into()]).unwrap().as_bool(),
        Some(true)
    );
    assert!(call_method(&node, "getField", vec!["count".into()]).unwrap().is_invalid());
}

#[test]
fn add_fields_and_get_fields() {
    let node = RoSGNode::object("Node").unwrap();
    let extra = RoAssociativeArray::from_entries([
        ("title".to_string(), Value::from("Intro")),
        ("id".to_string(), Value::from("ignored")),
    ]);
    call_method(&node, "addFields", vec![Value::Object(ObjectRef::new(extra))]).unwrap();

    let fields = call_method(&node, "getFields", vec![]).unwrap();
    let keys = fields
        .as_object()
        .unwrap()
        .with(|aa: &RoAssociativeArray| {
            aa.entries().iter().map(|(k, _)| k.clone()).collect::<Vec<_>>()
        })
        .unwrap();
    assert_eq!(keys, vec!["id", "focusable", "focusedChild", "title"]);
    assert_eq!(node.get_field("id").unwrap().as_str(), Some(""));
}

#[test]
fn subtype_and_children() {
    let parent = RoSGNode::object("Group").unwrap();
    assert_eq!(call_method(&parent, "subtype", vec![]).unwrap().as_str(), Some("Group"));

    let child = label();
    let appended = call_method(&parent, "appendChild", vec![Value::Object(child.clone())]).unwrap();
    assert_eq!(appended.as_bool(), Some(true));
    let self_append =
        call_method(&parent, "appendChild", vec![Value::Object(parent.clone())]).unwrap();
    assert_eq!(self_append.as_bool(), Some(false));

    assert_eq!(
        call_method(&parent, "getChildCount", vec![]).unwrap().as_numeric().unwrap().as_i32(),
        1
    );
    let first = call_method(&parent, "getChild", vec![Value::Int32(0)]).unwrap();
    assert!(first.as_object().unwrap().ptr_eq(&child));
    assert!(call_method(&parent, "getChild", vec![Value::Int32(4)]).unwrap().is_invalid());
}

#[test]
fn renders_fields() {
    let node = RoSGNode::object("Rectangle").unwrap();
    let text = node.render(None);
    assert!(text.starts_with("<Component: roSGNode:Rectangle> =\n{\n    id: \n"));
    assert!(text.ends_with('}'));
}
