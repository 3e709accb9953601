//! `roSGNode`: a scene-graph node with a typed, ordered field table.
//!
//! A subtype's fields are composed from flat schema fragments, walking the
//! `extends` chain from `Node` down. Field names match case-insensitively.

use std::any::Any;

use brs_ir::ValueKind;

use super::{receiver, receiver_mut, RoAssociativeArray};
use crate::{
    Argument, BrsComponent, Callable, EvalError, EvalResult, Executor, Interfaces, Numeric,
    ObjectRef, Signature, Value,
};

/// Initial value of a declared field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldDefault {
    Invalid,
    Boolean(bool),
    Int32(i32),
    Float(f32),
    String(&'static str),
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Invalid => Value::Invalid,
            FieldDefault::Boolean(b) => Value::Boolean(b),
            FieldDefault::Int32(n) => Value::Int32(n),
            FieldDefault::Float(x) => Value::Float(x),
            FieldDefault::String(s) => Value::string(s),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    pub default: FieldDefault,
}

const fn field(name: &'static str, kind: ValueKind, default: FieldDefault) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        default,
    }
}

/// One schema fragment: a subtype, its parent, and the fields it adds.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    pub subtype: &'static str,
    pub extends: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

pub static FIELD_FRAGMENTS: &[Fragment] = &[
    Fragment {
        subtype: "Node",
        extends: None,
        fields: &[
            field("id", ValueKind::String, FieldDefault::String("")),
            field("focusable", ValueKind::Boolean, FieldDefault::Boolean(false)),
            field("focusedChild", ValueKind::Dynamic, FieldDefault::Invalid),
        ],
    },
    Fragment {
        subtype: "Group",
        extends: Some("Node"),
        fields: &[
            field("visible", ValueKind::Boolean, FieldDefault::Boolean(true)),
            field("opacity", ValueKind::Float, FieldDefault::Float(1.0)),
            field("translation", ValueKind::Dynamic, FieldDefault::Invalid),
            field("rotation", ValueKind::Float, FieldDefault::Float(0.0)),
        ],
    },
    Fragment {
        subtype: "LayoutGroup",
        extends: Some("Group"),
        fields: &[
            field("layoutDirection", ValueKind::String, FieldDefault::String("vert")),
            field("horizAlignment", ValueKind::String, FieldDefault::String("left")),
            field("vertAlignment", ValueKind::String, FieldDefault::String("top")),
        ],
    },
    Fragment {
        subtype: "Label",
        extends: Some("Group"),
        fields: &[
            field("text", ValueKind::String, FieldDefault::String("")),
            field("color", ValueKind::String, FieldDefault::String("0xddddddff")),
            field("horizAlign", ValueKind::String, FieldDefault::String("left")),
            field("vertAlign", ValueKind::String, FieldDefault::String("top")),
            field("width", ValueKind::Float, FieldDefault::Float(0.0)),
            field("height", ValueKind::Float, FieldDefault::Float(0.0)),
            field("numLines", ValueKind::Int32, FieldDefault::Int32(0)),
            field("wrap", ValueKind::Boolean, FieldDefault::Boolean(false)),
        ],
    },
    Fragment {
        subtype: "Rectangle",
        extends: Some("Group"),
        fields: &[
            field("width", ValueKind::Float, FieldDefault::Float(0.0)),
            field("height", ValueKind::Float, FieldDefault::Float(0.0)),
            field("color", ValueKind::String, FieldDefault::String("0xFFFFFFFF")),
        ],
    },
];

fn fragment(subtype: &str) -> Option<&'static Fragment> {
    FIELD_FRAGMENTS
        .iter()
        .find(|f| f.subtype.eq_ignore_ascii_case(subtype))
}

/// Fragments for `subtype`, root first.
fn fragment_chain(subtype: &str) -> Option<Vec<&'static Fragment>> {
    let mut chain = vec![fragment(subtype)?];
    while let Some(parent) = chain.last().and_then(|f| f.extends) {
        chain.push(fragment(parent)?);
    }
    chain.reverse();
    Some(chain)
}

/// Kind named by `addField`'s type argument.
fn field_kind(type_name: &str) -> Option<ValueKind> {
    match type_name.to_ascii_lowercase().as_str() {
        "int" | "integer" => Some(ValueKind::Int32),
        "bool" | "boolean" => Some(ValueKind::Boolean),
        "str" | "string" => Some(ValueKind::String),
        "node" | "array" | "assocarray" | "roarray" | "roassociativearray" => {
            Some(ValueKind::Object)
        }
        other => ValueKind::from_type_name(other),
    }
}

fn zero_value(kind: ValueKind) -> Value {
    match kind {
        ValueKind::Boolean => Value::Boolean(false),
        ValueKind::String => Value::string(""),
        ValueKind::Int32 => Value::Int32(0),
        ValueKind::Int64 => Value::Int64(0),
        ValueKind::Float => Value::Float(0.0),
        ValueKind::Double => Value::Double(0.0),
        _ => Value::Invalid,
    }
}

/// `value` as stored in a field of `kind`, or `None` if it does not fit.
fn coerce(kind: ValueKind, value: Value) -> Option<Value> {
    if kind == ValueKind::Dynamic {
        return Some(value);
    }
    let value = if value.kind() == ValueKind::Object && kind != ValueKind::Object {
        value.unboxed()
    } else {
        value
    };
    if value.kind() == kind {
        return Some(value);
    }
    if kind.is_numeric() {
        return value.as_numeric().map(|n| n.convert(kind).into_value());
    }
    // Object fields may be cleared with invalid.
    (kind == ValueKind::Object && value.is_invalid()).then_some(value)
}

#[derive(Clone, Debug)]
struct NodeField {
    name: String,
    kind: ValueKind,
    value: Value,
}

pub struct RoSGNode {
    subtype: String,
    fields: Vec<NodeField>,
    children: Vec<ObjectRef>,
    interfaces: Interfaces,
}

impl RoSGNode {
    /// Node of a known subtype; `None` for subtypes without a schema.
    pub fn new(subtype: &str) -> Option<Self> {
        let chain = fragment_chain(subtype)?;
        let mut node = RoSGNode {
            subtype: chain.last().map_or(subtype, |f| f.subtype).to_string(),
            fields: Vec::new(),
            children: Vec::new(),
            interfaces: node_interfaces(),
        };
        for spec in chain.iter().flat_map(|f| f.fields) {
            node.add_field(spec.name, spec.kind, spec.default.to_value());
        }
        Some(node)
    }

    pub fn object(subtype: &str) -> Option<ObjectRef> {
        RoSGNode::new(subtype).map(ObjectRef::new)
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|i| &self.fields[i].value)
    }

    /// Declare a field. A later declaration of an existing field replaces
    /// it.
    pub fn add_field(&mut self, name: &str, kind: ValueKind, value: Value) {
        let field = NodeField {
            name: name.to_string(),
            kind,
            value,
        };
        match self.position(name) {
            Some(i) => self.fields[i] = field,
            None => self.fields.push(field),
        }
    }

    pub fn remove_field(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.fields.remove(i);
                true
            }
            None => false,
        }
    }

    /// Store into a declared field. A value of the wrong kind leaves the
    /// field unchanged and returns `false`.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        let field = &mut self.fields[i];
        let got = value.kind();
        match coerce(field.kind, value) {
            Some(value) => {
                field.value = value;
                true
            }
            None => {
                tracing::warn!(
                    node = %self.subtype,
                    field = %field.name,
                    expected = %field.kind,
                    %got,
                    "node field type mismatch"
                );
                false
            }
        }
    }

    pub fn children(&self) -> &[ObjectRef] {
        &self.children
    }

    /// Field name/value pairs in declaration order.
    pub fn field_entries(&self) -> Vec<(String, Value)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

fn node_interfaces() -> Interfaces {
    let name = || Argument::required("name", ValueKind::String);
    let mut interfaces = Interfaces::new();
    interfaces.register(
        "ifSGNodeField",
        vec![
            Callable::method(
                "addField",
                Signature::new(
                    vec![
                        name(),
                        Argument::required("type", ValueKind::String),
                        Argument::optional(
                            "alwaysNotify",
                            ValueKind::Boolean,
                            Value::Boolean(false),
                        ),
                    ],
                    ValueKind::Boolean,
                ),
                add_field,
            ),
            Callable::method(
                "addFields",
                Signature::new(
                    vec![Argument::required("fields", ValueKind::Object)],
                    ValueKind::Boolean,
                ),
                add_fields,
            ),
            Callable::method(
                "getField",
                Signature::new(vec![name()], ValueKind::Dynamic),
                get_field,
            ),
            Callable::method(
                "setField",
                Signature::new(
                    vec![name(), Argument::required("value", ValueKind::Dynamic)],
                    ValueKind::Boolean,
                ),
                set_field,
            ),
            Callable::method(
                "hasField",
                Signature::new(vec![name()], ValueKind::Boolean),
                has_field,
            ),
            Callable::method(
                "removeField",
                Signature::new(vec![name()], ValueKind::Boolean),
                remove_field,
            ),
            Callable::method("getFields", Signature::new(vec![], ValueKind::Object), get_fields),
        ],
    );
    interfaces.register(
        "ifSGNodeDict",
        vec![Callable::method("subtype", Signature::new(vec![], ValueKind::String), subtype)],
    );
    interfaces.register(
        "ifSGNodeChildren",
        vec![
            Callable::method(
                "appendChild",
                Signature::new(
                    vec![Argument::required("child", ValueKind::Object)],
                    ValueKind::Boolean,
                ),
                append_child,
            ),
            Callable::method(
                "getChildCount",
                Signature::new(vec![], ValueKind::Int32),
                get_child_count,
            ),
            Callable::method(
                "getChild",
                Signature::new(
                    vec![Argument::required("index", ValueKind::Int32)],
                    ValueKind::Object,
                ),
                get_child,
            ),
        ],
    );
    interfaces
}

impl BrsComponent for RoSGNode {
    fn component_name(&self) -> &str {
        "roSGNode"
    }

    fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    fn interfaces_mut(&mut self) -> &mut Interfaces {
        &mut self.interfaces
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.field(name).cloned()
    }

    /// Dot assignment to an undeclared name declares it with the value's
    /// kind.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.has_field(name) {
            self.assign(name, value);
        } else {
            let kind = match value.kind() {
                ValueKind::Invalid => ValueKind::Dynamic,
                kind => kind,
            };
            self.add_field(name, kind, value);
        }
        Ok(())
    }

    fn render(&self, this: &ObjectRef, parent: Option<&ObjectRef>) -> String {
        let header = format!("<Component: roSGNode:{}>", self.subtype);
        if parent.is_some() {
            return header;
        }
        let mut out = format!("{header} =\n{{\n");
        for field in &self.fields {
            out.push_str(&format!("    {}: {}\n", field.name, field.value.render(Some(this))));
        }
        out.push('}');
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn name_arg(args: &[Value]) -> &str {
    args.first().and_then(Value::as_str).unwrap_or("")
}

// ifSGNodeField

/// An existing field is left as is; unknown type names are rejected.
fn add_field(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let name = name_arg(args);
    let type_name = args.get(1).and_then(Value::as_str).unwrap_or("");
    let Some(kind) = field_kind(type_name) else {
        tracing::warn!(field = name, type_name, "addField: unknown field type");
        return Ok(Value::Boolean(false));
    };
    receiver_mut(this, |node: &mut RoSGNode| {
        if !node.has_field(name) {
            node.add_field(name, kind, zero_value(kind));
        }
        Value::Boolean(true)
    })
}

fn add_fields(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let Some(entries) = args
        .first()
        .and_then(Value::as_object)
        .and_then(|aa| aa.with(|aa: &RoAssociativeArray| aa.entries().to_vec()))
    else {
        return Ok(Value::Boolean(false));
    };
    receiver_mut(this, |node: &mut RoSGNode| {
        for (name, value) in entries {
            if !node.has_field(&name) {
                node.add_field(&name, value.kind(), value);
            }
        }
        Value::Boolean(true)
    })
}

fn get_field(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let name = name_arg(args);
    receiver(this, |node: &RoSGNode| {
        node.field(name).cloned().unwrap_or(Value::Invalid)
    })
}

fn set_field(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let name = name_arg(args);
    let value = args.get(1).cloned().unwrap_or(Value::Invalid);
    receiver_mut(this, |node: &mut RoSGNode| Value::Boolean(node.assign(name, value)))
}

fn has_field(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let name = name_arg(args);
    receiver(this, |node: &RoSGNode| Value::Boolean(node.has_field(name)))
}

fn remove_field(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let name = name_arg(args);
    receiver_mut(this, |node: &mut RoSGNode| Value::Boolean(node.remove_field(name)))
}

fn get_fields(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    let entries = receiver(this, RoSGNode::field_entries)?;
    let aa = RoAssociativeArray::from_entries(entries);
    Ok(Value::Object(ObjectRef::new(aa)))
}

// ifSGNodeDict

fn subtype(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |node: &RoSGNode| Value::string(node.subtype.as_str()))
}

// ifSGNodeChildren

fn append_child(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let Some(child) = args.first().and_then(Value::as_object) else {
        return Ok(Value::Boolean(false));
    };
    if !child.is::<RoSGNode>() || child.ptr_eq(this) {
        return Ok(Value::Boolean(false));
    }
    let child = child.clone();
    receiver_mut(this, |node: &mut RoSGNode| {
        node.children.push(child);
        Value::Boolean(true)
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "child lists never approach i32::MAX entries"
)]
fn get_child_count(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |node: &RoSGNode| Value::Int32(node.children.len() as i32))
}

fn get_child(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let index = args.first().and_then(Value::as_numeric).map_or(-1, Numeric::as_i64);
    receiver(this, |node: &RoSGNode| {
        usize::try_from(index)
            .ok()
            .and_then(|i| node.children.get(i))
            .map_or(Value::Invalid, |child| Value::Object(child.clone()))
    })
}

#[cfg(test)]
mod tests;
