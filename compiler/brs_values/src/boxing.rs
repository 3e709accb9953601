//! Automatic boxing and type names.

use brs_ir::ValueKind;

use crate::components::{component_name_for, BoxedScalar};
use crate::Value;

/// Wrap a primitive scalar in its boxed-scalar object. Callables and
/// objects are returned unchanged.
pub fn box_value(value: Value) -> Value {
    if value.kind().is_boxable() {
        Value::Object(BoxedScalar::object(value))
    } else {
        value
    }
}

/// The name `Type()` reports.
///
/// Version 3 names scalars by their boxed component (`roInt`); the default
/// uses the classic names (`Integer`).
pub fn type_name(value: &Value, version: i32) -> String {
    match value {
        Value::Object(object) => object.component_name(),
        Value::Callable(_) if version >= 3 => "roFunction".to_string(),
        Value::Callable(_) => "Function".to_string(),
        scalar if version >= 3 => component_name_for(scalar.kind())
            .map_or_else(|| scalar.kind().to_string(), str::to_string),
        scalar => match scalar.kind() {
            ValueKind::Invalid => "Invalid".to_string(),
            kind => kind.to_string(),
        },
    }
}
