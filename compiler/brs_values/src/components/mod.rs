//! Built-in runtime objects.
//!
//! Each object is a flat bag of operations registered through
//! [`Interfaces`](crate::Interfaces) at construction. [`create_object`] is
//! the factory behind `CreateObject`.

mod array;
mod associative_array;
mod boxed;
mod message_port;
mod node;
mod registry;

use std::rc::Rc;

use crate::{BrsComponent, EvalError, ObjectRef, RuntimeContext, Value};

pub use array::{RoArray, MAX_ARRAY_LENGTH};
pub use associative_array::RoAssociativeArray;
pub(crate) use boxed::component_name_for;
pub use boxed::BoxedScalar;
pub use message_port::{RoMessagePort, RoUniversalControlEvent};
pub use node::{FieldDefault, FieldSpec, Fragment, RoSGNode, FIELD_FRAGMENTS};
pub use registry::RoRegistrySection;

/// Construct a built-in object by (case-insensitive) name.
///
/// Returns `None` for unknown names or unusable constructor arguments; the
/// caller decides how to report that.
pub fn create_object(
    name: &str,
    args: &[Value],
    context: &Rc<RuntimeContext>,
) -> Option<ObjectRef> {
    let object = match name.to_ascii_lowercase().as_str() {
        "roarray" => ObjectRef::new(RoArray::new(Vec::new())),
        "roassociativearray" => ObjectRef::new(RoAssociativeArray::new()),
        "rosgnode" => {
            let subtype = args.first()?.as_str()?;
            ObjectRef::new(RoSGNode::new(subtype)?)
        }
        "romessageport" => ObjectRef::new(RoMessagePort::new(Rc::clone(context))),
        "roregistrysection" => {
            let section = args.first()?.as_str()?;
            ObjectRef::new(RoRegistrySection::new(section, Rc::clone(context)))
        }
        "roint" => BoxedScalar::object(Value::Int32(0)),
        "rolonginteger" => BoxedScalar::object(Value::Int64(0)),
        "rofloat" => BoxedScalar::object(Value::Float(0.0)),
        "rodouble" => BoxedScalar::object(Value::Double(0.0)),
        "rostring" => BoxedScalar::object(Value::string("")),
        "roboolean" => BoxedScalar::object(Value::Boolean(false)),
        "roinvalid" => BoxedScalar::object(Value::Invalid),
        _ => return None,
    };
    tracing::debug!(component = %object.component_name(), "created object");
    Some(object)
}

/// Run `f` against the receiver of a built-in operation as its concrete type.
pub(crate) fn receiver<T: BrsComponent, R>(
    this: &ObjectRef,
    f: impl FnOnce(&T) -> R,
) -> Result<R, EvalError> {
    this.with(f).ok_or_else(|| wrong_receiver(this))
}

/// Mutable form of [`receiver`].
pub(crate) fn receiver_mut<T: BrsComponent, R>(
    this: &ObjectRef,
    f: impl FnOnce(&mut T) -> R,
) -> Result<R, EvalError> {
    this.with_mut(f).ok_or_else(|| wrong_receiver(this))
}

#[cold]
fn wrong_receiver(this: &ObjectRef) -> EvalError {
    EvalError::new(format!(
        "operation called on an object of the wrong type ({})",
        this.component_name()
    ))
}
