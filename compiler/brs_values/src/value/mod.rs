//! Runtime values.
//!
//! Scalars are stored inline; strings are `Rc<str>` so that copies made by
//! assignment and argument passing share one allocation. Objects and
//! callables are reference types: copying the value copies the reference.

use std::fmt;
use std::rc::Rc;

use brs_ir::{Literal, ValueKind};

use crate::{Callable, Numeric, ObjectRef};

#[derive(Clone)]
pub enum Value {
    Invalid,
    Boolean(bool),
    String(Rc<str>),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Callable(Rc<Callable>),
    Object(ObjectRef),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Invalid => ValueKind::Invalid,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Callable(_) => ValueKind::Callable,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Kind name, or the component name for objects. Used in messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Object(object) => object.component_name(),
            other => other.kind().to_string(),
        }
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unboxed() {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<Numeric> {
        Numeric::from_value(&self.unboxed())
    }

    /// The wrapped scalar for boxed values, otherwise a copy of `self`.
    pub fn unboxed(&self) -> Value {
        match self {
            Value::Object(object) => object.unbox().unwrap_or_else(|| self.clone()),
            other => other.clone(),
        }
    }

    /// String form used by `print` and string conversion.
    ///
    /// `parent` is the container currently being rendered; a container
    /// rendered inside another one prints only its short form, which stops
    /// self-referencing structures from recursing forever.
    pub fn render(&self, parent: Option<&ObjectRef>) -> String {
        match self {
            Value::Invalid => "invalid".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => s.to_string(),
            Value::Int32(n) => n.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Float(x) => format_float(*x),
            Value::Double(x) => format_double(*x),
            Value::Callable(callable) => format!("<Function: {}>", callable.name()),
            Value::Object(object) => object.render(parent),
        }
    }

    /// `=` semantics. Never fails.
    ///
    /// Boxed scalars compare as their contents; `invalid` equals only
    /// `invalid`; numerics compare after promotion; mismatched kinds are
    /// unequal; other objects decide for themselves (containers never equal
    /// anything, themselves included).
    pub fn equal_to(&self, other: &Value) -> bool {
        if let Value::Object(object) = self {
            if object.unbox().is_none() {
                return object.equal_to(other);
            }
        }
        let left = self.unboxed();
        let right = other.unboxed();
        match (&left, &right) {
            (Value::Invalid, Value::Invalid) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => Rc::ptr_eq(a, b),
            (Value::Object(_), _) | (_, Value::Object(_)) => false,
            _ => match (Numeric::from_value(&left), Numeric::from_value(&right)) {
                (Some(a), Some(b)) => a.equals(b),
                _ => false,
            },
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Invalid => Value::Invalid,
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::String(s) => Value::string(s),
            Literal::Int32(n) => Value::Int32(n),
            Literal::Int64(n) => Value::Int64(n),
            Literal::Float(x) => Value::Float(x),
            Literal::Double(x) => Value::Double(x),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        Value::from(literal.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => write!(f, "Invalid"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Int32(n) => write!(f, "Int32({n})"),
            Value::Int64(n) => write!(f, "Int64({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Double(x) => write!(f, "Double({x})"),
            Value::Callable(c) => write!(f, "Callable({})", c.name()),
            Value::Object(o) => write!(f, "Object({})", o.component_name()),
        }
    }
}

/// Single-precision output: 7 significant digits, trailing zeros trimmed.
pub fn format_float(x: f32) -> String {
    format_significant(f64::from(x), 7)
}

/// Double-precision output: 15 significant digits, trailing zeros trimmed.
pub fn format_double(x: f64) -> String {
    format_significant(x, 15)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "decimal exponents of finite floats fit comfortably in i32/usize"
)]
fn format_significant(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let exponent = x.abs().log10().floor() as i32;
    if exponent < -5 || exponent >= digits as i32 {
        let formatted = format!("{:.*e}", digits - 1, x);
        let (mantissa, exp) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests;
