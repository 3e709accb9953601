//! Runtime value kinds.
//!
//! Used by callable signatures (parameter and return types) and by the
//! evaluator's type checks. The set is closed.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Invalid,
    Boolean,
    String,
    Int32,
    Int64,
    Float,
    Double,
    Callable,
    Object,
    /// Accepts any value.
    Dynamic,
    /// Only meaningful as a return type.
    Void,
}

impl ValueKind {
    /// Parse a declared type name (`as integer`, `as object`, ...).
    ///
    /// Matching is case-insensitive. Returns `None` for unknown names.
    pub fn from_type_name(name: &str) -> Option<ValueKind> {
        match name.to_ascii_lowercase().as_str() {
            "invalid" => Some(ValueKind::Invalid),
            "boolean" => Some(ValueKind::Boolean),
            "string" => Some(ValueKind::String),
            "integer" => Some(ValueKind::Int32),
            "longinteger" => Some(ValueKind::Int64),
            "float" => Some(ValueKind::Float),
            "double" => Some(ValueKind::Double),
            "function" => Some(ValueKind::Callable),
            "object" => Some(ValueKind::Object),
            "dynamic" => Some(ValueKind::Dynamic),
            "void" => Some(ValueKind::Void),
            _ => None,
        }
    }

    /// Kind implied by an identifier's trailing type designator, if any.
    pub fn from_designator(identifier: &str) -> Option<ValueKind> {
        match identifier.chars().last()? {
            '$' => Some(ValueKind::String),
            '%' => Some(ValueKind::Int32),
            '!' => Some(ValueKind::Float),
            '#' => Some(ValueKind::Double),
            '&' => Some(ValueKind::Int64),
            _ => None,
        }
    }

    /// Numeric promotion rank: int32 < int64 < float < double.
    pub fn numeric_rank(self) -> Option<u8> {
        match self {
            ValueKind::Int32 => Some(0),
            ValueKind::Int64 => Some(1),
            ValueKind::Float => Some(2),
            ValueKind::Double => Some(3),
            _ => None,
        }
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        self.numeric_rank().is_some()
    }

    /// Scalars that can be wrapped in a boxed-scalar object.
    pub fn is_boxable(self) -> bool {
        matches!(
            self,
            ValueKind::Invalid
                | ValueKind::Boolean
                | ValueKind::String
                | ValueKind::Int32
                | ValueKind::Int64
                | ValueKind::Float
                | ValueKind::Double
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Invalid => "Invalid",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
            ValueKind::Int32 => "Integer",
            ValueKind::Int64 => "LongInteger",
            ValueKind::Float => "Float",
            ValueKind::Double => "Double",
            ValueKind::Callable => "Function",
            ValueKind::Object => "Object",
            ValueKind::Dynamic => "Dynamic",
            ValueKind::Void => "Void",
        };
        f.write_str(name)
    }
}
