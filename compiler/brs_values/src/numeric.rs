//! The numeric hierarchy: int32 < int64 < float < double.
//!
//! Binary operations promote both operands to the wider kind first, so
//! every arithmetic rule only has to handle same-kind pairs.

use std::cmp::Ordering;

use brs_ir::ValueKind;

use crate::Value;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Numeric {
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "promotion and explicit conversion follow the language's lossy casts"
)]
impl Numeric {
    pub fn from_value(value: &Value) -> Option<Numeric> {
        match value {
            Value::Int32(n) => Some(Numeric::Int32(*n)),
            Value::Int64(n) => Some(Numeric::Int64(*n)),
            Value::Float(x) => Some(Numeric::Float(*x)),
            Value::Double(x) => Some(Numeric::Double(*x)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Numeric::Int32(n) => Value::Int32(n),
            Numeric::Int64(n) => Value::Int64(n),
            Numeric::Float(x) => Value::Float(x),
            Numeric::Double(x) => Value::Double(x),
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Numeric::Int32(_) => ValueKind::Int32,
            Numeric::Int64(_) => ValueKind::Int64,
            Numeric::Float(_) => ValueKind::Float,
            Numeric::Double(_) => ValueKind::Double,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Numeric::Int32(_) => 0,
            Numeric::Int64(_) => 1,
            Numeric::Float(_) => 2,
            Numeric::Double(_) => 3,
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, Numeric::Int32(_) | Numeric::Int64(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int32(n) => f64::from(n),
            Numeric::Int64(n) => n as f64,
            Numeric::Float(x) => f64::from(x),
            Numeric::Double(x) => x,
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Numeric::Int32(n) => n as f32,
            Numeric::Int64(n) => n as f32,
            Numeric::Float(x) => x,
            Numeric::Double(x) => x as f32,
        }
    }

    /// Truncating conversion to a 64-bit integer.
    pub fn as_i64(self) -> i64 {
        match self {
            Numeric::Int32(n) => i64::from(n),
            Numeric::Int64(n) => n,
            Numeric::Float(x) => x as i64,
            Numeric::Double(x) => x as i64,
        }
    }

    /// Truncating (wrapping for int64) conversion to a 32-bit integer.
    pub fn as_i32(self) -> i32 {
        match self {
            Numeric::Int32(n) => n,
            Numeric::Int64(n) => n as i32,
            Numeric::Float(x) => x as i32,
            Numeric::Double(x) => x as i32,
        }
    }

    /// Convert to the given numeric kind. Non-numeric kinds leave `self`
    /// unchanged.
    pub fn convert(self, kind: ValueKind) -> Numeric {
        match kind {
            ValueKind::Int32 => Numeric::Int32(self.as_i32()),
            ValueKind::Int64 => Numeric::Int64(self.as_i64()),
            ValueKind::Float => Numeric::Float(self.as_f32()),
            ValueKind::Double => Numeric::Double(self.as_f64()),
            _ => self,
        }
    }

    /// Promote both operands to the wider of their two kinds.
    pub fn promote(left: Numeric, right: Numeric) -> (Numeric, Numeric) {
        if left.rank() >= right.rank() {
            (left, right.convert(left.kind()))
        } else {
            (left.convert(right.kind()), right)
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Numeric::Int32(n) => n == 0,
            Numeric::Int64(n) => n == 0,
            Numeric::Float(x) => x == 0.0,
            Numeric::Double(x) => x == 0.0,
        }
    }

    pub fn is_negative(self) -> bool {
        match self {
            Numeric::Int32(n) => n < 0,
            Numeric::Int64(n) => n < 0,
            Numeric::Float(x) => x < 0.0,
            Numeric::Double(x) => x < 0.0,
        }
    }

    /// Ordering after promotion. `None` only when a NaN is involved.
    pub fn compare(self, other: Numeric) -> Option<Ordering> {
        match Numeric::promote(self, other) {
            (Numeric::Int32(a), Numeric::Int32(b)) => Some(a.cmp(&b)),
            (Numeric::Int64(a), Numeric::Int64(b)) => Some(a.cmp(&b)),
            (Numeric::Float(a), Numeric::Float(b)) => a.partial_cmp(&b),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    pub fn equals(self, other: Numeric) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}
