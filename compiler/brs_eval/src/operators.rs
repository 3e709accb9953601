//! Binary and unary operator implementations.
//!
//! Operands are unboxed first; numeric pairs are promoted to the wider kind
//! so each arithmetic rule only sees same-kind pairs. The type set is closed,
//! so dispatch is a plain `match`.

use std::cmp::Ordering;

use brs_ir::ast::{BinaryOp, UnaryOp};
use brs_values::errors::{divide_by_zero, not_comparable, type_mismatch, unary_type_mismatch};
use brs_values::{EvalError, EvalResult, Numeric, Value};

/// Evaluate `left op right` for every operator except the short-circuiting
/// `and`/`or`, which the interpreter handles itself before calling here.
pub fn evaluate_binary(left: &Value, op: BinaryOp, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Boolean(left.equal_to(right))),
        BinaryOp::NotEq => return Ok(Value::Boolean(!left.equal_to(right))),
        _ => {}
    }

    let l = left.unboxed();
    let r = right.unboxed();
    if op.is_ordering() {
        return compare(&l, op, &r, left, right);
    }

    match (&l, &r) {
        (Value::String(a), Value::String(b)) if op == BinaryOp::Add => {
            Ok(Value::string(format!("{a}{b}")))
        }
        (Value::Boolean(a), Value::Boolean(b)) => match op {
            BinaryOp::And => Ok(Value::Boolean(*a && *b)),
            BinaryOp::Or => Ok(Value::Boolean(*a || *b)),
            _ => Err(mismatch(op, &l, &r)),
        },
        _ => match (l.as_numeric(), r.as_numeric()) {
            (Some(a), Some(b)) => arithmetic(a, op, b).ok_or_else(|| mismatch(op, &l, &r))?,
            _ => Err(mismatch(op, &l, &r)),
        },
    }
}

#[cold]
fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    type_mismatch(op.as_symbol(), left.kind(), right.kind())
}

fn compare(l: &Value, op: BinaryOp, r: &Value, left: &Value, right: &Value) -> EvalResult {
    let ordering = match (l, r) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Object(_) | Value::Callable(_), _) | (_, Value::Object(_) | Value::Callable(_)) => {
            return Err(not_comparable(op.as_symbol(), left, right));
        }
        _ => match (l.as_numeric(), r.as_numeric()) {
            (Some(a), Some(b)) => a.compare(b),
            _ => return Err(mismatch(op, l, r)),
        },
    };
    // NaN compares false under every ordering operator.
    let result = ordering.is_some_and(|ordering| match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    });
    Ok(Value::Boolean(result))
}

/// Numeric operators after promotion. `None` means the operator does not
/// apply to numbers.
fn arithmetic(a: Numeric, op: BinaryOp, b: Numeric) -> Option<EvalResult> {
    let (a, b) = Numeric::promote(a, b);
    let result = match op {
        BinaryOp::Add => Ok(same_kind(a, b, i32::wrapping_add, i64::wrapping_add, |x, y| x + y)),
        BinaryOp::Sub => Ok(same_kind(a, b, i32::wrapping_sub, i64::wrapping_sub, |x, y| x - y)),
        BinaryOp::Mul => Ok(same_kind(a, b, i32::wrapping_mul, i64::wrapping_mul, |x, y| x * y)),
        BinaryOp::Div => Ok(divide(a, b)),
        BinaryOp::IntDiv => integer_divide(a, b),
        BinaryOp::Mod => modulo(a, b),
        BinaryOp::Pow => Ok(power(a, b)),
        BinaryOp::Shl | BinaryOp::Shr => return shift(a, op, b),
        _ => return None,
    };
    Some(result.map(Numeric::into_value))
}

fn same_kind(
    a: Numeric,
    b: Numeric,
    int32: fn(i32, i32) -> i32,
    int64: fn(i64, i64) -> i64,
    float: fn(f64, f64) -> f64,
) -> Numeric {
    match (a, b) {
        (Numeric::Int32(x), Numeric::Int32(y)) => Numeric::Int32(int32(x, y)),
        (Numeric::Int64(x), Numeric::Int64(y)) => Numeric::Int64(int64(x, y)),
        #[allow(clippy::cast_possible_truncation, reason = "float results stay single precision")]
        (Numeric::Float(x), Numeric::Float(y)) => {
            Numeric::Float(float(f64::from(x), f64::from(y)) as f32)
        }
        (x, y) => Numeric::Double(float(x.as_f64(), y.as_f64())),
    }
}

/// `/` always produces a floating result: int32 and float pairs give a
/// float, int64 and double pairs a double.
fn divide(a: Numeric, b: Numeric) -> Numeric {
    match a {
        Numeric::Int32(_) | Numeric::Float(_) => Numeric::Float(a.as_f32() / b.as_f32()),
        Numeric::Int64(_) | Numeric::Double(_) => Numeric::Double(a.as_f64() / b.as_f64()),
    }
}

/// `\` truncates toward zero. Float operands give an int32.
#[allow(clippy::cast_possible_truncation, reason = "truncation is the operator")]
fn integer_divide(a: Numeric, b: Numeric) -> Result<Numeric, EvalError> {
    if b.is_zero() {
        return Err(divide_by_zero());
    }
    Ok(match (a, b) {
        (Numeric::Int32(x), Numeric::Int32(y)) => Numeric::Int32(x.wrapping_div(y)),
        (Numeric::Int64(x), Numeric::Int64(y)) => Numeric::Int64(x.wrapping_div(y)),
        (x, y) => Numeric::Int32((x.as_f64() / y.as_f64()).trunc() as i32),
    })
}

fn modulo(a: Numeric, b: Numeric) -> Result<Numeric, EvalError> {
    if b.is_zero() {
        return Err(divide_by_zero());
    }
    Ok(same_kind(a, b, i32::wrapping_rem, i64::wrapping_rem, |x, y| x % y))
}

/// Integer powers with a non-negative exponent stay integral; everything else
/// is computed in floating point.
#[allow(clippy::cast_possible_truncation, reason = "float results stay single precision")]
fn power(a: Numeric, b: Numeric) -> Numeric {
    match (a, b) {
        (Numeric::Int32(x), Numeric::Int32(y)) if y >= 0 => {
            Numeric::Int32(x.wrapping_pow(y.unsigned_abs()))
        }
        (Numeric::Int64(x), Numeric::Int64(y)) if (0..=i64::from(u32::MAX)).contains(&y) => {
            Numeric::Int64(x.wrapping_pow(u32::try_from(y).unwrap_or(u32::MAX)))
        }
        (Numeric::Int32(_) | Numeric::Float(_), _) => {
            Numeric::Float(a.as_f64().powf(b.as_f64()) as f32)
        }
        _ => Numeric::Double(a.as_f64().powf(b.as_f64())),
    }
}

fn shift(a: Numeric, op: BinaryOp, b: Numeric) -> Option<EvalResult> {
    let amount = match b {
        Numeric::Int32(n) => u32::try_from(n).ok()?,
        Numeric::Int64(n) => u32::try_from(n).ok()?,
        _ => return None,
    };
    let left = op == BinaryOp::Shl;
    let value = match a {
        Numeric::Int32(x) if left => Value::Int32(x.wrapping_shl(amount)),
        Numeric::Int32(x) => Value::Int32(x.wrapping_shr(amount)),
        Numeric::Int64(x) if left => Value::Int64(x.wrapping_shl(amount)),
        Numeric::Int64(x) => Value::Int64(x.wrapping_shr(amount)),
        _ => return None,
    };
    Some(Ok(value))
}

/// Evaluate a prefix operator. `not` on integers is bitwise.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    let value = operand.unboxed();
    let result = match (op, &value) {
        (UnaryOp::Not, Value::Boolean(b)) => Some(Value::Boolean(!b)),
        (UnaryOp::Not, Value::Int32(n)) => Some(Value::Int32(!n)),
        (UnaryOp::Not, Value::Int64(n)) => Some(Value::Int64(!n)),
        (UnaryOp::Neg, _) => value.as_numeric().map(|n| negate(n).into_value()),
        (UnaryOp::Plus, _) => value.as_numeric().map(Numeric::into_value),
        (UnaryOp::Not, _) => None,
    };
    result.ok_or_else(|| unary_type_mismatch(op.as_symbol(), value.kind()))
}

fn negate(n: Numeric) -> Numeric {
    match n {
        Numeric::Int32(x) => Numeric::Int32(x.wrapping_neg()),
        Numeric::Int64(x) => Numeric::Int64(x.wrapping_neg()),
        Numeric::Float(x) => Numeric::Float(-x),
        Numeric::Double(x) => Numeric::Double(-x),
    }
}

/// `value + 1` or `value - 1` for `++`/`--`, keeping the operand's kind.
pub fn step_by_one(value: &Value, increment: bool) -> Option<Value> {
    let n = value.unboxed().as_numeric()?;
    let one = Numeric::Int32(1).convert(n.kind());
    let op = if increment { BinaryOp::Add } else { BinaryOp::Sub };
    arithmetic(n, op, one)?.ok()
}

#[cfg(test)]
mod tests;
