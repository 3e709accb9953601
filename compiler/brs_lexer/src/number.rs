//! Numeric literal classification.
//!
//! Decimal literals are classified by the first rule that applies:
//!
//! 1. ten or more digits, no designator and no exponent: `Double`
//! 2. trailing `#`: `Double`
//! 3. `d`/`D` exponent: `Double` (read back with `e`)
//! 4. trailing `!`: `Float`
//! 5. `e`/`E` exponent: `Float`
//! 6. a decimal point: `Float`
//! 7. trailing `&`: `LongInteger`
//! 8. otherwise `Integer`
//!
//! Hex literals (`&H`) are `LongInteger` with a trailing `&`, else `Integer`.

use brs_ir::{Lexeme, Literal};

use crate::cursor::Cursor;
use crate::LexErrorKind;

/// Digit count at which an undesignated literal becomes a `Double`.
const DOUBLE_DIGIT_THRESHOLD: usize = 10;

/// Scan a decimal literal starting at a digit or at a `.` followed by a digit.
pub(crate) fn decimal(cursor: &mut Cursor<'_>) -> Result<(Lexeme, Literal), LexErrorKind> {
    let start = cursor.pos();
    let mut contains_decimal = cursor.eat('.');
    cursor.eat_while(|c| c.is_ascii_digit());
    if !contains_decimal && cursor.current() == Some('.') && continues_fraction(cursor.peek()) {
        cursor.advance();
        contains_decimal = true;
        cursor.eat_while(|c| c.is_ascii_digit());
    }

    let mantissa = cursor.slice_from(start);
    let digits = mantissa.chars().filter(char::is_ascii_digit).count();

    match cursor.current() {
        Some('#') => {
            cursor.advance();
            parse_double(&mantissa)
        }
        Some('d' | 'D') if exponent_follows(cursor) => {
            cursor.advance();
            let exponent = scan_exponent(cursor);
            parse_double(&format!("{mantissa}e{exponent}"))
        }
        Some('!') => {
            cursor.advance();
            parse_float(&mantissa)
        }
        Some('e' | 'E') if exponent_follows(cursor) => {
            cursor.advance();
            let exponent = scan_exponent(cursor);
            parse_float(&format!("{mantissa}e{exponent}"))
        }
        Some('&') if !contains_decimal && !is_hex_prefix(cursor.peek()) => {
            cursor.advance();
            mantissa
                .parse::<i64>()
                .map(|n| (Lexeme::LongInteger, Literal::Int64(n)))
                .map_err(|_| LexErrorKind::NumberOutOfRange(format!("{mantissa}&")))
        }
        _ if digits >= DOUBLE_DIGIT_THRESHOLD => parse_double(&mantissa),
        _ if contains_decimal => parse_float(&mantissa),
        _ => mantissa
            .parse::<i32>()
            .map(|n| (Lexeme::Integer, Literal::Int32(n)))
            .map_err(|_| LexErrorKind::NumberOutOfRange(mantissa)),
    }
}

/// Scan a hex literal. The cursor is on the `&` of `&H`.
#[allow(
    clippy::cast_possible_wrap,
    reason = "hex literals spell out the two's-complement bit pattern"
)]
pub(crate) fn hex(cursor: &mut Cursor<'_>) -> Result<(Lexeme, Literal), LexErrorKind> {
    let start = cursor.pos();
    cursor.advance();
    cursor.advance();
    let digits_start = cursor.pos();
    cursor.eat_while(|c| c.is_ascii_hexdigit());
    let digits = cursor.slice_from(digits_start);

    if cursor.current() == Some('.') && cursor.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
        cursor.advance();
        cursor.eat_while(|c| c.is_ascii_hexdigit());
        return Err(LexErrorKind::FractionalHexLiteral);
    }
    if digits.is_empty() {
        return Err(LexErrorKind::EmptyHexLiteral(cursor.slice_from(start)));
    }

    if cursor.eat('&') {
        u64::from_str_radix(&digits, 16)
            .map(|n| (Lexeme::LongInteger, Literal::Int64(n as i64)))
            .map_err(|_| LexErrorKind::NumberOutOfRange(cursor.slice_from(start)))
    } else {
        u32::from_str_radix(&digits, 16)
            .map(|n| (Lexeme::Integer, Literal::Int32(n as i32)))
            .map_err(|_| LexErrorKind::NumberOutOfRange(cursor.slice_from(start)))
    }
}

/// `&H` / `&h` prefix check on the character after `&`.
#[inline]
pub(crate) fn is_hex_prefix(next: Option<char>) -> bool {
    matches!(next, Some('h' | 'H'))
}

/// A `.` after digits belongs to the literal unless it is followed by a
/// name (`1.foo` is not a fraction). A bare trailing `.` is kept, so `1.`
/// is the float `1`.
fn continues_fraction(next: Option<char>) -> bool {
    match next {
        Some(c) => c.is_ascii_digit() || !(c.is_alphanumeric() || c == '_' || c == '.'),
        None => true,
    }
}

/// The cursor is on an exponent marker; is it followed by `[+-]?digit`?
fn exponent_follows(cursor: &Cursor<'_>) -> bool {
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => cursor.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn scan_exponent(cursor: &mut Cursor<'_>) -> String {
    let start = cursor.pos();
    if matches!(cursor.current(), Some('+' | '-')) {
        cursor.advance();
    }
    cursor.eat_while(|c| c.is_ascii_digit());
    cursor.slice_from(start)
}

fn parse_double(text: &str) -> Result<(Lexeme, Literal), LexErrorKind> {
    text.parse::<f64>()
        .map(|x| (Lexeme::Double, Literal::Double(x)))
        .map_err(|_| LexErrorKind::NumberOutOfRange(text.to_string()))
}

fn parse_float(text: &str) -> Result<(Lexeme, Literal), LexErrorKind> {
    text.parse::<f32>()
        .map(|x| (Lexeme::Float, Literal::Float(x)))
        .map_err(|_| LexErrorKind::NumberOutOfRange(text.to_string()))
}

#[cfg(test)]
mod tests;
