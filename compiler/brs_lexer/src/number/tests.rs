use brs_ir::{Lexeme, Literal};
use pretty_assertions::assert_eq;

use super::{decimal, hex};
use crate::cursor::Cursor;
use crate::LexErrorKind;

fn scan_decimal(src: &str) -> (Result<(Lexeme, Literal), LexErrorKind>, usize) {
    let chars: Vec<char> = src.chars().collect();
    let mut cursor = Cursor::new(&chars);
    let result = decimal(&mut cursor);
    (result, cursor.pos())
}

fn scan_hex(src: &str) -> Result<(Lexeme, Literal), LexErrorKind> {
    let chars: Vec<char> = src.chars().collect();
    let mut cursor = Cursor::new(&chars);
    hex(&mut cursor)
}

fn kind_of(src: &str) -> Lexeme {
    match scan_decimal(src).0 {
        Ok((kind, _)) => kind,
        Err(e) => panic!("{src}: {e}"),
    }
}

#[test]
fn plain_integer() {
    assert_eq!(scan_decimal("42").0, Ok((Lexeme::Integer, Literal::Int32(42))));
}

#[test]
fn ten_digits_is_double() {
    assert_eq!(
        scan_decimal("1234567890").0,
        Ok((Lexeme::Double, Literal::Double(1_234_567_890.0)))
    );
    assert_eq!(kind_of("123456789"), Lexeme::Integer);
}

#[test]
fn designators() {
    assert_eq!(kind_of("5#"), Lexeme::Double);
    assert_eq!(kind_of("5!"), Lexeme::Float);
    assert_eq!(kind_of("5&"), Lexeme::LongInteger);
    assert_eq!(kind_of("12345678901&"), Lexeme::LongInteger);
    assert_eq!(kind_of("1234567890!"), Lexeme::Float);
}

#[test]
fn designator_is_consumed() {
    let (_, end) = scan_decimal("5#+1");
    assert_eq!(end, 2);
    let (_, end) = scan_decimal("5&");
    assert_eq!(end, 2);
}

#[test]
fn d_exponent_is_double() {
    assert_eq!(
        scan_decimal("1.5d2").0,
        Ok((Lexeme::Double, Literal::Double(150.0)))
    );
    assert_eq!(kind_of("2D-1"), Lexeme::Double);
}

#[test]
fn e_exponent_is_float() {
    assert_eq!(scan_decimal("1e3").0, Ok((Lexeme::Float, Literal::Float(1000.0))));
    assert_eq!(kind_of("2.5E+2"), Lexeme::Float);
}

#[test]
fn marker_without_digits_is_not_an_exponent() {
    let (result, end) = scan_decimal("5e");
    assert_eq!(result, Ok((Lexeme::Integer, Literal::Int32(5))));
    assert_eq!(end, 1);
}

#[test]
fn decimal_point_is_float() {
    assert_eq!(scan_decimal("1.5").0, Ok((Lexeme::Float, Literal::Float(1.5))));
    assert_eq!(scan_decimal(".25").0, Ok((Lexeme::Float, Literal::Float(0.25))));
    assert_eq!(kind_of("3.0&"), Lexeme::Float);
}

#[test]
fn dot_before_name_is_not_fraction() {
    let (result, end) = scan_decimal("1.foo");
    assert_eq!(result, Ok((Lexeme::Integer, Literal::Int32(1))));
    assert_eq!(end, 1);
}

#[test]
fn trailing_dot_is_float() {
    let (result, end) = scan_decimal("1.)");
    assert_eq!(result, Ok((Lexeme::Float, Literal::Float(1.0))));
    assert_eq!(end, 2);
    assert_eq!(scan_decimal("2. ").0, Ok((Lexeme::Float, Literal::Float(2.0))));
    assert_eq!(scan_decimal("3.").0, Ok((Lexeme::Float, Literal::Float(3.0))));
}

#[test]
fn long_integer_overflow_is_an_error() {
    assert!(matches!(
        scan_decimal("99999999999999999999&").0,
        Err(LexErrorKind::NumberOutOfRange(_))
    ));
}

#[test]
fn hex_integers() {
    assert_eq!(scan_hex("&hFF"), Ok((Lexeme::Integer, Literal::Int32(255))));
    assert_eq!(scan_hex("&HFFFFFFFF"), Ok((Lexeme::Integer, Literal::Int32(-1))));
    assert_eq!(
        scan_hex("&h1F&"),
        Ok((Lexeme::LongInteger, Literal::Int64(31)))
    );
}

#[test]
fn hex_errors() {
    assert_eq!(scan_hex("&h1.8"), Err(LexErrorKind::FractionalHexLiteral));
    assert!(matches!(scan_hex("&h"), Err(LexErrorKind::EmptyHexLiteral(_))));
    assert!(matches!(
        scan_hex("&h123456789"),
        Err(LexErrorKind::NumberOutOfRange(_))
    ));
}
