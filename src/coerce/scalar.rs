//! Scalar text rendering, text parsing and representational conversions.

use crate::time::TimeConfig;
use crate::value::{Ty, Value};

// =============================================================================
// Value → text
// =============================================================================

/// Render a concrete value as text, or `None` if it has no text form.
///
/// Floats use the shortest representation that round-trips at their own
/// width, without exponent: `3.14f32` renders as `"3.14"`. Non-finite floats
/// render as `+Inf`, `-Inf` and `NaN`.
pub fn to_text(value: &Value, time: &TimeConfig) -> Option<String> {
    let text = match value {
        Value::Bool(b) => b.to_string(),
        Value::I8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::U8(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::F32(f) => non_finite_text(f64::from(*f)).unwrap_or_else(|| f.to_string()),
        Value::F64(f) => non_finite_text(*f).unwrap_or_else(|| f.to_string()),
        Value::Str(s) => s.clone(),
        Value::Time(t) => time.format(t),
        Value::Record(r) => return r.render(),
        Value::Seq(_) | Value::Map(_) | Value::Ptr(_) | Value::Opaque(_) => return None,
    };
    Some(text)
}

/// `+Inf`, `-Inf` or `NaN` for non-finite floats.
fn non_finite_text(f: f64) -> Option<String> {
    let text = if f.is_nan() {
        "NaN"
    } else if f == f64::INFINITY {
        "+Inf"
    } else if f == f64::NEG_INFINITY {
        "-Inf"
    } else {
        return None;
    };
    Some(text.to_string())
}

// =============================================================================
// Text → value
// =============================================================================

/// Parse a boolean literal.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse 64-bit base-10 digits with an optional sign.
fn parse_signed(s: &str) -> Option<Num> {
    s.parse().ok().map(Num::Int)
}

/// Parse 64-bit base-10 digits; any sign is rejected.
fn parse_unsigned(s: &str) -> Option<Num> {
    if s.starts_with(['+', '-']) {
        return None;
    }
    s.parse().ok().map(Num::Uint)
}

/// Parse a 64-bit float. Finite text that overflows to infinity is rejected;
/// only a spelled-out `inf` or `infinity` yields one.
fn parse_float(s: &str) -> Option<Num> {
    let f: f64 = s.parse().ok()?;
    if f.is_infinite() {
        let word = s.trim_start_matches(['+', '-']);
        if !word.eq_ignore_ascii_case("inf") && !word.eq_ignore_ascii_case("infinity") {
            return None;
        }
    }
    Some(Num::Float(f))
}

/// Parse text into a non-text scalar of type `ty`.
///
/// Numbers parse at 64 bits and are then narrowed like [`convert`]:
/// `"300"` into `i8` is `44`. Timestamps are not handled here; see
/// [`TimeConfig::parse`].
pub fn from_text(s: &str, ty: &Ty) -> Option<Value> {
    let num = match ty {
        Ty::Bool => return parse_bool(s).map(Value::Bool),
        Ty::I8 | Ty::I16 | Ty::I32 | Ty::I64 => parse_signed(s)?,
        Ty::U8 | Ty::U16 | Ty::U32 | Ty::U64 => parse_unsigned(s)?,
        Ty::F32 | Ty::F64 => parse_float(s)?,
        _ => return None,
    };
    narrow(num, ty)
}

// =============================================================================
// Representational conversions
// =============================================================================

/// A numeric value at its widest representation.
#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Self> {
        let num = match *value {
            Value::I8(n) => Num::Int(n.into()),
            Value::I16(n) => Num::Int(n.into()),
            Value::I32(n) => Num::Int(n.into()),
            Value::I64(n) => Num::Int(n),
            Value::U8(n) => Num::Uint(n.into()),
            Value::U16(n) => Num::Uint(n.into()),
            Value::U32(n) => Num::Uint(n.into()),
            Value::U64(n) => Num::Uint(n),
            Value::F32(f) => Num::Float(f.into()),
            Value::F64(f) => Num::Float(f),
            _ => return None,
        };
        Some(num)
    }
}

macro_rules! cast {
    ($num:expr, $t:ty) => {
        match $num {
            Num::Int(n) => n as $t,
            Num::Uint(n) => n as $t,
            Num::Float(f) => f as $t,
        }
    };
}

/// Convert `value` into type `ty` when the representations allow it.
///
/// - Any numeric kind converts to any numeric kind with `as` semantics:
///   integers wrap when narrowed, floats saturate when cast to integers.
/// - A record converts to a record type with identical field names and
///   types in the same order.
pub fn convert(value: &Value, ty: &Ty) -> Option<Value> {
    if let Value::Record(record) = value {
        return match ty {
            Ty::Record(target) if record.record_type().same_layout(target) => {
                Some(Value::Record(record.retyped(target)))
            }
            _ => None,
        };
    }

    narrow(Num::of(value)?, ty)
}

fn narrow(num: Num, ty: &Ty) -> Option<Value> {
    let converted = match ty {
        Ty::I8 => Value::I8(cast!(num, i8)),
        Ty::I16 => Value::I16(cast!(num, i16)),
        Ty::I32 => Value::I32(cast!(num, i32)),
        Ty::I64 => Value::I64(cast!(num, i64)),
        Ty::U8 => Value::U8(cast!(num, u8)),
        Ty::U16 => Value::U16(cast!(num, u16)),
        Ty::U32 => Value::U32(cast!(num, u32)),
        Ty::U64 => Value::U64(cast!(num, u64)),
        Ty::F32 => Value::F32(cast!(num, f32)),
        Ty::F64 => Value::F64(cast!(num, f64)),
        _ => return None,
    };
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_shortest_text() {
        let time = TimeConfig::default();
        assert_eq!(to_text(&Value::F32(3.14), &time).as_deref(), Some("3.14"));
        assert_eq!(to_text(&Value::F64(3.14), &time).as_deref(), Some("3.14"));
        assert_eq!(to_text(&Value::F64(100.0), &time).as_deref(), Some("100"));
        assert_eq!(to_text(&Value::F64(1e21), &time).as_deref(), Some("1000000000000000000000"));
    }

    #[test]
    fn test_no_text_form() {
        let time = TimeConfig::default();
        assert_eq!(to_text(&Value::Seq(crate::Seq::new(Ty::I32)), &time), None);
        assert_eq!(to_text(&Value::null(Ty::I32), &time), None);
    }

    #[test]
    fn test_bool_grammar() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        for s in ["yes", "tRUE", "", " true"] {
            assert_eq!(parse_bool(s), None, "{s}");
        }
    }

    #[test]
    fn test_integer_text() {
        assert_eq!(from_text("-42", &Ty::I32), Some(Value::I32(-42)));
        assert_eq!(from_text("+42", &Ty::I64), Some(Value::I64(42)));
        assert_eq!(from_text("+42", &Ty::U64), None);
        assert_eq!(from_text("-1", &Ty::U8), None);
        assert_eq!(from_text("0x10", &Ty::I32), None);
        assert_eq!(from_text("255", &Ty::U8), Some(Value::U8(255)));
    }

    #[test]
    fn test_integer_text_narrows_like_conversion() {
        assert_eq!(from_text("300", &Ty::I8), Some(Value::I8(44)));
        assert_eq!(from_text("-129", &Ty::I8), Some(Value::I8(127)));
        assert_eq!(from_text("4294967297", &Ty::U32), Some(Value::U32(1)));
        assert_eq!(from_text("9223372036854775808", &Ty::I64), None);
        assert_eq!(from_text("18446744073709551616", &Ty::U64), None);
    }

    #[test]
    fn test_float_text() {
        assert_eq!(from_text("2.5", &Ty::F64), Some(Value::F64(2.5)));
        assert_eq!(from_text("2.5", &Ty::F32), Some(Value::F32(2.5)));
        assert_eq!(from_text("abc", &Ty::F64), None);
    }

    #[test]
    fn test_float_text_overflow_is_rejected() {
        assert_eq!(from_text("1e400", &Ty::F64), None);
        assert_eq!(from_text("-1e400", &Ty::F32), None);
        assert_eq!(from_text("+Inf", &Ty::F64), Some(Value::F64(f64::INFINITY)));
        assert_eq!(from_text("-infinity", &Ty::F32), Some(Value::F32(f32::NEG_INFINITY)));
        assert!(matches!(from_text("NaN", &Ty::F64), Some(Value::F64(f)) if f.is_nan()));
    }

    #[test]
    fn test_non_finite_float_text() {
        let time = TimeConfig::default();
        assert_eq!(to_text(&Value::F64(f64::INFINITY), &time).as_deref(), Some("+Inf"));
        assert_eq!(to_text(&Value::F32(f32::NEG_INFINITY), &time).as_deref(), Some("-Inf"));
        assert_eq!(to_text(&Value::F64(f64::NAN), &time).as_deref(), Some("NaN"));
    }

    #[test]
    fn test_numeric_conversion() {
        assert_eq!(convert(&Value::I32(7), &Ty::I64), Some(Value::I64(7)));
        assert_eq!(convert(&Value::I64(300), &Ty::U8), Some(Value::U8(44)));
        assert_eq!(convert(&Value::I8(-1), &Ty::U16), Some(Value::U16(u16::MAX)));
        assert_eq!(convert(&Value::F64(2.9), &Ty::I32), Some(Value::I32(2)));
        assert_eq!(convert(&Value::F32(1.5), &Ty::F64), Some(Value::F64(1.5)));
        assert_eq!(convert(&Value::U32(9), &Ty::F32), Some(Value::F32(9.0)));
        assert_eq!(convert(&Value::Bool(true), &Ty::I32), None);
        assert_eq!(convert(&Value::I32(1), &Ty::Bool), None);
    }
}
