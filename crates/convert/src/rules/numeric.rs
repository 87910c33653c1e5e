//! Numeric widening and narrowing.
//!
//! Every numeric-ish source (integers, floats, decimal, and the bool, char
//! and enum sources that read as integers) is lifted into [`Numeric`], then
//! fitted into the target. Fitting never wraps: a value outside the target's
//! domain is `OutOfRange`.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::RuleContext;
use crate::error::{ConversionError, ConversionResult};
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Common arithmetic representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Numeric {
    Int(i128),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
}

impl Numeric {
    /// Lift a value; `None` for sources without a numeric reading
    pub(super) fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Bool(v) => Self::Int(i128::from(*v)),
            Value::F32(v) => Self::Single(*v),
            Value::F64(v) => Self::Double(*v),
            Value::Decimal(v) => Self::Decimal(*v),
            Value::Char(v) => Self::Int(i128::from(u32::from(*v))),
            Value::Enum(v) => Self::Int(v.ordinal()),
            other => Self::Int(other.as_i128()?),
        })
    }

    /// Truncate toward zero; `None` for NaN and infinities
    pub(super) fn truncate(self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(v),
            Self::Single(v) => truncate_float(f64::from(v)),
            Self::Double(v) => truncate_float(v),
            Self::Decimal(v) => v.trunc().to_i128(),
        }
    }

    pub(super) fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Single(v) => v == 0.0,
            Self::Double(v) => v == 0.0,
            Self::Decimal(v) => v.is_zero(),
        }
    }

    pub(super) fn is_one(self) -> bool {
        match self {
            Self::Int(v) => v == 1,
            Self::Single(v) => v == 1.0,
            Self::Double(v) => v == 1.0,
            Self::Decimal(v) => v == Decimal::ONE,
        }
    }

    pub(super) fn is_nan(self) -> bool {
        match self {
            Self::Single(v) => v.is_nan(),
            Self::Double(v) => v.is_nan(),
            Self::Int(_) | Self::Decimal(_) => false,
        }
    }

    fn to_f32(self) -> Option<f32> {
        match self {
            Self::Int(v) => Some(v as f32),
            Self::Single(v) => Some(v),
            // finite doubles that round past the single range would become infinities
            Self::Double(v) => {
                let narrowed = v as f32;
                (narrowed.is_finite() || !v.is_finite()).then_some(narrowed)
            }
            Self::Decimal(v) => v.to_f32(),
        }
    }

    fn to_f64(self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(v as f64),
            Self::Single(v) => Some(f64::from(v)),
            Self::Double(v) => Some(v),
            Self::Decimal(v) => v.to_f64(),
        }
    }

    fn to_decimal(self) -> Option<Decimal> {
        match self {
            Self::Int(v) => Decimal::try_from_i128_with_scale(v, 0).ok(),
            Self::Single(v) => Decimal::from_f32(v),
            Self::Double(v) => Decimal::from_f64(v),
            Self::Decimal(v) => Some(v),
        }
    }
}

fn truncate_float(v: f64) -> Option<i128> {
    // `as` saturates, and a saturated value never fits a 64-bit target
    v.is_finite().then(|| v.trunc() as i128)
}

/// Fit a numeric reading of `value` into `target`
pub(super) fn convert(
    value: &Value,
    target: &TypeDescriptor,
    _: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let number = Numeric::of(value)
        .ok_or_else(|| ConversionError::unsupported(&value.type_descriptor(), target))?;
    let out_of_range = || ConversionError::out_of_range(value, target);

    match target {
        TypeDescriptor::Integer(kind) => {
            let integer = number.truncate().ok_or_else(out_of_range)?;
            Value::integer(*kind, integer).ok_or_else(out_of_range)
        }
        TypeDescriptor::Char => number
            .truncate()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32)
            .map(Value::Char)
            .ok_or_else(out_of_range),
        TypeDescriptor::F32 => number.to_f32().map(Value::F32).ok_or_else(out_of_range),
        TypeDescriptor::F64 => number.to_f64().map(Value::F64).ok_or_else(out_of_range),
        TypeDescriptor::Decimal => number
            .to_decimal()
            .map(Value::Decimal)
            .ok_or_else(out_of_range),
        _ => Err(ConversionError::unsupported(&value.type_descriptor(), target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterConfig;
    use crate::context::ConversionContext;
    use crate::error::ConversionErrorKind;

    fn run(value: impl Into<Value>, target: &TypeDescriptor) -> ConversionResult<Value> {
        let config = ConverterConfig::default();
        let context = RuleContext::new(ConversionContext::empty(), &config);
        convert(&value.into(), target, &context)
    }

    #[test]
    fn test_narrowing_checks_range() {
        assert_eq!(run(127i64, &TypeDescriptor::I8).unwrap(), Value::I8(127));
        assert_eq!(
            run(128i64, &TypeDescriptor::I8).unwrap_err().kind(),
            ConversionErrorKind::OutOfRange
        );
        assert!(run(-1i32, &TypeDescriptor::U64).is_err());
    }

    #[test]
    fn test_double_to_single_rounds_at_the_edge() {
        let just_above = f64::from(f32::MAX) * (1.0 + 1e-12);
        assert_eq!(run(just_above, &TypeDescriptor::F32).unwrap(), Value::F32(f32::MAX));
        assert_eq!(run(-just_above, &TypeDescriptor::F32).unwrap(), Value::F32(f32::MIN));
        assert_eq!(
            run(1e39f64, &TypeDescriptor::F32).unwrap_err().kind(),
            ConversionErrorKind::OutOfRange
        );
        assert_eq!(run(f64::INFINITY, &TypeDescriptor::F32).unwrap(), Value::F32(f32::INFINITY));
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert_eq!(run(-2.9f64, &TypeDescriptor::I32).unwrap(), Value::I32(-2));
        assert_eq!(run(255.99f32, &TypeDescriptor::U8).unwrap(), Value::U8(255));
        assert!(run(f64::NAN, &TypeDescriptor::I64).is_err());
        assert!(run(f64::INFINITY, &TypeDescriptor::I64).is_err());
        assert!(run(1e20f64, &TypeDescriptor::U64).is_err());
    }

    #[test]
    fn test_float_widths() {
        assert_eq!(run(1.5f64, &TypeDescriptor::F32).unwrap(), Value::F32(1.5));
        assert!(run(1e300f64, &TypeDescriptor::F32).is_err());
        let Value::F32(v) = run(f64::NAN, &TypeDescriptor::F32).unwrap() else {
            panic!("expected f32");
        };
        assert!(v.is_nan());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(
            run(Decimal::new(-125, 2), &TypeDescriptor::I16).unwrap(),
            Value::I16(-1)
        );
        assert_eq!(
            run(u64::MAX, &TypeDescriptor::Decimal).unwrap(),
            Value::Decimal(Decimal::from(u64::MAX))
        );
        assert!(run(f64::NAN, &TypeDescriptor::Decimal).is_err());
        assert_eq!(
            run(Decimal::new(25, 1), &TypeDescriptor::F64).unwrap(),
            Value::F64(2.5)
        );
    }

    #[test]
    fn test_char_code_points() {
        assert_eq!(run('A', &TypeDescriptor::I32).unwrap(), Value::I32(65));
        assert_eq!(run(97u8, &TypeDescriptor::Char).unwrap(), Value::Char('a'));
        assert!(run('\u{1F600}', &TypeDescriptor::U16).is_err());
        // surrogate code points are not chars
        assert!(run(0xD800u32, &TypeDescriptor::Char).is_err());
        assert!(run(-1i32, &TypeDescriptor::Char).is_err());
    }

    #[test]
    fn test_bool_source() {
        assert_eq!(run(true, &TypeDescriptor::U8).unwrap(), Value::U8(1));
        assert_eq!(run(false, &TypeDescriptor::F64).unwrap(), Value::F64(0.0));
    }
}
