//! Conversions into enums.

use super::RuleContext;
use super::numeric::Numeric;
use crate::config::EnumOrdinalPolicy;
use crate::error::{ConversionError, ConversionResult};
use crate::types::TypeDescriptor;
use crate::value::{EnumValue, Value};

/// Number, bool or another enum to an enum, via the ordinal.
///
/// The ordinal must fit the underlying integer; under
/// [`EnumOrdinalPolicy::Declared`] it must also name a declared member.
pub(super) fn from_number(
    value: &Value,
    target: &TypeDescriptor,
    rules: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let TypeDescriptor::Enum(enum_type) = target else {
        return Err(ConversionError::unsupported(&value.type_descriptor(), target));
    };
    let ordinal = Numeric::of(value)
        .and_then(Numeric::truncate)
        .ok_or_else(|| ConversionError::out_of_range(value, target))?;

    let fits = enum_type.underlying().contains(ordinal);
    let accepted = match rules.config().enum_ordinals {
        EnumOrdinalPolicy::Declared => fits && enum_type.is_declared(ordinal),
        EnumOrdinalPolicy::Open => fits,
    };
    if !accepted {
        return Err(ConversionError::out_of_range(value, target));
    }

    Ok(Value::Enum(EnumValue::new(enum_type.clone(), ordinal)))
}

/// Member by exact, case-sensitive name
pub(super) fn parse(
    value: &Value,
    target: &TypeDescriptor,
    _: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let (Value::String(text), TypeDescriptor::Enum(enum_type)) = (value, target) else {
        return Err(ConversionError::unsupported(&value.type_descriptor(), target));
    };

    EnumValue::named(enum_type, text)
        .map(Value::Enum)
        .ok_or_else(|| {
            ConversionError::malformed(
                text.as_str(),
                target,
                format_args!("no member named '{text}'"),
            )
        })
}
