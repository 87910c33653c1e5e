//! Numbers and enums to `bool`.

use super::RuleContext;
use super::numeric::Numeric;
use crate::config::BooleanPolicy;
use crate::error::{ConversionError, ConversionResult};
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Number to bool under the configured [`BooleanPolicy`]
pub(super) fn from_number(
    value: &Value,
    target: &TypeDescriptor,
    rules: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let number = Numeric::of(value)
        .ok_or_else(|| ConversionError::unsupported(&value.type_descriptor(), target))?;

    if number.is_nan() {
        return Err(ConversionError::ambiguous_boolean(value));
    }
    if number.is_zero() {
        return Ok(Value::Bool(false));
    }

    match rules.config().boolean {
        BooleanPolicy::Strict if number.is_one() => Ok(Value::Bool(true)),
        BooleanPolicy::Strict => Err(ConversionError::ambiguous_boolean(value)),
        BooleanPolicy::NonZeroIsTrue => Ok(Value::Bool(true)),
    }
}

/// Enum to bool: ordinal zero is false, anything else true
pub(super) fn from_enum(
    value: &Value,
    target: &TypeDescriptor,
    _: &RuleContext<'_>,
) -> ConversionResult<Value> {
    match value {
        Value::Enum(e) => Ok(Value::Bool(e.ordinal() != 0)),
        _ => Err(ConversionError::unsupported(&value.type_descriptor(), target)),
    }
}
