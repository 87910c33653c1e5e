//! Rendering to text, and the few parses the engine owns.

use chrono::{Offset, Utc};
use url::Url;
use uuid::Uuid;

use super::RuleContext;
use crate::context::FormatProvider;
use crate::error::{ConversionError, ConversionResult};
use crate::format::{self, Number};
use crate::types::{IntegerKind, TypeDescriptor};
use crate::value::{EnumValue, Value};

fn number_of(value: &Value) -> Option<Number> {
    Some(match value {
        Value::F32(v) => Number::F32(*v),
        Value::F64(v) => Number::F64(*v),
        Value::Decimal(v) => Number::Decimal(*v),
        other => match other.type_descriptor() {
            TypeDescriptor::Integer(kind) => Number::Integer(other.as_i128()?, kind),
            _ => return None,
        },
    })
}

/// Render any renderable value as a string
pub(super) fn render(
    value: &Value,
    target: &TypeDescriptor,
    rules: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let context = rules.context();
    let format = context.format();
    let provider = context.provider();
    let source = value.type_descriptor();

    if let Some(number) = number_of(value) {
        return format::render_number(number, format, provider, &source).map(Value::String);
    }

    let text = match value {
        Value::Bool(v) => v.to_string(),
        Value::Char(v) => v.to_string(),
        Value::DateTime(v) => {
            let pattern = format.or(provider.date_time_pattern()).unwrap_or("o");
            format::render_date_time(v, pattern)?
        }
        Value::DateTimeOffset(v) => {
            let pattern = format.or(provider.date_time_pattern()).unwrap_or("o");
            let v = if context.date_time_styles().adjusts_to_universal() {
                v.with_timezone(&Utc.fix())
            } else {
                *v
            };
            format::render_date_time_offset(&v, pattern)?
        }
        Value::Duration(v) => format::render_duration(*v, format)?,
        Value::Guid(v) => guid_text(v, format)?,
        Value::Uri(v) => v.as_ref().map(|url| url.as_str().to_owned()).unwrap_or_default(),
        Value::Enum(v) => enum_text(v, format, provider)?,
        _ => return Err(ConversionError::unsupported(&source, target)),
    };
    Ok(Value::String(text))
}

fn guid_text(value: &Uuid, format: Option<&str>) -> ConversionResult<String> {
    Ok(match format {
        None | Some("D" | "d") => value.hyphenated().to_string(),
        Some("N" | "n") => value.simple().to_string(),
        Some("B" | "b") => value.braced().to_string(),
        Some("P" | "p") => format!("({})", value.hyphenated()),
        Some(other) => return Err(ConversionError::invalid_format(other, TypeDescriptor::Guid)),
    })
}

/// Name by default, ordinal for integer-style formats
fn enum_text(
    value: &EnumValue,
    format: Option<&str>,
    provider: &FormatProvider,
) -> ConversionResult<String> {
    let source = TypeDescriptor::Enum(value.enum_type().clone());
    let kind: IntegerKind = value.enum_type().underlying();
    let ordinal = Number::Integer(value.ordinal(), kind);

    match format {
        None | Some("G" | "g") => match value.name() {
            Some(name) => Ok(name.to_owned()),
            None => format::render_number(ordinal, None, provider, &source),
        },
        // hex ordinals are padded to the underlying width
        Some(hex @ ("X" | "x")) => {
            let padded = format!("{hex}{}", kind.bits() / 4);
            format::render_number(ordinal, Some(&padded), provider, &source)
        }
        Some(integer) if integer.starts_with(['D', 'd', 'X', 'x']) => {
            format::render_number(ordinal, Some(integer), provider, &source)
        }
        Some(other) => Err(ConversionError::invalid_format(other, &source)),
    }
}

/// `String` to `Guid`: hyphenated, simple, braced and URN forms
pub(super) fn parse_guid(
    value: &Value,
    target: &TypeDescriptor,
    _: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let Value::String(text) = value else {
        return Err(ConversionError::unsupported(&value.type_descriptor(), target));
    };
    Uuid::try_parse(text)
        .map(Value::Guid)
        .map_err(|err| ConversionError::malformed(text.as_str(), target, err))
}

/// `String` to `Uri`: absolute locators only
pub(super) fn parse_uri(
    value: &Value,
    target: &TypeDescriptor,
    _: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let Value::String(text) = value else {
        return Err(ConversionError::unsupported(&value.type_descriptor(), target));
    };
    Url::parse(text)
        .map(|url| Value::Uri(Some(url)))
        .map_err(|err| ConversionError::malformed(text.as_str(), target, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterConfig;
    use crate::context::ConversionContext;
    use crate::error::ConversionErrorKind;
    use crate::types::EnumType;

    fn render_with(value: impl Into<Value>, context: &ConversionContext) -> ConversionResult<String> {
        let config = ConverterConfig::default();
        let rules = RuleContext::new(context, &config);
        match render(&value.into(), &TypeDescriptor::String, &rules)? {
            Value::String(text) => Ok(text),
            other => panic!("expected a string, got {other:?}"),
        }
    }

    fn render_plain(value: impl Into<Value>) -> String {
        render_with(value, ConversionContext::empty()).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render_plain(true), "true");
        assert_eq!(render_plain('x'), "x");
        assert_eq!(render_plain(-17i16), "-17");
        assert_eq!(render_plain(2.5f64), "2.5");
        assert_eq!(render_plain(Value::null_uri()), "");
    }

    #[test]
    fn test_guid_formats() {
        let guid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        assert_eq!(render_plain(guid), "01234567-89ab-cdef-0123-456789abcdef");
        let simple = render_with(guid, &ConversionContext::new().with_format("N")).unwrap();
        assert_eq!(simple, "0123456789abcdef0123456789abcdef");
        let braced = render_with(guid, &ConversionContext::new().with_format("B")).unwrap();
        assert_eq!(braced, "{01234567-89ab-cdef-0123-456789abcdef}");
        let err = render_with(guid, &ConversionContext::new().with_format("Z")).unwrap_err();
        assert_eq!(err.kind(), ConversionErrorKind::InvalidFormat);
    }

    #[test]
    fn test_enum_formats() {
        let ty = EnumType::new("Level", IntegerKind::I16, [("Low", 1), ("High", 10)]);
        let high = Value::Enum(EnumValue::new(ty.clone(), 10));
        assert_eq!(render_plain(high.clone()), "High");
        let digits = render_with(high.clone(), &ConversionContext::new().with_format("D")).unwrap();
        assert_eq!(digits, "10");
        let hex = render_with(high, &ConversionContext::new().with_format("X")).unwrap();
        assert_eq!(hex, "000A");
        assert_eq!(render_plain(Value::Enum(EnumValue::new(ty, 3))), "3");
    }

    #[test]
    fn test_parse_guid_and_uri() {
        let config = ConverterConfig::default();
        let rules = RuleContext::new(ConversionContext::empty(), &config);
        let text = Value::from("01234567-89ab-cdef-0123-456789abcdef");
        assert!(matches!(
            parse_guid(&text, &TypeDescriptor::Guid, &rules),
            Ok(Value::Guid(_))
        ));
        let err = parse_guid(&Value::from("nope"), &TypeDescriptor::Guid, &rules).unwrap_err();
        assert_eq!(err.kind(), ConversionErrorKind::MalformedText);

        let uri = parse_uri(&Value::from("https://example.com/a"), &TypeDescriptor::Uri, &rules);
        assert_eq!(
            uri.unwrap(),
            Value::from(Url::parse("https://example.com/a").unwrap())
        );
        assert!(parse_uri(&Value::from("relative/path"), &TypeDescriptor::Uri, &rules).is_err());
    }
}
