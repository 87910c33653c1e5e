//! Offset attachment and stripping between the two date/time categories.
//!
//! An offset-less date/time is read as UTC unless the context's styles say
//! `ASSUME_LOCAL`, in which case it is read in the reference timezone: the
//! provider's UTC offset when a provider was supplied, otherwise the host's
//! local timezone.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

use super::RuleContext;
use crate::context::ConversionContext;
use crate::error::{ConversionError, ConversionResult};
use crate::types::TypeDescriptor;
use crate::value::Value;

fn offset_for_local(naive: &NaiveDateTime, context: &ConversionContext) -> FixedOffset {
    if context.has_provider() {
        return context.provider().utc_offset();
    }
    // a local time inside a DST gap has no offset of its own
    Local
        .offset_from_local_datetime(naive)
        .earliest()
        .unwrap_or_else(|| Local.offset_from_utc_datetime(naive))
}

fn offset_for_utc(utc: &NaiveDateTime, context: &ConversionContext) -> FixedOffset {
    if context.has_provider() {
        context.provider().utc_offset()
    } else {
        Local.offset_from_utc_datetime(utc)
    }
}

/// `DateTime` to `DateTimeOffset`
pub(super) fn attach_offset(
    value: &Value,
    target: &TypeDescriptor,
    rules: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let Value::DateTime(naive) = value else {
        return Err(ConversionError::unsupported(&value.type_descriptor(), target));
    };
    let context = rules.context();
    let styles = context.date_time_styles();

    let offset = if styles.assumes_local() {
        offset_for_local(naive, context)
    } else {
        Utc.fix()
    };
    let attached: DateTime<FixedOffset> = naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| ConversionError::out_of_range(value, target))?;

    let attached = if styles.adjusts_to_universal() {
        attached.with_timezone(&Utc.fix())
    } else {
        attached
    };
    Ok(Value::DateTimeOffset(attached))
}

/// `DateTimeOffset` to `DateTime`: the UTC instant, or the reference-zone
/// wall clock under `ASSUME_LOCAL` without `ADJUST_TO_UNIVERSAL`
pub(super) fn strip_offset(
    value: &Value,
    target: &TypeDescriptor,
    rules: &RuleContext<'_>,
) -> ConversionResult<Value> {
    let Value::DateTimeOffset(dto) = value else {
        return Err(ConversionError::unsupported(&value.type_descriptor(), target));
    };
    let context = rules.context();
    let styles = context.date_time_styles();
    let utc = dto.naive_utc();

    if styles.assumes_local() && !styles.adjusts_to_universal() {
        let offset = offset_for_utc(&utc, context);
        return utc
            .checked_add_offset(offset)
            .map(Value::DateTime)
            .ok_or_else(|| ConversionError::out_of_range(value, target));
    }
    Ok(Value::DateTime(utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterConfig;
    use crate::context::{DateTimeStyles, FormatProvider};
    use crate::error::ConversionErrorKind;
    use chrono::NaiveDate;

    fn naive(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1968, 5, 20)
            .unwrap()
            .and_hms_opt(h, 2, 42)
            .unwrap()
    }

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn test_strip_keeps_the_utc_instant() {
        let config = ConverterConfig::default();
        let rules = RuleContext::new(ConversionContext::empty(), &config);
        let dto = naive(22).and_local_timezone(plus_two()).unwrap();
        let stripped = strip_offset(&Value::DateTimeOffset(dto), &TypeDescriptor::DateTime, &rules);
        assert_eq!(stripped.unwrap(), Value::DateTime(naive(20)));
    }

    #[test]
    fn test_attach_defaults_to_utc() {
        let config = ConverterConfig::default();
        let rules = RuleContext::new(ConversionContext::empty(), &config);
        let Value::DateTimeOffset(dto) = attach_offset(
            &Value::DateTime(naive(20)),
            &TypeDescriptor::DateTimeOffset,
            &rules,
        )
        .unwrap() else {
            panic!("expected an offset date/time");
        };
        assert_eq!(dto.offset().local_minus_utc(), 0);
        assert_eq!(dto.naive_utc(), naive(20));
    }

    #[test]
    fn test_assume_local_uses_provider_offset() {
        let config = ConverterConfig::default();
        let context = ConversionContext::new()
            .with_format_provider(FormatProvider::new("cest").with_utc_offset(plus_two()))
            .with_date_time_styles(DateTimeStyles::ASSUME_LOCAL);
        let rules = RuleContext::new(&context, &config);

        let Value::DateTimeOffset(dto) = attach_offset(
            &Value::DateTime(naive(22)),
            &TypeDescriptor::DateTimeOffset,
            &rules,
        )
        .unwrap() else {
            panic!("expected an offset date/time");
        };
        assert_eq!(dto.offset(), &plus_two());
        assert_eq!(dto.naive_utc(), naive(20));

        let back = strip_offset(&Value::DateTimeOffset(dto), &TypeDescriptor::DateTime, &rules);
        assert_eq!(back.unwrap(), Value::DateTime(naive(22)));
    }

    #[test]
    fn test_adjust_to_universal() {
        let config = ConverterConfig::default();
        let context = ConversionContext::new()
            .with_format_provider(FormatProvider::new("cest").with_utc_offset(plus_two()))
            .with_date_time_styles(DateTimeStyles::ASSUME_LOCAL | DateTimeStyles::ADJUST_TO_UNIVERSAL);
        let rules = RuleContext::new(&context, &config);

        let Value::DateTimeOffset(dto) = attach_offset(
            &Value::DateTime(naive(22)),
            &TypeDescriptor::DateTimeOffset,
            &rules,
        )
        .unwrap() else {
            panic!("expected an offset date/time");
        };
        assert_eq!(dto.offset().local_minus_utc(), 0);
        assert_eq!(dto.naive_local(), naive(20));
    }

    #[test]
    fn test_local_wall_clock_past_the_calendar_end() {
        let config = ConverterConfig::default();
        let context = ConversionContext::new()
            .with_format_provider(FormatProvider::new("cest").with_utc_offset(plus_two()))
            .with_date_time_styles(DateTimeStyles::ASSUME_LOCAL);
        let rules = RuleContext::new(&context, &config);

        let last = Value::DateTimeOffset(NaiveDateTime::MAX.and_utc().fixed_offset());
        let err = strip_offset(&last, &TypeDescriptor::DateTime, &rules).unwrap_err();
        assert_eq!(err.kind(), ConversionErrorKind::OutOfRange);

        // the UTC instant itself is still representable
        let rules = RuleContext::new(ConversionContext::empty(), &config);
        let stripped = strip_offset(&last, &TypeDescriptor::DateTime, &rules);
        assert_eq!(stripped.unwrap(), Value::DateTime(NaiveDateTime::MAX));
    }
}
