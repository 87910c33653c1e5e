//! Text rendering for numbers, date/times and durations.
//!
//! Numeric format strings follow the familiar single-letter specifiers:
//!
//! | Specifier | Applies to   | Meaning                                   |
//! |-----------|--------------|-------------------------------------------|
//! | `G`, `R`  | all numbers  | shortest round-trippable text (default)   |
//! | `D[n]`    | integers     | decimal digits, zero-padded to `n`        |
//! | `X[n]`    | integers     | hexadecimal (two's complement), padded    |
//! | `F[n]`    | all numbers  | fixed point with `n` decimals (default 2) |
//! | `N[n]`    | all numbers  | like `F` with group separators            |
//!
//! Date/time formats are strftime patterns, plus `o` (round-trip) and `s`
//! (sortable).

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::context::FormatProvider;
use crate::error::{ConversionError, ConversionResult};
use crate::types::{IntegerKind, TypeDescriptor};

/// Round-trippable pattern for offset-less date/times
pub const DATE_TIME_ROUND_TRIP: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Round-trippable pattern for offset date/times
pub const DATE_TIME_OFFSET_ROUND_TRIP: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

const SORTABLE: &str = "%Y-%m-%dT%H:%M:%S";

// ============================================================================
// Numbers
// ============================================================================

/// A number borrowed for rendering
#[derive(Debug, Clone, Copy)]
pub(crate) enum Number {
    Integer(i128, IntegerKind),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Specifier {
    General,
    Digits(Option<usize>),
    Hex { upper: bool, width: Option<usize> },
    Fixed(usize),
    Grouped(usize),
}

impl Specifier {
    fn parse(format: &str) -> Option<Self> {
        let mut chars = format.chars();
        let letter = chars.next()?;
        let rest = chars.as_str();
        let precision = if rest.is_empty() {
            None
        } else {
            Some(rest.parse::<usize>().ok().filter(|p| *p <= 99)?)
        };

        Some(match letter {
            'G' | 'g' | 'R' | 'r' if precision.is_none() => Self::General,
            'D' | 'd' => Self::Digits(precision),
            'X' => Self::Hex {
                upper: true,
                width: precision,
            },
            'x' => Self::Hex {
                upper: false,
                width: precision,
            },
            'F' | 'f' => Self::Fixed(precision.unwrap_or(2)),
            'N' | 'n' => Self::Grouped(precision.unwrap_or(2)),
            _ => return None,
        })
    }
}

/// Render `number` as text.
///
/// `source` names the rendered type in format errors.
pub(crate) fn render_number(
    number: Number,
    format: Option<&str>,
    provider: &FormatProvider,
    source: &TypeDescriptor,
) -> ConversionResult<String> {
    let specifier = match format {
        None => Specifier::General,
        Some(format) => Specifier::parse(format)
            .ok_or_else(|| ConversionError::invalid_format(format, source))?,
    };

    match (specifier, number) {
        (Specifier::General, Number::Integer(v, _)) => Ok(localize(&v.to_string(), provider)),
        (Specifier::General, Number::F32(v)) => Ok(general_float(
            v.is_nan(),
            v.is_infinite(),
            v.is_sign_negative(),
            || {
                if is_exponential(f64::from(v)) {
                    format!("{v:e}")
                } else {
                    v.to_string()
                }
            },
            provider,
        )),
        (Specifier::General, Number::F64(v)) => Ok(general_float(
            v.is_nan(),
            v.is_infinite(),
            v.is_sign_negative(),
            || {
                if is_exponential(v) {
                    format!("{v:e}")
                } else {
                    v.to_string()
                }
            },
            provider,
        )),
        (Specifier::General, Number::Decimal(v)) => Ok(localize(&v.to_string(), provider)),
        (Specifier::Digits(width), Number::Integer(v, _)) => {
            let digits = pad_zeros(v.unsigned_abs().to_string(), width);
            Ok(compose(v < 0, &digits, None, false, provider))
        }
        (Specifier::Hex { upper, width }, Number::Integer(v, kind)) => {
            let mask = (1u128 << kind.bits()) - 1;
            let bits = (v as u128) & mask;
            let digits = if upper {
                format!("{bits:X}")
            } else {
                format!("{bits:x}")
            };
            Ok(pad_zeros(digits, width))
        }
        (Specifier::Digits(_) | Specifier::Hex { .. }, _) => Err(ConversionError::invalid_format(
            format.unwrap_or_default(),
            source,
        )),
        (Specifier::Fixed(precision), number) => Ok(fixed(number, precision, false, provider)),
        (Specifier::Grouped(precision), number) => Ok(fixed(number, precision, true, provider)),
    }
}

fn is_exponential(v: f64) -> bool {
    let abs = v.abs();
    abs >= 1e15 || (abs != 0.0 && abs < 1e-5)
}

fn general_float(
    nan: bool,
    infinite: bool,
    negative: bool,
    finite: impl FnOnce() -> String,
    provider: &FormatProvider,
) -> String {
    if nan {
        "NaN".to_owned()
    } else if infinite {
        if negative {
            format!("{}Infinity", provider.negative_sign())
        } else {
            "Infinity".to_owned()
        }
    } else {
        localize(&finite(), provider)
    }
}

fn fixed(number: Number, precision: usize, grouped: bool, provider: &FormatProvider) -> String {
    let text = match number {
        Number::Integer(v, _) => {
            if precision == 0 {
                v.to_string()
            } else {
                format!("{v}.{}", "0".repeat(precision))
            }
        }
        Number::F32(v) if !v.is_finite() => {
            return general_float(v.is_nan(), true, v.is_sign_negative(), String::new, provider);
        }
        Number::F64(v) if !v.is_finite() => {
            return general_float(v.is_nan(), true, v.is_sign_negative(), String::new, provider);
        }
        Number::F32(v) => format!("{:.*}", precision, f64::from(v)),
        Number::F64(v) => format!("{v:.precision$}"),
        Number::Decimal(v) => {
            let rounded =
                v.round_dp_with_strategy(precision as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.precision$}")
        }
    };

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    compose(negative, integer, fraction, grouped, provider)
}

fn compose(
    negative: bool,
    integer: &str,
    fraction: Option<&str>,
    grouped: bool,
    provider: &FormatProvider,
) -> String {
    let mut out = String::with_capacity(integer.len() + fraction.map_or(0, str::len) + 8);
    if negative {
        out.push(provider.negative_sign());
    }
    if grouped {
        let len = integer.len();
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(provider.group_separator());
            }
            out.push(digit);
        }
    } else {
        out.push_str(integer);
    }
    if let Some(fraction) = fraction {
        out.push(provider.decimal_separator());
        out.push_str(fraction);
    }
    out
}

/// Swap invariant sign and decimal point for the provider's
fn localize(text: &str, provider: &FormatProvider) -> String {
    text.chars()
        .map(|c| match c {
            '-' => provider.negative_sign(),
            '.' => provider.decimal_separator(),
            other => other,
        })
        .collect()
}

fn pad_zeros(digits: String, width: Option<usize>) -> String {
    match width {
        Some(width) if digits.len() < width => {
            format!("{}{digits}", "0".repeat(width - digits.len()))
        }
        _ => digits,
    }
}

// ============================================================================
// Date/times
// ============================================================================

fn date_time_items<'a>(
    pattern: &'a str,
    source: &TypeDescriptor,
) -> ConversionResult<Vec<Item<'a>>> {
    let items: Vec<Item<'a>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ConversionError::invalid_format(pattern, source));
    }
    Ok(items)
}

fn resolve_pattern<'a>(format: &'a str, round_trip: &'static str) -> &'a str {
    match format {
        "o" | "O" => round_trip,
        "s" => SORTABLE,
        pattern => pattern,
    }
}

/// Render an offset-less date/time with a strftime pattern or standard letter
pub(crate) fn render_date_time(value: &NaiveDateTime, format: &str) -> ConversionResult<String> {
    let pattern = resolve_pattern(format, DATE_TIME_ROUND_TRIP);
    let items = date_time_items(pattern, &TypeDescriptor::DateTime)?;
    let mut out = String::new();
    write!(out, "{}", value.format_with_items(items.iter()))
        .map_err(|_| ConversionError::invalid_format(format, TypeDescriptor::DateTime))?;
    Ok(out)
}

/// Render an offset date/time with a strftime pattern or standard letter
pub(crate) fn render_date_time_offset(
    value: &DateTime<FixedOffset>,
    format: &str,
) -> ConversionResult<String> {
    let pattern = resolve_pattern(format, DATE_TIME_OFFSET_ROUND_TRIP);
    let items = date_time_items(pattern, &TypeDescriptor::DateTimeOffset)?;
    let mut out = String::new();
    write!(out, "{}", value.format_with_items(items.iter()))
        .map_err(|_| ConversionError::invalid_format(format, TypeDescriptor::DateTimeOffset))?;
    Ok(out)
}

// ============================================================================
// Durations
// ============================================================================

/// Render a duration as `[-][d.]hh:mm:ss[.fffffffff]`.
///
/// Only the constant format (`c`, or no format) is supported.
pub(crate) fn render_duration(value: TimeDelta, format: Option<&str>) -> ConversionResult<String> {
    if let Some(format) = format
        && format != "c"
    {
        return Err(ConversionError::invalid_format(format, TypeDescriptor::Duration));
    }

    let negative = value < TimeDelta::zero();
    let magnitude = value.abs();
    let total = magnitude.num_seconds();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );
    let nanos = magnitude.subsec_nanos();

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn invariant() -> &'static FormatProvider {
        FormatProvider::invariant()
    }

    fn render(number: Number, format: Option<&str>) -> ConversionResult<String> {
        render_number(number, format, invariant(), &TypeDescriptor::I32)
    }

    #[test]
    fn test_general() {
        assert_eq!(render(Number::Integer(-42, IntegerKind::I32), None).unwrap(), "-42");
        assert_eq!(render(Number::F32(0.1), None).unwrap(), "0.1");
        assert_eq!(render(Number::F64(1.5), None).unwrap(), "1.5");
        assert_eq!(render(Number::F64(1e300), None).unwrap(), "1e300");
        assert_eq!(render(Number::F64(f64::NEG_INFINITY), None).unwrap(), "-Infinity");
        assert_eq!(render(Number::F64(f64::NAN), None).unwrap(), "NaN");
    }

    #[test]
    fn test_digits_and_hex() {
        let v = Number::Integer(42, IntegerKind::I32);
        assert_eq!(render(v, Some("D5")).unwrap(), "00042");
        assert_eq!(render(v, Some("X")).unwrap(), "2A");
        assert_eq!(render(v, Some("x4")).unwrap(), "002a");
        assert_eq!(
            render(Number::Integer(-1, IntegerKind::I16), Some("X")).unwrap(),
            "FFFF"
        );
        assert!(render(Number::F64(1.0), Some("D")).is_err());
    }

    #[test]
    fn test_fixed_and_grouped() {
        assert_eq!(render(Number::F64(1234.567), Some("F2")).unwrap(), "1234.57");
        assert_eq!(render(Number::F64(1234.567), Some("N1")).unwrap(), "1,234.6");
        assert_eq!(
            render(Number::Integer(-1_234_567, IntegerKind::I64), Some("N0")).unwrap(),
            "-1,234,567"
        );
        assert_eq!(
            render(Number::Decimal(Decimal::new(25, 1)), Some("F0")).unwrap(),
            "3"
        );
    }

    #[test]
    fn test_provider_separators() {
        let provider = FormatProvider::new("de")
            .with_decimal_separator(',')
            .with_group_separator('.');
        let text = render_number(
            Number::F64(1234.5),
            Some("N2"),
            &provider,
            &TypeDescriptor::F64,
        )
        .unwrap();
        assert_eq!(text, "1.234,50");
    }

    #[test]
    fn test_unknown_specifier() {
        let err = render(Number::Integer(1, IntegerKind::I32), Some("Q")).unwrap_err();
        assert_eq!(err.code(), "CONVERT_INVALID_FORMAT");
    }

    #[test]
    fn test_date_time_patterns() {
        let value = NaiveDate::from_ymd_opt(1968, 5, 20)
            .unwrap()
            .and_hms_opt(20, 2, 42)
            .unwrap();
        assert_eq!(render_date_time(&value, "o").unwrap(), "1968-05-20T20:02:42");
        assert_eq!(render_date_time(&value, "%d/%m/%Y").unwrap(), "20/05/1968");
        assert!(render_date_time(&value, "%Q").is_err());
        // offset directive on an offset-less value fails at render time
        assert!(render_date_time(&value, "%z").is_err());
    }

    #[test]
    fn test_duration() {
        let value = TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::milliseconds(500);
        assert_eq!(render_duration(value, None).unwrap(), "1.02:00:00.5");
        assert_eq!(render_duration(-TimeDelta::minutes(90), None).unwrap(), "-01:30:00");
        assert_eq!(render_duration(TimeDelta::zero(), None).unwrap(), "00:00:00");
        assert_eq!(render_duration(TimeDelta::days(12), None).unwrap(), "12.00:00:00");
        assert!(render_duration(value, Some("hh")).is_err());
    }
}
