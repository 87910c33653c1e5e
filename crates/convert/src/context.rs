//! Per-call conversion context.
//!
//! Every field is optional. A missing field behaves exactly as if no context
//! had been passed at all: invariant culture, default formats, UTC as the
//! reference timezone.

use std::borrow::Cow;

use chrono::{FixedOffset, Offset, Utc};
use once_cell::sync::Lazy;

bitflags::bitflags! {
    /// How offset-less date/times relate to a timezone.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DateTimeStyles: u8 {
        /// Offset-less values are UTC (the default when no flag is set)
        const ASSUME_UNIVERSAL = 1;
        /// Offset-less values are in the reference timezone
        const ASSUME_LOCAL = 1 << 1;
        /// Offset values are shifted to UTC before they leave the engine
        const ADJUST_TO_UNIVERSAL = 1 << 2;
    }
}

impl DateTimeStyles {
    /// Whether offset-less values are read in the reference timezone.
    /// `ASSUME_UNIVERSAL` wins when both assumptions are set.
    pub const fn assumes_local(self) -> bool {
        self.contains(Self::ASSUME_LOCAL) && !self.contains(Self::ASSUME_UNIVERSAL)
    }

    pub const fn adjusts_to_universal(self) -> bool {
        self.contains(Self::ADJUST_TO_UNIVERSAL)
    }
}

// ============================================================================
// Format provider
// ============================================================================

/// Culture-like rendering settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProvider {
    name: Cow<'static, str>,
    decimal_separator: char,
    group_separator: char,
    negative_sign: char,
    utc_offset: FixedOffset,
    date_time_pattern: Option<Cow<'static, str>>,
}

static INVARIANT: Lazy<FormatProvider> = Lazy::new(|| FormatProvider {
    name: Cow::Borrowed(""),
    decimal_separator: '.',
    group_separator: ',',
    negative_sign: '-',
    utc_offset: Utc.fix(),
    date_time_pattern: None,
});

impl FormatProvider {
    /// The culture used when no provider is supplied
    pub fn invariant() -> &'static Self {
        &INVARIANT
    }

    /// A named provider starting from invariant settings
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..INVARIANT.clone()
        }
    }

    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_group_separator(mut self, separator: char) -> Self {
        self.group_separator = separator;
        self
    }

    pub fn with_negative_sign(mut self, sign: char) -> Self {
        self.negative_sign = sign;
        self
    }

    /// Reference timezone for `DateTimeStyles::ASSUME_LOCAL`
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// strftime pattern used for date/times when the context has no `format`
    pub fn with_date_time_pattern(mut self, pattern: impl Into<Cow<'static, str>>) -> Self {
        self.date_time_pattern = Some(pattern.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub const fn group_separator(&self) -> char {
        self.group_separator
    }

    pub const fn negative_sign(&self) -> char {
        self.negative_sign
    }

    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn date_time_pattern(&self) -> Option<&str> {
        self.date_time_pattern.as_deref()
    }
}

// ============================================================================
// Conversion context
// ============================================================================

/// Optional per-call configuration.
///
/// ```rust
/// use coerce_convert::{ConversionContext, DateTimeStyles, FormatProvider};
///
/// let context = ConversionContext::new()
///     .with_format("N2")
///     .with_format_provider(FormatProvider::new("de").with_decimal_separator(','))
///     .with_date_time_styles(DateTimeStyles::ADJUST_TO_UNIVERSAL);
/// assert_eq!(context.format(), Some("N2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionContext {
    format: Option<String>,
    format_provider: Option<FormatProvider>,
    date_time_styles: Option<DateTimeStyles>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_format_provider(mut self, provider: FormatProvider) -> Self {
        self.format_provider = Some(provider);
        self
    }

    pub fn with_date_time_styles(mut self, styles: DateTimeStyles) -> Self {
        self.date_time_styles = Some(styles);
        self
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The supplied provider, or the invariant one
    pub fn provider(&self) -> &FormatProvider {
        match &self.format_provider {
            Some(provider) => provider,
            None => FormatProvider::invariant(),
        }
    }

    /// Whether a provider was explicitly supplied
    pub const fn has_provider(&self) -> bool {
        self.format_provider.is_some()
    }

    /// The supplied styles, or none
    pub fn date_time_styles(&self) -> DateTimeStyles {
        self.date_time_styles.unwrap_or_default()
    }

    /// Context used when the caller passes none
    pub fn empty() -> &'static Self {
        static EMPTY: Lazy<ConversionContext> = Lazy::new(ConversionContext::default);
        &EMPTY
    }
}
