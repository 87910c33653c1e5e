//! # coerce-convert
//!
//! Category-driven conversion of typed scalars.
//!
//! Given a value of one declared type and a requested target type, the
//! engine either produces the equivalent value of the target type or reports
//! exactly why it cannot. Types are first classified into a small closed set
//! of categories; one rule per category pair then performs the conversion.
//!
//! ## Quick start
//!
//! ```rust
//! use coerce_convert::prelude::*;
//!
//! // Typed API
//! let one: i32 = convert(true)?;
//! assert_eq!(one, 1);
//!
//! // Non-throwing convention: flag plus zero-equivalent on failure
//! let (ok, value): (bool, i8) = try_convert(i64::MAX);
//! assert!(!ok && value == 0);
//!
//! // Dynamic API
//! let converter = Converter::global();
//! let text = converter.convert_value(
//!     &Value::from(1234.5f64),
//!     &TypeDescriptor::String,
//!     Some(&ConversionContext::new().with_format("N1")),
//! )?;
//! assert_eq!(text, Value::from("1,234.5"));
//! # Ok::<(), ConversionError>(())
//! ```
//!
//! ## Modules
//!
//! - [`types`] and [`value`]: declared types and dynamically typed values
//! - [`category`]: the type classifier
//! - [`rules`]: the immutable rule table
//! - [`context`]: per-call formatting and date/time settings
//! - [`config`]: converter-wide policies
//! - [`typed`]: the `Convertible` trait and the typed entry points

pub mod category;
pub mod config;
pub mod context;
mod dispatch;
pub mod error;
mod format;
mod macros;
pub mod rules;
pub mod typed;
pub mod types;
pub mod value;

pub use category::{Category, Family, TemporalKind, classify};
pub use config::{BooleanPolicy, ConverterConfig, EnumOrdinalPolicy};
pub use context::{ConversionContext, DateTimeStyles, FormatProvider};
pub use dispatch::Converter;
pub use error::{ConversionError, ConversionErrorKind, ConversionResult};
pub use format::{DATE_TIME_OFFSET_ROUND_TRIP, DATE_TIME_ROUND_TRIP};
pub use typed::{
    Convertible, ConvertibleEnum, ValueType, convert, convert_with, try_convert, try_convert_with,
};
pub use types::{EnumMember, EnumType, IntegerKind, IntegerRepr, TypeDescriptor};
pub use value::{EnumValue, NullableValue, OpaqueValue, Value};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ConversionContext, ConversionError, ConversionErrorKind, ConversionResult, Convertible,
        Converter, ConverterConfig, DateTimeStyles, FormatProvider, TypeDescriptor, Value,
        convert, convert_with, convertible_enum, try_convert, try_convert_with,
    };
}

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
