//! Statically typed conversion API.
//!
//! ```rust
//! use coerce_convert::{convert, try_convert};
//!
//! let n: i32 = convert(true).unwrap();
//! assert_eq!(n, 1);
//!
//! let (ok, small): (bool, i8) = try_convert(i64::MAX);
//! assert!(!ok);
//! assert_eq!(small, 0);
//! ```
//!
//! Every call goes through [`Converter::convert_value`]; the typed layer
//! only moves values in and out of [`Value`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::context::ConversionContext;
use crate::dispatch::Converter;
use crate::error::{ConversionError, ConversionResult};
use crate::types::{EnumType, TypeDescriptor};
use crate::value::{NullableValue, Value, epoch, epoch_with_offset};

/// A Rust type with a [`TypeDescriptor`] the engine can target
pub trait Convertible: Sized {
    fn type_descriptor() -> TypeDescriptor;

    fn into_value(self) -> Value;

    /// Take the value back out; hands the value back when it is of another
    /// type, or names no member of a Rust enum.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// What a failed non-throwing conversion yields
    fn zero() -> Self;
}

/// Value-like types: those that may sit inside the nullable wrapper
/// (`Option<T>`). Text and locators already admit absence.
pub trait ValueType: Convertible {}

macro_rules! value_type {
    ($($ty:ty => $variant:ident, $descriptor:expr, $zero:expr;)*) => {
        $(
            impl Convertible for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    $descriptor
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }

                fn zero() -> Self {
                    $zero
                }
            }

            impl ValueType for $ty {}
        )*
    };
}

value_type! {
    bool => Bool, TypeDescriptor::Bool, false;
    i8 => I8, TypeDescriptor::I8, 0;
    i16 => I16, TypeDescriptor::I16, 0;
    i32 => I32, TypeDescriptor::I32, 0;
    i64 => I64, TypeDescriptor::I64, 0;
    u8 => U8, TypeDescriptor::U8, 0;
    u16 => U16, TypeDescriptor::U16, 0;
    u32 => U32, TypeDescriptor::U32, 0;
    u64 => U64, TypeDescriptor::U64, 0;
    f32 => F32, TypeDescriptor::F32, 0.0;
    f64 => F64, TypeDescriptor::F64, 0.0;
    Decimal => Decimal, TypeDescriptor::Decimal, Decimal::ZERO;
    char => Char, TypeDescriptor::Char, '\0';
    NaiveDateTime => DateTime, TypeDescriptor::DateTime, epoch();
    DateTime<FixedOffset> => DateTimeOffset, TypeDescriptor::DateTimeOffset, epoch_with_offset();
    TimeDelta => Duration, TypeDescriptor::Duration, TimeDelta::zero();
    Uuid => Guid, TypeDescriptor::Guid, Uuid::nil();
}

impl Convertible for String {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::String
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(other),
        }
    }

    fn zero() -> Self {
        Self::new()
    }
}

/// Locators, with `None` as the null locator
impl Convertible for Option<Url> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Uri
    }

    fn into_value(self) -> Value {
        Value::Uri(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Uri(v) => Ok(v),
            other => Err(other),
        }
    }

    fn zero() -> Self {
        None
    }
}

/// The nullable wrapper
impl<T: ValueType> Convertible for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::nullable(T::type_descriptor())
    }

    fn into_value(self) -> Value {
        Value::Nullable(match self {
            Some(v) => NullableValue::present(v.into_value()),
            None => NullableValue::absent(T::type_descriptor()),
        })
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Nullable(nullable) if nullable.inner() == &T::type_descriptor() => {
                match nullable.into_value() {
                    Some(inner) => T::from_value(inner).map(Some),
                    None => Ok(None),
                }
            }
            other => Err(other),
        }
    }

    fn zero() -> Self {
        None
    }
}

impl<T: ValueType> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.into_value()
    }
}
// ============================================================================
// Rust enums
// ============================================================================

/// A Rust enum declared with [`convertible_enum!`](crate::convertible_enum)
pub trait ConvertibleEnum: Copy + 'static {
    /// Every member, in declaration order
    const MEMBERS: &'static [Self];

    /// The shared runtime declaration
    fn enum_type() -> &'static EnumType;

    fn ordinal(self) -> i128;

    /// First member carrying `ordinal`
    fn from_ordinal(ordinal: i128) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.ordinal() == ordinal)
    }
}

#[doc(hidden)]
pub fn enum_from_value<E: ConvertibleEnum>(value: Value) -> Result<E, Value> {
    let ordinal = match &value {
        Value::Enum(e) if e.enum_type() == E::enum_type() => Some(e.ordinal()),
        _ => None,
    };
    match ordinal.and_then(E::from_ordinal) {
        Some(member) => Ok(member),
        None => Err(value),
    }
}

// ============================================================================
// Typed conversion
// ============================================================================

impl Converter {
    /// Convert to `T`, failing with a structured error
    pub fn convert<T: Convertible>(
        &self,
        value: impl Into<Value>,
        context: Option<&ConversionContext>,
    ) -> ConversionResult<T> {
        let target = T::type_descriptor();
        let converted = self.convert_value(&value.into(), &target, context)?;
        // only reachable for open-policy ordinals a Rust enum cannot hold
        T::from_value(converted).map_err(|value| ConversionError::out_of_range(value, &target))
    }

    /// Convert to `T`; on failure the flag is `false` and the value is
    /// [`Convertible::zero`]
    pub fn try_convert<T: Convertible>(
        &self,
        value: impl Into<Value>,
        context: Option<&ConversionContext>,
    ) -> (bool, T) {
        match self.convert(value, context) {
            Ok(converted) => (true, converted),
            Err(_) => (false, T::zero()),
        }
    }
}

/// Convert with the default converter and no context
pub fn convert<T: Convertible>(value: impl Into<Value>) -> ConversionResult<T> {
    Converter::global().convert(value, None)
}

/// Convert with the default converter and `context`
pub fn convert_with<T: Convertible>(
    value: impl Into<Value>,
    context: &ConversionContext,
) -> ConversionResult<T> {
    Converter::global().convert(value, Some(context))
}

/// Non-throwing [`convert`]
pub fn try_convert<T: Convertible>(value: impl Into<Value>) -> (bool, T) {
    Converter::global().try_convert(value, None)
}

/// Non-throwing [`convert_with`]
pub fn try_convert_with<T: Convertible>(
    value: impl Into<Value>,
    context: &ConversionContext,
) -> (bool, T) {
    Converter::global().try_convert(value, Some(context))
}
