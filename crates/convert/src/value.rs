//! Dynamically typed scalar values.
//!
//! A [`Value`] always knows its own [`TypeDescriptor`]; the dispatcher never
//! needs a separate "source type" argument.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::types::{EnumMember, EnumType, IntegerKind, TypeDescriptor};

// ============================================================================
// Value
// ============================================================================

/// A typed scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    String(String),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Guid(Uuid),
    /// Locators admit an explicit null
    Uri(Option<Url>),
    Enum(EnumValue),
    Nullable(NullableValue),
    Opaque(OpaqueValue),
}

impl Value {
    /// The declared type of this value
    pub fn type_descriptor(&self) -> TypeDescriptor {
        match self {
            Self::Bool(_) => TypeDescriptor::Bool,
            Self::I8(_) => TypeDescriptor::I8,
            Self::I16(_) => TypeDescriptor::I16,
            Self::I32(_) => TypeDescriptor::I32,
            Self::I64(_) => TypeDescriptor::I64,
            Self::U8(_) => TypeDescriptor::U8,
            Self::U16(_) => TypeDescriptor::U16,
            Self::U32(_) => TypeDescriptor::U32,
            Self::U64(_) => TypeDescriptor::U64,
            Self::F32(_) => TypeDescriptor::F32,
            Self::F64(_) => TypeDescriptor::F64,
            Self::Decimal(_) => TypeDescriptor::Decimal,
            Self::Char(_) => TypeDescriptor::Char,
            Self::String(_) => TypeDescriptor::String,
            Self::DateTime(_) => TypeDescriptor::DateTime,
            Self::DateTimeOffset(_) => TypeDescriptor::DateTimeOffset,
            Self::Duration(_) => TypeDescriptor::Duration,
            Self::Guid(_) => TypeDescriptor::Guid,
            Self::Uri(_) => TypeDescriptor::Uri,
            Self::Enum(e) => TypeDescriptor::Enum(e.enum_type().clone()),
            Self::Nullable(n) => TypeDescriptor::nullable(n.inner().clone()),
            Self::Opaque(o) => TypeDescriptor::Opaque(o.type_name.clone()),
        }
    }

    /// The zero-equivalent of `ty`: what a failed non-throwing conversion
    /// hands back, and what an absent nullable converts to. For an enum
    /// that is the member with ordinal 0, else the first declared member.
    pub fn default_for(ty: &TypeDescriptor) -> Self {
        match ty {
            TypeDescriptor::Bool => Self::Bool(false),
            TypeDescriptor::Integer(kind) => Self::integer(*kind, 0).unwrap_or(Self::I32(0)),
            TypeDescriptor::F32 => Self::F32(0.0),
            TypeDescriptor::F64 => Self::F64(0.0),
            TypeDescriptor::Decimal => Self::Decimal(Decimal::ZERO),
            TypeDescriptor::Char => Self::Char('\0'),
            TypeDescriptor::String => Self::String(String::new()),
            TypeDescriptor::DateTime => Self::DateTime(epoch()),
            TypeDescriptor::DateTimeOffset => Self::DateTimeOffset(epoch_with_offset()),
            TypeDescriptor::Duration => Self::Duration(TimeDelta::zero()),
            TypeDescriptor::Guid => Self::Guid(Uuid::nil()),
            TypeDescriptor::Uri => Self::Uri(None),
            TypeDescriptor::Enum(ty) => {
                let ordinal = ty
                    .member_by_ordinal(0)
                    .or_else(|| ty.members().first())
                    .map_or(0, EnumMember::ordinal);
                Self::Enum(EnumValue::new(ty.clone(), ordinal))
            }
            TypeDescriptor::Nullable(inner) => {
                Self::Nullable(NullableValue::absent(inner.as_ref().clone()))
            }
            TypeDescriptor::Opaque(name) => Self::Opaque(OpaqueValue::null(name.clone())),
        }
    }

    /// Build the integer variant for `kind`, `None` when `value` does not fit
    pub fn integer(kind: IntegerKind, value: i128) -> Option<Self> {
        Some(match kind {
            IntegerKind::I8 => Self::I8(i8::try_from(value).ok()?),
            IntegerKind::I16 => Self::I16(i16::try_from(value).ok()?),
            IntegerKind::I32 => Self::I32(i32::try_from(value).ok()?),
            IntegerKind::I64 => Self::I64(i64::try_from(value).ok()?),
            IntegerKind::U8 => Self::U8(u8::try_from(value).ok()?),
            IntegerKind::U16 => Self::U16(u16::try_from(value).ok()?),
            IntegerKind::U32 => Self::U32(u32::try_from(value).ok()?),
            IntegerKind::U64 => Self::U64(u64::try_from(value).ok()?),
        })
    }

    /// Integer payload widened to `i128`, `None` for non-integers
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            _ => None,
        }
    }

    /// A null locator
    pub const fn null_uri() -> Self {
        Self::Uri(None)
    }

    /// Value equality that treats floats bit-for-bit, so `NaN` matches itself
    /// and `0.0` does not match `-0.0`.
    pub fn is_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            (Self::Nullable(a), Self::Nullable(b)) => {
                a.inner == b.inner
                    && match (&a.value, &b.value) {
                        (Some(x), Some(y)) => x.is_identical(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => self == other,
        }
    }
}

/// Zero-equivalent of the offset-less date/time: the Unix epoch
pub fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Zero-equivalent of the offset date/time: the Unix epoch at `+00:00`
pub fn epoch_with_offset() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::DateTimeOffset(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{v}"),
            Self::Guid(v) => write!(f, "{v}"),
            Self::Uri(Some(v)) => write!(f, "{v}"),
            Self::Uri(None) | Self::Opaque(OpaqueValue { object: None, .. }) => f.write_str("null"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Nullable(v) => match v.value() {
                Some(inner) => write!(f, "{inner}"),
                None => f.write_str("none"),
            },
            Self::Opaque(v) => write!(f, "<{}>", v.type_name),
        }
    }
}

// ============================================================================
// Enum values
// ============================================================================

/// An enum ordinal tagged with its declaration.
///
/// The ordinal always fits the declaration's underlying integer kind; it may
/// name no declared member when produced under the open ordinal policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_type: EnumType,
    ordinal: i128,
}

impl EnumValue {
    pub const fn new(enum_type: EnumType, ordinal: i128) -> Self {
        Self { enum_type, ordinal }
    }

    /// Member named `name`, `None` when no such member is declared
    pub fn named(enum_type: &EnumType, name: &str) -> Option<Self> {
        let ordinal = enum_type.member_by_name(name)?.ordinal();
        Some(Self::new(enum_type.clone(), ordinal))
    }

    pub const fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }

    pub const fn ordinal(&self) -> i128 {
        self.ordinal
    }

    /// Declared name for the ordinal, if any
    pub fn name(&self) -> Option<&str> {
        self.enum_type
            .member_by_ordinal(self.ordinal)
            .map(|m| m.name())
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}::{}", self.enum_type.name(), name),
            None => write!(f, "{}({})", self.enum_type.name(), self.ordinal),
        }
    }
}

// ============================================================================
// Nullable values
// ============================================================================

/// A wrapper that may hold no value
#[derive(Debug, Clone, PartialEq)]
pub struct NullableValue {
    inner: TypeDescriptor,
    value: Option<Box<Value>>,
}

impl NullableValue {
    /// No value of type `inner`
    pub const fn absent(inner: TypeDescriptor) -> Self {
        Self { inner, value: None }
    }

    /// `value`, wrapped
    pub fn present(value: Value) -> Self {
        Self {
            inner: value.type_descriptor(),
            value: Some(Box::new(value)),
        }
    }

    /// The declared wrapped type
    pub const fn inner(&self) -> &TypeDescriptor {
        &self.inner
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value.map(|v| *v)
    }

    pub const fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

// ============================================================================
// Opaque values
// ============================================================================

/// A reference of a type the engine does not know.
///
/// Carried through so it can be rejected with a precise error; the engine
/// never inspects the object.
#[derive(Clone)]
pub struct OpaqueValue {
    type_name: Arc<str>,
    object: Option<Arc<dyn Any + Send + Sync>>,
}

impl OpaqueValue {
    pub fn new(type_name: impl Into<Arc<str>>, object: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            type_name: type_name.into(),
            object: Some(object),
        }
    }

    pub fn null(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            type_name: type_name.into(),
            object: None,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn object(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.object.as_ref()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("type_name", &self.type_name)
            .field("null", &self.object.is_none())
            .finish()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && match (&self.object, &other.object) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

// ============================================================================
// Conversions into Value
// ============================================================================

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
    f32 => F32, f64 => F64,
    Decimal => Decimal,
    char => Char,
    String => String,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    TimeDelta => Duration,
    Uuid => Guid,
    Option<Url> => Uri,
    EnumValue => Enum,
    NullableValue => Nullable,
    OpaqueValue => Opaque,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Url> for Value {
    fn from(v: Url) -> Self {
        Self::Uri(Some(v))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTimeOffset(v.fixed_offset())
    }
}
