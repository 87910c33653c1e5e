//! Declared types understood by the engine.
//!
//! A [`TypeDescriptor`] is the runtime stand-in for "the type a value was
//! declared with" on the source side and "the type the consumer asked for" on
//! the target side. It is purely descriptive: classification into rule
//! categories happens in [`crate::category`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// Integer kinds
// ============================================================================

/// Width and signedness of a primitive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntegerKind {
    /// Every integer kind, narrowest signed first
    pub const ALL: [Self; 8] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
    ];

    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
        }
    }

    /// Smallest representable value
    pub const fn min(self) -> i128 {
        match self {
            Self::I8 => i8::MIN as i128,
            Self::I16 => i16::MIN as i128,
            Self::I32 => i32::MIN as i128,
            Self::I64 => i64::MIN as i128,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => 0,
        }
    }

    /// Largest representable value
    pub const fn max(self) -> i128 {
        match self {
            Self::I8 => i8::MAX as i128,
            Self::I16 => i16::MAX as i128,
            Self::I32 => i32::MAX as i128,
            Self::I64 => i64::MAX as i128,
            Self::U8 => u8::MAX as i128,
            Self::U16 => u16::MAX as i128,
            Self::U32 => u32::MAX as i128,
            Self::U64 => u64::MAX as i128,
        }
    }

    /// Whether `value` is representable without wraparound
    pub const fn contains(self, value: i128) -> bool {
        value >= self.min() && value <= self.max()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

impl fmt::Display for IntegerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primitive integers usable as an enum's underlying representation.
pub trait IntegerRepr: Copy {
    const KIND: IntegerKind;
}

macro_rules! integer_repr {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl IntegerRepr for $ty {
                const KIND: IntegerKind = IntegerKind::$kind;
            }
        )*
    };
}

integer_repr! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
}

// ============================================================================
// Enum declarations
// ============================================================================

/// One declared enum member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    name: String,
    ordinal: i128,
}

impl EnumMember {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn ordinal(&self) -> i128 {
        self.ordinal
    }
}

#[derive(Debug, PartialEq, Eq)]
struct EnumDescriptor {
    name: String,
    underlying: IntegerKind,
    members: Vec<EnumMember>,
}

/// Shared declaration of an enumeration type.
///
/// Cloning is a reference-count bump. Two handles are equal when they
/// describe the same declaration, whether or not they share an allocation.
#[derive(Debug, Clone)]
pub struct EnumType(Arc<EnumDescriptor>);

impl EnumType {
    /// Declare an enum.
    ///
    /// Members keep their declaration order; when several share an ordinal
    /// the first one is the canonical name for that ordinal.
    pub fn new<N>(
        name: impl Into<String>,
        underlying: IntegerKind,
        members: impl IntoIterator<Item = (N, i128)>,
    ) -> Self
    where
        N: Into<String>,
    {
        let members: Vec<EnumMember> = members
            .into_iter()
            .map(|(name, ordinal)| EnumMember {
                name: name.into(),
                ordinal,
            })
            .collect();
        debug_assert!(
            members.iter().all(|m| underlying.contains(m.ordinal)),
            "enum member ordinal does not fit the underlying {underlying}"
        );

        Self(Arc::new(EnumDescriptor {
            name: name.into(),
            underlying,
            members,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn underlying(&self) -> IntegerKind {
        self.0.underlying
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.0.members
    }

    /// Case-sensitive lookup by declared name
    pub fn member_by_name(&self, name: &str) -> Option<&EnumMember> {
        self.0.members.iter().find(|m| m.name == name)
    }

    /// First declared member carrying `ordinal`
    pub fn member_by_ordinal(&self, ordinal: i128) -> Option<&EnumMember> {
        self.0.members.iter().find(|m| m.ordinal == ordinal)
    }

    pub fn is_declared(&self, ordinal: i128) -> bool {
        self.member_by_ordinal(ordinal).is_some()
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for EnumType {}

impl Hash for EnumType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.underlying.hash(state);
    }
}

// ============================================================================
// Type descriptors
// ============================================================================

/// The declared type of a source value or a requested target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Bool,
    Integer(IntegerKind),
    F32,
    F64,
    Decimal,
    Char,
    String,
    /// Calendar date and time without an offset
    DateTime,
    /// Calendar date and time with a fixed UTC offset
    DateTimeOffset,
    Duration,
    /// Globally unique identifier
    Guid,
    /// Absolute resource locator
    Uri,
    Enum(EnumType),
    /// Wrapper that may hold no value
    Nullable(Box<TypeDescriptor>),
    /// Reference type unknown to the engine, identified by name
    Opaque(Arc<str>),
}

impl TypeDescriptor {
    pub const I8: Self = Self::Integer(IntegerKind::I8);
    pub const I16: Self = Self::Integer(IntegerKind::I16);
    pub const I32: Self = Self::Integer(IntegerKind::I32);
    pub const I64: Self = Self::Integer(IntegerKind::I64);
    pub const U8: Self = Self::Integer(IntegerKind::U8);
    pub const U16: Self = Self::Integer(IntegerKind::U16);
    pub const U32: Self = Self::Integer(IntegerKind::U32);
    pub const U64: Self = Self::Integer(IntegerKind::U64);

    pub fn nullable(inner: Self) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn opaque(name: impl Into<Arc<str>>) -> Self {
        Self::Opaque(name.into())
    }

    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// The wrapped type of a nullable, `None` for everything else
    pub fn nullable_inner(&self) -> Option<&Self> {
        match self {
            Self::Nullable(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<IntegerKind> for TypeDescriptor {
    fn from(kind: IntegerKind) -> Self {
        Self::Integer(kind)
    }
}

impl From<EnumType> for TypeDescriptor {
    fn from(ty: EnumType) -> Self {
        Self::Enum(ty)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Integer(kind) => f.write_str(kind.name()),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::Decimal => f.write_str("decimal"),
            Self::Char => f.write_str("char"),
            Self::String => f.write_str("string"),
            Self::DateTime => f.write_str("datetime"),
            Self::DateTimeOffset => f.write_str("datetime_offset"),
            Self::Duration => f.write_str("duration"),
            Self::Guid => f.write_str("guid"),
            Self::Uri => f.write_str("uri"),
            Self::Enum(ty) => write!(f, "enum {}", ty.name()),
            Self::Nullable(inner) => write!(f, "nullable<{inner}>"),
            Self::Opaque(name) => write!(f, "opaque {name}"),
        }
    }
}
