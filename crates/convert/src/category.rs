//! Type classification.
//!
//! [`classify`] maps any [`TypeDescriptor`] onto the small closed set of
//! [`Category`] values the rule table is keyed by. It is total: anything the
//! engine has no rule family for is [`Category::Opaque`].
//!
//! ```rust
//! use coerce_convert::category::{classify, Category, Family};
//! use coerce_convert::TypeDescriptor;
//!
//! let category = classify(&TypeDescriptor::nullable(TypeDescriptor::F64));
//! assert_eq!(category, Category::Nullable(Box::new(Category::Float64)));
//! assert_eq!(classify(&TypeDescriptor::I16).family(), Some(Family::Integer));
//! ```

use core::fmt::{Display, Formatter};

use crate::types::{IntegerKind, TypeDescriptor};

/// Temporal sub-kinds
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TemporalKind {
    DateTime,
    DateTimeWithOffset,
    Duration,
}

/// Classification of a declared type
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    Bool,
    Integer(IntegerKind),
    Float32,
    Float64,
    DecimalFixed,
    Char,
    String,
    Temporal(TemporalKind),
    Identifier,
    Locator,
    Enum,
    /// Exactly one level of nullable wrapping
    Nullable(Box<Category>),
    Opaque,
}

/// Rule-table key: a category with widths and nullability erased.
///
/// Integer widths share one family because the numeric rules read the exact
/// target width from the target descriptor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Family {
    Bool,
    Integer,
    Float,
    Decimal,
    Char,
    String,
    DateTime,
    DateTimeOffset,
    Duration,
    Identifier,
    Locator,
    Enum,
}

impl Family {
    /// Families the numeric widening/narrowing law applies between
    pub const NUMERIC: [Self; 3] = [Self::Integer, Self::Float, Self::Decimal];

    /// Families whose values render to text
    pub const RENDERABLE: [Self; 11] = [
        Self::Bool,
        Self::Integer,
        Self::Float,
        Self::Decimal,
        Self::Char,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::Duration,
        Self::Identifier,
        Self::Locator,
        Self::Enum,
    ];

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::DateTime | Self::DateTimeOffset | Self::Duration)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::DateTimeOffset => "datetime_offset",
            Self::Duration => "duration",
            Self::Identifier => "identifier",
            Self::Locator => "locator",
            Self::Enum => "enum",
        }
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl Category {
    /// Rule-table family; `None` for nullable wrappers and opaque types,
    /// which the dispatcher resolves before any table lookup.
    pub const fn family(&self) -> Option<Family> {
        Some(match self {
            Self::Bool => Family::Bool,
            Self::Integer(_) => Family::Integer,
            Self::Float32 | Self::Float64 => Family::Float,
            Self::DecimalFixed => Family::Decimal,
            Self::Char => Family::Char,
            Self::String => Family::String,
            Self::Temporal(TemporalKind::DateTime) => Family::DateTime,
            Self::Temporal(TemporalKind::DateTimeWithOffset) => Family::DateTimeOffset,
            Self::Temporal(TemporalKind::Duration) => Family::Duration,
            Self::Identifier => Family::Identifier,
            Self::Locator => Family::Locator,
            Self::Enum => Family::Enum,
            Self::Nullable(_) | Self::Opaque => return None,
        })
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer(_) | Self::Float32 | Self::Float64 | Self::DecimalFixed
        )
    }

    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    pub const fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque)
    }
}

/// Classify a declared type.
///
/// Nullable wrappers classify one level deep; a nullable of a nullable, or
/// of an opaque type, is not a legal shape and classifies as opaque.
pub fn classify(ty: &TypeDescriptor) -> Category {
    match ty {
        TypeDescriptor::Nullable(inner) => match classify_plain(inner) {
            Category::Opaque => Category::Opaque,
            category => Category::Nullable(Box::new(category)),
        },
        other => classify_plain(other),
    }
}

fn classify_plain(ty: &TypeDescriptor) -> Category {
    match ty {
        TypeDescriptor::Bool => Category::Bool,
        TypeDescriptor::Integer(kind) => Category::Integer(*kind),
        TypeDescriptor::F32 => Category::Float32,
        TypeDescriptor::F64 => Category::Float64,
        TypeDescriptor::Decimal => Category::DecimalFixed,
        TypeDescriptor::Char => Category::Char,
        TypeDescriptor::String => Category::String,
        TypeDescriptor::DateTime => Category::Temporal(TemporalKind::DateTime),
        TypeDescriptor::DateTimeOffset => Category::Temporal(TemporalKind::DateTimeWithOffset),
        TypeDescriptor::Duration => Category::Temporal(TemporalKind::Duration),
        TypeDescriptor::Guid => Category::Identifier,
        TypeDescriptor::Uri => Category::Locator,
        TypeDescriptor::Enum(_) => Category::Enum,
        TypeDescriptor::Nullable(_) | TypeDescriptor::Opaque(_) => Category::Opaque,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnumType;

    #[test]
    fn test_classify_scalars() {
        assert_eq!(
            classify(&TypeDescriptor::U32),
            Category::Integer(IntegerKind::U32)
        );
        assert_eq!(classify(&TypeDescriptor::Guid), Category::Identifier);
        assert_eq!(
            classify(&TypeDescriptor::DateTimeOffset),
            Category::Temporal(TemporalKind::DateTimeWithOffset)
        );
    }

    #[test]
    fn test_enum_classifies_regardless_of_width() {
        let narrow = EnumType::new("Narrow", IntegerKind::U8, [("A", 0)]);
        let wide = EnumType::new("Wide", IntegerKind::I64, [("A", 0)]);
        assert_eq!(classify(&narrow.into()), Category::Enum);
        assert_eq!(classify(&wide.into()), Category::Enum);
    }

    #[test]
    fn test_nested_nullable_is_opaque() {
        let nested = TypeDescriptor::nullable(TypeDescriptor::nullable(TypeDescriptor::I32));
        assert_eq!(classify(&nested), Category::Opaque);
        let of_opaque = TypeDescriptor::nullable(TypeDescriptor::opaque("IDisposable"));
        assert_eq!(classify(&of_opaque), Category::Opaque);
    }

    #[test]
    fn test_family() {
        assert_eq!(Category::Float32.family(), Some(Family::Float));
        assert_eq!(Category::Opaque.family(), None);
        assert_eq!(
            Category::Nullable(Box::new(Category::Bool)).family(),
            None
        );
        assert!(Family::Decimal.is_numeric());
        assert!(!Family::Char.is_numeric());
    }
}
