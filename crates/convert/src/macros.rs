//! Declaration macro for convertible Rust enums.
//!
//! # Examples
//!
//! ```rust
//! use coerce_convert::{convert, convertible_enum};
//!
//! convertible_enum! {
//!     /// The three primaries
//!     pub enum PrimaryColor: u8 {
//!         Red = 0,
//!         Yellow = 1,
//!         Blue = 2,
//!     }
//! }
//!
//! let blue: PrimaryColor = convert("Blue").unwrap();
//! assert_eq!(blue, PrimaryColor::Blue);
//! assert_eq!(convert::<i32>(PrimaryColor::Yellow).unwrap(), 1);
//! ```

// ============================================================================
// CONVERTIBLE ENUM MACRO
// ============================================================================

/// Declares a fieldless enum with an explicit integer representation and
/// wires it into the engine.
///
/// Generates the enum itself (`#[repr(..)]`, plus
/// `Debug, Clone, Copy, PartialEq, Eq, Hash`), a lazily built
/// [`EnumType`](crate::EnumType) named after the enum, and implementations of
/// [`ConvertibleEnum`](crate::ConvertibleEnum),
/// [`Convertible`](crate::Convertible), [`ValueType`](crate::ValueType) and
/// `From<Enum> for Value`.
///
/// Every variant needs an explicit discriminant. The zero value used by the
/// non-throwing API is the member with ordinal `0`, or the first member when
/// no member has it.
#[macro_export]
macro_rules! convertible_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $ordinal:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $ordinal,
            )+
        }

        impl $crate::ConvertibleEnum for $name {
            const MEMBERS: &'static [Self] = &[$(Self::$variant),+];

            fn enum_type() -> &'static $crate::EnumType {
                static ENUM_TYPE: $crate::__private::Lazy<$crate::EnumType> =
                    $crate::__private::Lazy::new(|| {
                        $crate::EnumType::new(
                            stringify!($name),
                            <$repr as $crate::IntegerRepr>::KIND,
                            [$((stringify!($variant), $name::$variant as $repr as i128)),+],
                        )
                    });
                &ENUM_TYPE
            }

            fn ordinal(self) -> i128 {
                self as $repr as i128
            }
        }

        impl $crate::Convertible for $name {
            fn type_descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Enum(
                    <Self as $crate::ConvertibleEnum>::enum_type().clone(),
                )
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Enum($crate::EnumValue::new(
                    <Self as $crate::ConvertibleEnum>::enum_type().clone(),
                    <Self as $crate::ConvertibleEnum>::ordinal(self),
                ))
            }

            fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::Value> {
                $crate::typed::enum_from_value(value)
            }

            fn zero() -> Self {
                match <Self as $crate::ConvertibleEnum>::from_ordinal(0) {
                    ::core::option::Option::Some(member) => member,
                    ::core::option::Option::None => {
                        <Self as $crate::ConvertibleEnum>::MEMBERS[0]
                    }
                }
            }
        }

        impl $crate::ValueType for $name {}

        impl ::core::convert::From<$name> for $crate::Value {
            fn from(v: $name) -> Self {
                <$name as $crate::Convertible>::into_value(v)
            }
        }
    };
}
