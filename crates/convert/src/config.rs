//! Converter configuration.
//!
//! The two policies here settle the cases the conversion laws leave to the
//! deployment: how non-canonical numbers map to booleans, and whether enum
//! ordinals must name a declared member.

use serde::{Deserialize, Serialize};

/// How numeric sources map onto `bool`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanPolicy {
    /// Only exactly `0` and `1` convert; anything else is ambiguous
    #[default]
    Strict,
    /// Zero is `false`, every other value is `true`
    NonZeroIsTrue,
}

/// Which ordinals a numeric-to-enum conversion accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumOrdinalPolicy {
    /// The ordinal must belong to a declared member
    #[default]
    Declared,
    /// Any ordinal representable in the underlying integer is accepted
    Open,
}

/// Converter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Numeric-to-boolean policy
    pub boolean: BooleanPolicy,

    /// Numeric-to-enum policy
    pub enum_ordinals: EnumOrdinalPolicy,
}

impl ConverterConfig {
    /// Create configuration from environment variables
    ///
    /// Reads `COERCE_BOOLEAN_POLICY` (`strict` | `non_zero_is_true`) and
    /// `COERCE_ENUM_ORDINALS` (`declared` | `open`). Unset or unrecognised
    /// values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`ConverterConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(policy) = lookup("COERCE_BOOLEAN_POLICY") {
            match policy.to_lowercase().as_str() {
                "strict" => config.boolean = BooleanPolicy::Strict,
                "non_zero_is_true" | "nonzero" => config.boolean = BooleanPolicy::NonZeroIsTrue,
                other => tracing::warn!(value = other, "ignoring unknown COERCE_BOOLEAN_POLICY"),
            }
        }

        if let Some(policy) = lookup("COERCE_ENUM_ORDINALS") {
            match policy.to_lowercase().as_str() {
                "declared" => config.enum_ordinals = EnumOrdinalPolicy::Declared,
                "open" => config.enum_ordinals = EnumOrdinalPolicy::Open,
                other => tracing::warn!(value = other, "ignoring unknown COERCE_ENUM_ORDINALS"),
            }
        }

        config
    }

    /// Strict configuration (the default)
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient configuration: C-style truthiness and open enums
    pub fn lenient() -> Self {
        Self {
            boolean: BooleanPolicy::NonZeroIsTrue,
            enum_ordinals: EnumOrdinalPolicy::Open,
        }
    }

    pub fn with_boolean(mut self, policy: BooleanPolicy) -> Self {
        self.boolean = policy;
        self
    }

    pub fn with_enum_ordinals(mut self, policy: EnumOrdinalPolicy) -> Self {
        self.enum_ordinals = policy;
        self
    }
}
