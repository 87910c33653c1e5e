//! The conversion rule table.
//!
//! Rules are keyed by `(source family, target family)`. The table is built
//! once on first use and never mutated, so lookups need no synchronisation.
//! Nullable wrappers, opaque types and identity are resolved by the
//! dispatcher before the table is consulted; a pair with no entry here is an
//! unsupported pairing.

mod boolean;
mod enums;
mod numeric;
mod temporal;
mod text;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::category::{Category, Family};
use crate::config::ConverterConfig;
use crate::context::ConversionContext;
use crate::error::ConversionResult;
use crate::types::TypeDescriptor;
use crate::value::Value;

/// A conversion function: source value and exact target type in, converted
/// value out.
pub type Rule = fn(&Value, &TypeDescriptor, &RuleContext<'_>) -> ConversionResult<Value>;

/// Everything a rule may consult besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    context: &'a ConversionContext,
    config: &'a ConverterConfig,
}

impl<'a> RuleContext<'a> {
    pub const fn new(context: &'a ConversionContext, config: &'a ConverterConfig) -> Self {
        Self { context, config }
    }

    pub const fn context(&self) -> &'a ConversionContext {
        self.context
    }

    pub const fn config(&self) -> &'a ConverterConfig {
        self.config
    }
}

/// Immutable `(source, target)` to [`Rule`] mapping
pub struct RuleTable {
    rules: HashMap<(Family, Family), Rule>,
}

static TABLE: Lazy<RuleTable> = Lazy::new(RuleTable::build);

impl RuleTable {
    /// The process-wide table
    pub fn global() -> &'static Self {
        &TABLE
    }

    fn build() -> Self {
        let mut table = Self {
            rules: HashMap::with_capacity(64),
        };

        // numeric widening/narrowing, including width changes within a family
        for from in Family::NUMERIC {
            for to in Family::NUMERIC {
                table.insert(from, to, numeric::convert);
            }
        }

        for number in Family::NUMERIC {
            table.insert(Family::Bool, number, numeric::convert);
            table.insert(number, Family::Bool, boolean::from_number);
            table.insert(Family::Char, number, numeric::convert);
            table.insert(number, Family::Char, numeric::convert);
            table.insert(Family::Enum, number, numeric::convert);
            table.insert(number, Family::Enum, enums::from_number);
        }

        table.insert(Family::Enum, Family::Bool, boolean::from_enum);
        table.insert(Family::Bool, Family::Enum, enums::from_number);
        table.insert(Family::Enum, Family::Enum, enums::from_number);

        for family in Family::RENDERABLE {
            table.insert(family, Family::String, text::render);
        }
        table.insert(Family::String, Family::Enum, enums::parse);
        table.insert(Family::String, Family::Identifier, text::parse_guid);
        table.insert(Family::String, Family::Locator, text::parse_uri);

        table.insert(Family::DateTime, Family::DateTimeOffset, temporal::attach_offset);
        table.insert(Family::DateTimeOffset, Family::DateTime, temporal::strip_offset);

        table
    }

    fn insert(&mut self, from: Family, to: Family, rule: Rule) {
        self.rules.insert((from, to), rule);
    }

    /// Rule for a category pair; `None` when the pair is unsupported or
    /// either side is a nullable or opaque category.
    pub fn lookup(&self, source: &Category, target: &Category) -> Option<Rule> {
        let key = (source.family()?, target.family()?);
        self.rules.get(&key).copied()
    }

    pub fn supports(&self, source: &Category, target: &Category) -> bool {
        self.lookup(source, target).is_some()
    }

    /// Number of family pairs with a rule
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every family pair with a rule, sorted
    pub fn pairs(&self) -> Vec<(Family, Family)> {
        let mut pairs: Vec<_> = self.rules.keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTable")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::TemporalKind;
    use crate::types::IntegerKind;

    #[test]
    fn test_numeric_pairs_are_complete() {
        let table = RuleTable::global();
        for from in Family::NUMERIC {
            for to in Family::NUMERIC {
                assert!(table.rules.contains_key(&(from, to)), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_everything_but_string_renders() {
        let table = RuleTable::global();
        for family in Family::RENDERABLE {
            assert!(table.rules.contains_key(&(family, Family::String)));
        }
    }

    #[test]
    fn test_temporal_is_closed_to_numbers() {
        let table = RuleTable::global();
        let source = Category::Temporal(TemporalKind::DateTime);
        assert!(!table.supports(&source, &Category::Integer(IntegerKind::I32)));
        assert!(!table.supports(&source, &Category::Bool));
        assert!(!table.supports(&Category::String, &source));
    }

    #[test]
    fn test_identifier_and_locator_only_meet_string() {
        let table = RuleTable::global();
        let pairs = table.pairs();
        for (from, to) in pairs {
            if matches!(from, Family::Identifier | Family::Locator) {
                assert_eq!(to, Family::String);
            }
            if matches!(to, Family::Identifier | Family::Locator) {
                assert_eq!(from, Family::String);
            }
        }
    }

    #[test]
    fn test_wrappers_never_hit_the_table() {
        let table = RuleTable::global();
        let nullable = Category::Nullable(Box::new(Category::Bool));
        assert!(table.lookup(&nullable, &Category::Bool).is_none());
        assert!(table.lookup(&Category::Bool, &Category::Opaque).is_none());
        assert!(!table.is_empty());
    }
}
