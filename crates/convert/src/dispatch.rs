//! The dispatcher: the one path every conversion takes.
//!
//! Resolution order:
//!
//! 1. nullable source: absent values short-circuit to the target's default
//!    (only when the inner pairing is supported), present values recurse
//! 2. opaque on either side fails as an incompatible reference
//! 3. nullable target: convert to the inner type, then wrap
//! 4. identical descriptors return the value unchanged
//! 5. the rule table

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::category::classify;
use crate::config::ConverterConfig;
use crate::context::ConversionContext;
use crate::error::{ConversionError, ConversionResult};
use crate::rules::{RuleContext, RuleTable};
use crate::types::TypeDescriptor;
use crate::value::{NullableValue, Value};

static GLOBAL: Lazy<Converter> = Lazy::new(Converter::default);

/// Conversion entry point bound to one [`ConverterConfig`].
///
/// Converters are cheap to construct and share the process-wide rule table.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    rules: &'static RuleTable,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            rules: RuleTable::global(),
        }
    }

    /// The converter behind the free functions, with the default configuration
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `value` to `target`, failing with a structured error
    pub fn convert_value(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        context: Option<&ConversionContext>,
    ) -> ConversionResult<Value> {
        let context = match context {
            Some(context) => context,
            None => ConversionContext::empty(),
        };
        trace!(from = %value.type_descriptor(), to = %target, "dispatching conversion");

        let rules = RuleContext::new(context, &self.config);
        self.dispatch(value, target, &rules).inspect_err(|err| {
            debug!(
                code = err.code(),
                value_dependent = err.is_value_dependent(),
                error = %err,
                "conversion failed"
            );
        })
    }

    /// Convert `value` to `target`, reporting failure through the flag.
    ///
    /// On failure the value is the target's zero-equivalent.
    pub fn try_convert_value(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        context: Option<&ConversionContext>,
    ) -> (bool, Value) {
        match self.convert_value(value, target, context) {
            Ok(converted) => (true, converted),
            Err(_) => (false, Value::default_for(target)),
        }
    }

    /// Whether some value of `source` could convert to `target`.
    ///
    /// Value-independent: a supported pairing may still fail for a
    /// particular value (out of range, malformed text).
    pub fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        let source_category = classify(source);
        let target_category = classify(target);
        if source_category.is_opaque() || target_category.is_opaque() {
            return false;
        }

        match (source, target) {
            (TypeDescriptor::Nullable(inner), _) => self.can_convert(inner, target),
            (_, TypeDescriptor::Nullable(inner)) => self.can_convert(source, inner),
            _ => source == target || self.rules.supports(&source_category, &target_category),
        }
    }

    fn dispatch(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        rules: &RuleContext<'_>,
    ) -> ConversionResult<Value> {
        let source = value.type_descriptor();
        let source_category = classify(&source);
        let target_category = classify(target);

        if source_category.is_nullable()
            && let Value::Nullable(nullable) = value
        {
            return match nullable.value() {
                Some(inner) => self.dispatch(inner, target, rules),
                None if self.can_convert(nullable.inner(), target) => Ok(Value::default_for(target)),
                None => Err(ConversionError::unsupported(&source, target)),
            };
        }

        if source_category.is_opaque() || target_category.is_opaque() {
            return Err(ConversionError::incompatible(&source, target));
        }

        if target_category.is_nullable()
            && let Some(inner) = target.nullable_inner()
        {
            let converted = self.dispatch(value, inner, rules)?;
            return Ok(Value::Nullable(NullableValue::present(converted)));
        }

        if source == *target {
            return Ok(value.clone());
        }

        let rule = self
            .rules
            .lookup(&source_category, &target_category)
            .ok_or_else(|| ConversionError::unsupported(&source, target))?;
        rule(value, target, rules)
    }
}
