//! Rule-chain orchestration
//!
//! `verify` semantics:
//! - Empty rule list: register the value under its category, no checks
//! - Rules run left to right; the first failure aborts the call
//! - Schema-aware rules stage results; staged results reach `Fields`
//!   only when every rule passed
//! - The schema provider is queried on every call

use serde_json::Value;

use super::config::ValidatorConfig;
use super::errors::{ValidationError, ValidationResult};
use super::fields::{Fields, FieldsDelta, TABLES_KEY};
use super::reconcile::{self, RuleContext};
use super::rules::{self, Rule};
use crate::catalog::{ColumnType, SchemaProvider};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Validates search input against configuration and a schema provider.
///
/// Holds no per-call state: results go to the `Fields` the caller passes in,
/// so one validator can serve any number of sessions.
pub struct Validator<'a, P: SchemaProvider + ?Sized> {
    config: ValidatorConfig,
    provider: &'a P,
    metrics: MetricsRegistry,
}

impl<'a, P: SchemaProvider + ?Sized> Validator<'a, P> {
    /// Creates a validator with default configuration.
    pub fn new(provider: &'a P) -> Self {
        Self::with_config(provider, ValidatorConfig::default())
    }

    /// Creates a validator with the given configuration.
    pub fn with_config(provider: &'a P, config: ValidatorConfig) -> Self {
        Self {
            config,
            provider,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn set_min_length(&mut self, min_length: usize) -> ValidationResult<&mut Self> {
        self.config.set_min_length(min_length)?;
        Ok(self)
    }

    pub fn set_max_length(&mut self, max_length: usize) -> ValidationResult<&mut Self> {
        self.config.set_max_length(max_length)?;
        Ok(self)
    }

    pub fn set_length_bounds(&mut self, min_length: usize, max_length: usize) -> ValidationResult<&mut Self> {
        self.config.set_length_bounds(min_length, max_length)?;
        Ok(self)
    }

    pub fn set_allowed_column_types(
        &mut self,
        types: impl IntoIterator<Item = ColumnType>,
    ) -> ValidationResult<&mut Self> {
        self.config.set_allowed_column_types(types)?;
        Ok(self)
    }

    pub fn set_allowed_sort_tokens(
        &mut self,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> ValidationResult<&mut Self> {
        self.config.set_allowed_sort_tokens(tokens)?;
        Ok(self)
    }

    /// Runs `rules` against `data` under `category`.
    ///
    /// Returns `Ok(true)` when every rule passed and the staged results were
    /// merged into `fields`. On error `fields` is left untouched.
    ///
    /// # Errors
    ///
    /// The first violated rule's error, or `InvalidConfig` if `category` is
    /// the reserved `tables` key.
    pub fn verify(
        &self,
        data: &Value,
        rules: &[Rule],
        category: &str,
        fields: &mut Fields,
    ) -> ValidationResult<bool> {
        match self.run(data, rules, category) {
            Ok(delta) => {
                fields.apply(delta);
                self.record_success(rules, category);
                Ok(true)
            }
            Err(e) => {
                self.metrics.increment_verifications_rejected();
                Err(e)
            }
        }
    }

    /// Resolves rule names, then behaves like `verify`.
    ///
    /// An unknown name fails with `UnknownRule` before any rule runs.
    pub fn verify_named<S: AsRef<str>>(
        &self,
        data: &Value,
        names: &[S],
        category: &str,
        fields: &mut Fields,
    ) -> ValidationResult<bool> {
        let rules = match Rule::parse_list(names) {
            Ok(rules) => rules,
            Err(e) => {
                self.metrics.increment_verifications_rejected();
                return Err(e);
            }
        };
        self.verify(data, &rules, category, fields)
    }

    fn run(&self, data: &Value, rules: &[Rule], category: &str) -> ValidationResult<FieldsDelta> {
        if category == TABLES_KEY {
            return Err(ValidationError::invalid_config(format!(
                "category '{}' is reserved",
                TABLES_KEY
            )));
        }

        let mut delta = FieldsDelta::new();

        if rules.is_empty() {
            delta.record_category(category, data.clone());
            return Ok(delta);
        }

        let ctx = RuleContext {
            config: &self.config,
            provider: self.provider,
            metrics: &self.metrics,
            category,
        };

        for rule in rules {
            self.apply_rule(*rule, data, &ctx, &mut delta)?;
        }

        Ok(delta)
    }

    fn apply_rule(
        &self,
        rule: Rule,
        data: &Value,
        ctx: &RuleContext<'_, P>,
        delta: &mut FieldsDelta,
    ) -> ValidationResult<()> {
        match rule {
            Rule::NotNull => rules::not_null(data),
            Rule::IsArray => rules::is_array(data),
            Rule::NotEmpty => rules::not_empty(data),
            Rule::NotFew => rules::not_few(data, &self.config),
            Rule::NotMuch => rules::not_much(data, &self.config),
            Rule::Exists => reconcile::exists(data, ctx, delta),
            Rule::Ordered => reconcile::ordered(data, ctx, delta),
        }
    }

    fn record_success(&self, rules: &[Rule], category: &str) {
        if rules.is_empty() {
            self.metrics.increment_pass_through();
            log_event_with_fields(Event::PassThroughRegistered, &[("category", category)]);
            return;
        }

        self.metrics.increment_verifications_passed();
        let names = rules.iter().map(Rule::name).collect::<Vec<_>>().join(",");
        log_event_with_fields(
            Event::VerifyComplete,
            &[("category", category), ("rules", names.as_str())],
        );
    }
}

/// A validator paired with the results it has accumulated.
///
/// Owned by exactly one validation session; `verify` takes `&mut self`, so
/// sharing across threads requires the caller's own lock.
pub struct ValidationSession<'a, P: SchemaProvider + ?Sized> {
    validator: Validator<'a, P>,
    fields: Fields,
}

impl<'a, P: SchemaProvider + ?Sized> ValidationSession<'a, P> {
    pub fn new(validator: Validator<'a, P>) -> Self {
        Self {
            validator,
            fields: Fields::new(),
        }
    }

    pub fn verify(&mut self, data: &Value, rules: &[Rule], category: &str) -> ValidationResult<bool> {
        self.validator.verify(data, rules, category, &mut self.fields)
    }

    pub fn verify_named<S: AsRef<str>>(
        &mut self,
        data: &Value,
        names: &[S],
        category: &str,
    ) -> ValidationResult<bool> {
        self.validator.verify_named(data, names, category, &mut self.fields)
    }

    pub fn validator(&self) -> &Validator<'a, P> {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut Validator<'a, P> {
        &mut self.validator
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}
