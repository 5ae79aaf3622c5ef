use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::option::{OptionResult, OptionRuleSet, RawOptions, ValidationMode};
use crate::utils::setter_name;

/// The setter surface a configuration model exposes to the engine.
///
/// Implementors map an option name onto the matching setter (`outDir` goes to
/// `set_out_dir`, conventionally `setOutDir`). The engine never reads the
/// model back through this trait.
pub trait ConfigModel {
    /// Hands `value` to the setter registered for `option`.
    fn set_option(&mut self, option: &str, value: &Value) -> SetterOutcome;
}

/// A model type that can also produce its own rule set and starting state.
pub trait OptionSchema: ConfigModel + Sized {
    fn option_rules() -> OptionRuleSet;
    fn initial() -> Self;
}

/// What a model did with a value handed to `ConfigModel::set_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SetterOutcome {
    Applied,
    /// The model has no setter for this option. The value is dropped.
    SetterAbsent,
    /// The setter exists but takes a different JSON type.
    Incompatible { expected: &'static str },
}

/// Per-option record of the apply stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyOutcome {
    Applied,
    SetterAbsent,
    Incompatible { expected: &'static str },
    /// Accepted, but no value was supplied, so there was nothing to set.
    NotSupplied,
    /// Validation reported errors; the setter was not called.
    Skipped,
}

impl From<SetterOutcome> for ApplyOutcome {
    fn from(outcome: SetterOutcome) -> Self {
        match outcome {
            SetterOutcome::Applied => ApplyOutcome::Applied,
            SetterOutcome::SetterAbsent => ApplyOutcome::SetterAbsent,
            SetterOutcome::Incompatible { expected } => ApplyOutcome::Incompatible { expected },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedOption {
    pub name: String,
    pub outcome: ApplyOutcome,
}

/// Input after unknown keys were removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedOptions {
    pub options: RawOptions,
    /// Keys that had no rule, in input order.
    pub dropped: Vec<String>,
}

/// Everything `OptionEngine::set_options_report` learned during one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetOptionsReport {
    pub results: Vec<OptionResult>,
    pub dropped: Vec<String>,
    pub applied: Vec<AppliedOption>,
}

impl SetOptionsReport {
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| !r.is_ok())
    }

    pub fn outcome(&self, name: &str) -> Option<ApplyOutcome> {
        self.applied
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.outcome)
    }
}

/// Removes every key from `input` that has no rule.
pub fn clean_options(rules: &OptionRuleSet, input: &RawOptions) -> CleanedOptions {
    let mut cleaned = CleanedOptions::default();
    for (name, value) in input {
        if rules.contains(name) {
            cleaned.options.insert(name.clone(), value.clone());
        } else {
            cleaned.dropped.push(name.clone());
        }
    }
    if !cleaned.dropped.is_empty() {
        debug!(dropped = ?cleaned.dropped, "ignoring unknown options");
    }
    cleaned
}

/// Evaluates the cleaned input against the rule set.
///
/// Full mode yields one result per rule in declaration order. Patch mode
/// yields one result per input key in input order; keys without a rule are
/// skipped.
pub fn validate_options(
    rules: &OptionRuleSet,
    cleaned: &RawOptions,
    mode: ValidationMode,
) -> Vec<OptionResult> {
    let names: Vec<&str> = match mode {
        ValidationMode::Full => rules.names().collect(),
        ValidationMode::Patch => cleaned.keys().map(String::as_str).collect(),
    };

    names
        .into_iter()
        .filter_map(|name| {
            let rule = rules.get(name)?;
            let value = cleaned.get(name);
            let validation = rule.evaluate(value);
            trace!(
                option = name,
                valid = validation.is_valid,
                errors = ?validation.error,
                "evaluated option"
            );
            Some(OptionResult {
                name: name.to_string(),
                errors: validation.error,
            })
        })
        .collect()
}

/// Hands every accepted, supplied value to the model's setter.
pub fn apply_options<M>(
    model: &mut M,
    results: &[OptionResult],
    cleaned: &RawOptions,
) -> Vec<AppliedOption>
where
    M: ConfigModel + ?Sized,
{
    results
        .iter()
        .map(|result| {
            let outcome = if !result.is_ok() {
                ApplyOutcome::Skipped
            } else {
                match cleaned.get(&result.name) {
                    Some(value) => model.set_option(&result.name, value).into(),
                    None => ApplyOutcome::NotSupplied,
                }
            };
            match outcome {
                ApplyOutcome::SetterAbsent => debug!(
                    option = %result.name,
                    setter = %setter_name(&result.name),
                    "configuration model has no setter, value not applied"
                ),
                ApplyOutcome::Incompatible { expected } => debug!(
                    option = %result.name,
                    expected,
                    "setter rejected value type, value not applied"
                ),
                _ => trace!(option = %result.name, ?outcome, "apply"),
            }
            AppliedOption {
                name: result.name.clone(),
                outcome,
            }
        })
        .collect()
}

/// Validates untyped options against a fixed rule set and writes the accepted
/// ones onto a configuration model.
///
/// The rule set and model are fixed at construction. Each call to
/// [`set_options`](Self::set_options) runs clean, validate and apply in that
/// order and returns one [`OptionResult`] per evaluated option.
#[derive(Debug)]
pub struct OptionEngine<M> {
    rules: OptionRuleSet,
    model: M,
}

impl<M: ConfigModel> OptionEngine<M> {
    pub fn new(rules: OptionRuleSet, model: M) -> Self {
        Self { rules, model }
    }

    pub fn rules(&self) -> &OptionRuleSet {
        &self.rules
    }

    pub fn config(&self) -> &M {
        &self.model
    }

    /// Direct access for fields the owning builder sets itself.
    pub fn config_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_config(self) -> M {
        self.model
    }

    pub fn set_options(&mut self, input: &RawOptions, mode: ValidationMode) -> Vec<OptionResult> {
        self.set_options_report(input, mode).results
    }

    pub fn set_options_report(
        &mut self,
        input: &RawOptions,
        mode: ValidationMode,
    ) -> SetOptionsReport {
        let cleaned = clean_options(&self.rules, input);
        let results = validate_options(&self.rules, &cleaned.options, mode);
        let applied = apply_options(&mut self.model, &results, &cleaned.options);

        debug!(
            ?mode,
            evaluated = results.len(),
            failed = results.iter().filter(|r| !r.is_ok()).count(),
            "options processed"
        );

        SetOptionsReport {
            results,
            dropped: cleaned.dropped,
            applied,
        }
    }
}

impl<M: OptionSchema> OptionEngine<M> {
    pub fn from_schema() -> Self {
        Self::new(M::option_rules(), M::initial())
    }
}
