use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builders::validator::Validator;

/// Untyped options handed to the engine, keyed by option name.
///
/// Insertion order is preserved, which is the order patch-mode validation
/// walks the input in.
pub type RawOptions = IndexMap<String, Value>;

/// The error token emitted when a required option has no value.
pub const REQUIRED: &str = "required";

/// The outcome of running one or more validators against a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: Vec::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: vec![message.into()],
        }
    }

    /// Combines two results: validity is AND-ed, errors are appended in order.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.is_valid = self.is_valid && other.is_valid;
        self.error.extend(other.error);
        self
    }

    /// Folds a sequence of results left to right. An empty sequence is valid.
    pub fn fold<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        let mut results = results.into_iter();
        match results.next() {
            Some(first) => results.fold(first, ValidationResult::merge),
            None => Self::valid(),
        }
    }
}

/// Validation requirements for a single option.
#[derive(Debug, Clone, Default)]
pub struct OptionRule {
    pub required: bool,
    pub validators: Vec<Validator>,
}

impl OptionRule {
    pub fn required() -> Self {
        Self {
            required: true,
            validators: Vec::new(),
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    /// Appends a validator. Validators run in the order they were added.
    pub fn with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Runs the required check (if any) followed by every validator.
    ///
    /// `value` is `None` only when the key was missing from the input; a JSON
    /// `null` counts as a supplied value.
    pub fn evaluate(&self, value: Option<&Value>) -> ValidationResult {
        match value {
            None if self.required => ValidationResult::invalid(REQUIRED),
            None => ValidationResult::valid(),
            Some(value) => {
                ValidationResult::fold(self.validators.iter().map(|v| v.check(value)))
            }
        }
    }
}

/// The fixed universe of options an engine accepts, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct OptionRuleSet {
    rules: IndexMap<String, OptionRule>,
}

impl OptionRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rule` under `name`, replacing any earlier rule with that name.
    pub fn rule(mut self, name: impl Into<String>, rule: OptionRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionRule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A serializable summary of every rule, used by the `rules` command.
    pub fn describe(&self) -> Vec<RuleDescription> {
        self.iter()
            .map(|(name, rule)| RuleDescription {
                name: name.to_string(),
                required: rule.required,
                validators: rule.validators.iter().map(Validator::describe).collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescription {
    pub name: String,
    pub required: bool,
    pub validators: Vec<String>,
}

/// The outcome for one option considered during validation.
///
/// An empty `errors` list means the option was accepted, and applied if a
/// value was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionResult {
    pub name: String,
    pub errors: Vec<String>,
}

impl OptionResult {
    pub fn accepted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Which options the validator walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Every rule in the rule set; missing required options are reported.
    #[default]
    Full,
    /// Only options present in the input; absent options are not evaluated.
    Patch,
}

impl ValidationMode {
    pub fn from_patch(patch: bool) -> Self {
        if patch { Self::Patch } else { Self::Full }
    }
}
