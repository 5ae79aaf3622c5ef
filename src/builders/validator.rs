use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::core::option::ValidationResult;

/// Signature of a user-supplied validator. Validators must be pure: they only
/// inspect the value and report.
pub type CheckFn = dyn Fn(&Value) -> ValidationResult + Send + Sync;

/// A single check run against an option value.
///
/// The built-in variants cover the shapes option files usually need; anything
/// else goes through `Custom`. Several validators attached to one rule run in
/// declaration order and their results are folded together.
#[derive(Clone)]
pub enum Validator {
    /// Rejects `null`, empty strings, empty arrays and empty objects.
    NotEmpty,
    /// Requires a JSON string.
    IsString,
    /// Requires a JSON boolean.
    IsBool,
    /// Requires a string equal to one of the listed values.
    OneOf(Vec<String>),
    /// Requires a string matching the regular expression.
    Matches(Regex),
    Custom { name: String, check: Arc<CheckFn> },
}

impl Validator {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn matches(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Validator::Matches(Regex::new(pattern)?))
    }

    /// Wraps a closure as a named validator.
    ///
    /// # Example
    /// ```
    /// use option_engine::builders::validator::Validator;
    /// use option_engine::core::option::ValidationResult;
    ///
    /// let no_spaces = Validator::custom("no-spaces", |value| match value.as_str() {
    ///     Some(s) if s.contains(' ') => ValidationResult::invalid("must not contain spaces"),
    ///     _ => ValidationResult::valid(),
    /// });
    /// assert!(!no_spaces.check(&"a b".into()).is_valid);
    /// ```
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
    {
        Validator::Custom {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn check(&self, value: &Value) -> ValidationResult {
        match self {
            Validator::NotEmpty => {
                let empty = match value {
                    Value::Null => true,
                    Value::String(s) => s.is_empty(),
                    Value::Array(items) => items.is_empty(),
                    Value::Object(map) => map.is_empty(),
                    Value::Bool(_) | Value::Number(_) => false,
                };
                if empty {
                    ValidationResult::invalid("value must not be empty")
                } else {
                    ValidationResult::valid()
                }
            }
            Validator::IsString => match expect_string(value) {
                Ok(_) => ValidationResult::valid(),
                Err(result) => result,
            },
            Validator::IsBool => {
                if value.is_boolean() {
                    ValidationResult::valid()
                } else {
                    ValidationResult::invalid(format!("expected a boolean, found {}", kind(value)))
                }
            }
            Validator::OneOf(allowed) => match expect_string(value) {
                Ok(s) if allowed.iter().any(|a| a == s) => ValidationResult::valid(),
                Ok(s) => ValidationResult::invalid(format!(
                    "expected one of [{}], found \"{s}\"",
                    allowed.join(", ")
                )),
                Err(result) => result,
            },
            Validator::Matches(regex) => match expect_string(value) {
                Ok(s) if regex.is_match(s) => ValidationResult::valid(),
                Ok(s) => ValidationResult::invalid(format!(
                    "\"{s}\" does not match /{}/",
                    regex.as_str()
                )),
                Err(result) => result,
            },
            Validator::Custom { check, .. } => check(value),
        }
    }

    /// Short human-readable name, as shown by the `rules` command.
    pub fn describe(&self) -> String {
        match self {
            Validator::NotEmpty => "not-empty".to_string(),
            Validator::IsString => "string".to_string(),
            Validator::IsBool => "boolean".to_string(),
            Validator::OneOf(allowed) => format!("one-of({})", allowed.join("|")),
            Validator::Matches(regex) => format!("matches(/{}/)", regex.as_str()),
            Validator::Custom { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.describe())
    }
}

fn expect_string(value: &Value) -> Result<&str, ValidationResult> {
    value
        .as_str()
        .ok_or_else(|| {
            ValidationResult::invalid(format!("expected a string, found {}", kind(value)))
        })
}

/// The JSON type name of a value, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
