//! Schema validation of decoded response bodies.
//!
//! A [`Schema`] turns a decoded JSON value into a typed value or a list of
//! [`Issue`]s. [`JsonSchema`] is the stock implementation: serde checks the
//! structure (required fields, types, enum variants), then `validator` rules
//! declared on the target type check field contents.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Dotted path to the offending field (`payload.items[0].name`);
    /// empty for problems reported against the whole document.
    pub path: String,
    /// Description of the failure.
    pub message: String,
}

impl Issue {
    /// Creates an issue at the given path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validator for an expected response shape.
pub trait Schema {
    /// Typed value produced on success.
    type Output;

    /// Validates `raw` and converts it into [`Self::Output`].
    ///
    /// # Errors
    ///
    /// Returns every issue found; the list is never empty.
    fn validate(&self, raw: &Value) -> Result<Self::Output, Vec<Issue>>;
}

/// Schema backed by a serde + `validator` type.
pub struct JsonSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSchema<T> {
    /// Creates the schema for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonSchema<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonSchema<T> {}

impl<T> fmt::Debug for JsonSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonSchema<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned + Validate> Schema for JsonSchema<T> {
    type Output = T;

    fn validate(&self, raw: &Value) -> Result<T, Vec<Issue>> {
        let value = T::deserialize(raw).map_err(|e| vec![Issue::new("", e.to_string())])?;

        value.validate().map_err(|errors| {
            let mut issues = Vec::new();
            collect_issues("", &errors, &mut issues);
            issues.sort_by(|a, b| a.path.cmp(&b.path));
            issues
        })?;

        Ok(value)
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Flattens nested `validator` errors into path-addressed issues.
fn collect_issues(prefix: &str, errors: &ValidationErrors, out: &mut Vec<Issue>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &field.to_string());
        match kind {
            ValidationErrorsKind::Field(failures) => {
                out.extend(failures.iter().map(|failure| {
                    let message = failure.message.as_ref().map_or_else(
                        || format!("failed `{}` rule", failure.code),
                        ToString::to_string,
                    );
                    Issue::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_issues(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_issues(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
