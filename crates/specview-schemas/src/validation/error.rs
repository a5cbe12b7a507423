//! Structural validation error types
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One broken rule at one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that was broken (a JSON Schema keyword or a named document rule)
    pub rule: String,
    /// What the rule expects
    pub expected: String,
    /// What the document contains
    pub actual: String,
}

impl Violation {
    pub fn new(rule: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] expected {}, found {}", self.rule, self.expected, self.actual)
    }
}

/// A structural problem located by JSON pointer
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON pointer to the offending value (empty for the document root)
    pub path: String,
    /// Human-readable summary
    pub message: String,
    /// Rules broken at this location
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", location, self.message)?;
        for violation in &self.schema_violations {
            write!(f, "\n    {}", violation)?;
        }
        Ok(())
    }
}

impl ValidationError {
    /// Create a validation error without violation details
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            schema_violations: Vec::new(),
        }
    }

    /// Attach a violation
    pub fn with_violation(mut self, violation: Violation) -> Self {
        self.schema_violations.push(violation);
        self
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Every problem found in one document
#[derive(Debug, Clone, Default, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "problem" } else { "problems" };
        write!(f, "{} structural {}:", self.errors.len(), noun)?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// `Ok` when nothing was collected
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_lists_violations() {
        let error = ValidationError::new("/paths/~1pets/get", "operation is missing 'tags'")
            .with_violation(Violation::new("required", "property 'tags'", "no such property"));
        let errors = ValidationErrors::from(error);

        assert_eq!(
            errors.to_string(),
            "1 structural problem:\n  - /paths/~1pets/get: operation is missing 'tags'\n    [required] expected property 'tags', found no such property"
        );
    }

    #[test]
    fn test_root_path_display() {
        let error = ValidationError::new("", "document must be an object");
        assert_eq!(error.to_string(), "/: document must be an object");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("/info", "missing title"));
        errors.add(ValidationError::new("/paths", "not an object"));
        assert_eq!(errors.len(), 2);
        assert!(errors.to_string().starts_with("2 structural problems:"));
        assert!(errors.into_result().is_err());
    }
}
