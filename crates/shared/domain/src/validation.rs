//! Field validation with ordered, human-readable messages.
//!
//! `validator` decides which rules fail; the message table on each input type
//! decides how the failures read and in which order they are reported.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::{MESSAGE_SEPARATOR, RULE_REQUIRED};
use crate::error::{DomainError, DomainResult};

/// One field rule and the message reported when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
}

impl Rule {
    pub const fn new(field: &'static str, code: &'static str, message: &'static str) -> Self {
        Self {
            field,
            code,
            message,
        }
    }
}

/// Message table for a validated input, in field-then-rule declaration order.
pub trait ValidationMessages {
    const RULES: &'static [Rule];
}

/// Rejects empty and whitespace-only strings with the `required` code.
pub fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(RULE_REQUIRED));
    }
    Ok(())
}

/// Render validation failures as one string.
///
/// Only the first failing rule of each field is reported.
pub fn describe<T: ValidationMessages>(errors: &ValidationErrors) -> String {
    let failed: Vec<(String, Vec<ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs.clone()))
        .collect();

    let mut messages: Vec<&'static str> = Vec::new();
    let mut reported: Vec<&'static str> = Vec::new();

    for rule in T::RULES {
        if reported.contains(&rule.field) {
            continue;
        }
        let hit = failed
            .iter()
            .filter(|(field, _)| field == rule.field)
            .flat_map(|(_, errs)| errs.iter())
            .any(|e| e.code == rule.code);
        if hit {
            messages.push(rule.message);
            reported.push(rule.field);
        }
    }

    messages.join(MESSAGE_SEPARATOR)
}

/// Validate `input`, joining every field's message into a single error.
pub fn validate<T: Validate + ValidationMessages>(input: &T) -> DomainResult<()> {
    input
        .validate()
        .map_err(|errors| DomainError::validation(describe::<T>(&errors)))
}
