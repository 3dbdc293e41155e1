//! Shaping of `validator` failures for API responses.
//!
//! DTOs derive [`validator::Validate`]; these helpers turn the resulting
//! [`ValidationErrors`] into a field map keyed by the camelCase wire name,
//! or into a single summary line for [`CoreError::Validation`].

use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Field name (camelCase) to list of human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Collect per-field messages from a validation failure.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs.iter().map(describe).collect();
            (camel_case(field), messages)
        })
        .collect()
}

/// Render a validation failure as one line, e.g.
/// `howTo: must not be empty; platform: must not be empty`.
pub fn summarize(errors: &ValidationErrors) -> String {
    field_errors(errors)
        .into_iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run `validate()` on `input`, mapping failures to [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(summarize(&errors)))
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("failed '{}' check", error.code),
    }
}

/// `command_line` -> `commandLine`.
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
