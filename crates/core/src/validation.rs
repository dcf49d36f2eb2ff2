//! Conversion of `validator` failures into [`FieldErrors`].
//!
//! Request DTOs derive [`validator::Validate`]; when validation fails the
//! resulting [`validator::ValidationErrors`] is flattened into the
//! field-to-messages map carried by failed API responses.

use validator::{ValidationError, ValidationErrors};

use crate::types::FieldErrors;

/// Flatten field-level validation failures into a [`FieldErrors`] map.
///
/// Each violation contributes its custom message when one was declared on
/// the validator attribute, otherwise its validator code (e.g. `"email"`,
/// `"length"`). Nested struct and list errors are not included.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, violations)| {
            let messages = violations.iter().map(violation_message).collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn violation_message(violation: &ValidationError) -> String {
    match &violation.message {
        Some(message) => message.to_string(),
        None => violation.code.to_string(),
    }
}
