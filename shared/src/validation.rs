//! Input validation helpers
//!
//! Field rules live on the request types as `validator` derives; this module
//! turns the resulting `ValidationErrors` into a single reportable message.

use validator::ValidationErrors;

/// A single failed field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Pick the first failure, ordered by field name so the result is stable
pub fn first_error(errors: &ValidationErrors) -> Option<FieldError> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    let field = fields.into_iter().next()?;
    let error = field_errors.get(field)?.first()?;
    let message = error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{} is invalid", field));

    Some(FieldError {
        field: field.to_string(),
        message,
    })
}

/// Join every failure into one line, e.g. `"title: title is required; url: url is required"`
pub fn summarize(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
