use crate::error::{PickListError, PickListResult};
use picklist_models::Fixture;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

pub fn validate_model<T: Validate>(model: &T) -> PickListResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(PickListError::validation("request", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages("", errors, &mut messages);
    messages.join(", ")
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = match &error.message {
                        Some(message) => message.to_string(),
                        None => match &error.code {
                            std::borrow::Cow::Borrowed("length") => {
                                format!("Length validation failed for field '{}'", path)
                            }
                            std::borrow::Cow::Borrowed("range") => {
                                format!("Value out of range for field '{}'", path)
                            }
                            _ => format!("Validation failed for field '{}': {}", path, error.code),
                        },
                    };
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, messages),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{}[{}]", path, index), nested, messages);
                }
            }
        }
    }
}

/// Normalizes a requested fixture number, rejecting names that are blank once
/// the revision markers are stripped.
pub fn validate_fixture_name(raw: &str) -> PickListResult<String> {
    let normalized = Fixture::normalize_name(raw);

    if normalized.is_empty() {
        return Err(PickListError::validation(
            "fixture",
            "Fixture number is required",
        ));
    }

    Ok(normalized)
}
