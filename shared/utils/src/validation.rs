use crate::error::{PacktallyError, PacktallyResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> PacktallyResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(PacktallyError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => format!("{field}: {message}"),
                (None, "length") => format!("Length validation failed for field '{field}'"),
                (None, "range") => format!("Value out of range for field '{field}'"),
                (None, code) => format!("Validation failed for field '{field}': {code}"),
            };
            messages.push(message);
        }
    }

    // Nested structs (e.g. `sheet` inside `AppConfig`) report under their own key.
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::Struct(inner) = kind {
            messages.push(format!("{field}.{}", format_validation_errors(inner)));
        }
    }

    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_nested_config_errors_are_reported() {
        let mut config = AppConfig::default();
        config.sheet.header_scan_rows = 100;

        let err = validate_model(&config).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("sheet.header_scan_rows"));
    }

    #[test]
    fn test_valid_model_passes() {
        assert!(validate_model(&AppConfig::default()).is_ok());
    }
}
