use serde::{Deserialize, Serialize};
use std::env;
use validator::ValidationErrors;

const NECESSARY_ENV: &[&str] = &["S3_BUCKET_ACCESS_KEY", "S3_BUCKET_SECRET_KEY"];

pub fn check_for_necessary_env() -> std::io::Result<()> {
    for name in NECESSARY_ENV {
        if env::var(name).is_err() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} must be set", name),
            ));
        }
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ResponseMessage {
    pub message: String,
}

impl ResponseMessage {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let source = errors.field_errors();
    let mut fields: Vec<_> = source.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            return match err.message.as_ref() {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}", field),
            };
        }
    }
    "Invalid input".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn picks_the_message_of_the_first_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "title",
            ValidationError::new("length").with_message(Cow::from("Title is too short")),
        );
        errors.add("director", ValidationError::new("length"));
        assert_eq!(
            first_validation_message(&errors),
            "Invalid value for director"
        );
    }

    #[test]
    fn empty_report_has_a_generic_message() {
        assert_eq!(
            first_validation_message(&ValidationErrors::new()),
            "Invalid input"
        );
    }
}
