//! Reusable field validators
//!
//! Every validator receives the field name and the already trimmed submitted
//! text, and answers with a human-readable message when the value is not
//! acceptable. Validators only check their own rule: an empty value passes
//! everything except [`required`].

use chrono::NaiveDate;
use validator::ValidateEmail;

/// Date formats accepted for date fields, tried in order
pub const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Validator: field must not be empty
pub fn required() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |_field: &str, value: &str| {
        if value.is_empty() {
            Err("This field is required.".to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: string must not exceed `max` characters
pub fn max_length(max: usize) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_field: &str, value: &str| {
        let len = value.chars().count();
        if len > max {
            Err(format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be a syntactically valid email address
pub fn email() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |_field: &str, value: &str| {
        if value.is_empty() || value.to_string().validate_email() {
            Ok(())
        } else {
            Err("Enter a valid email address.".to_string())
        }
    }
}

/// Validator: value must be one of the allowed codes
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |_field: &str, value: &str| {
        if value.is_empty() || allowed.contains(&value) {
            Ok(())
        } else {
            Err(format!(
                "Select a valid choice. {} is not one of the available choices.",
                value
            ))
        }
    }
}

/// Validator: value must parse as a calendar date
pub fn date() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |_field: &str, value: &str| {
        if value.is_empty() || parse_date(value).is_some() {
            Ok(())
        } else {
            Err("Enter a valid date.".to_string())
        }
    }
}

/// Parse a date in any of the [`DATE_INPUT_FORMATS`]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
