//! Southern Sweets Club signup validation

use super::FieldErrors;
use super::validators::{email, max_length, required};
use super::order::{EMAIL_MAX_LENGTH, NAME_MAX_LENGTH};
use serde::{Deserialize, Serialize};

/// Raw club signup fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubForm {
    pub name: String,
    pub email: String,
}

impl FromIterator<(String, String)> for ClubForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = ClubForm::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "email" => form.email = value,
                _ => {}
            }
        }
        form
    }
}

/// A validated club signup. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubSignup {
    pub name: String,
    pub email: String,
}

impl ClubSignup {
    /// Validate a signup form
    pub fn validate(form: &ClubForm) -> Result<Self, FieldErrors> {
        let name = form.name.trim();
        let email_address = form.email.trim();

        let mut errors = FieldErrors::new();
        errors.check("name", name, &[&required(), &max_length(NAME_MAX_LENGTH)]);
        errors.check(
            "email",
            email_address,
            &[&required(), &max_length(EMAIL_MAX_LENGTH), &email()],
        );

        errors.into_result(|| ClubSignup {
            name: name.to_string(),
            email: email_address.to_string(),
        })
    }
}
