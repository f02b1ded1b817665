//! Order form validation

use super::FieldErrors;
use super::validators::{date, email, in_list, max_length, parse_date, required};
use crate::core::order::{Fulfillment, NewOrder};
use serde::{Deserialize, Serialize};

/// Maximum lengths of the stored text columns
pub const NAME_MAX_LENGTH: usize = 100;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const PHONE_MAX_LENGTH: usize = 20;

const CHOICE_CODES: &[&str] = &["P", "D"];

/// Raw order form fields, exactly as submitted
///
/// Missing fields deserialize as empty strings so that an incomplete POST is
/// a validation outcome rather than an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub choice: String,
    pub date_needed: String,
    pub details: String,
}

impl FromIterator<(String, String)> for OrderForm {
    /// Build a form from decoded body pairs. A repeated field keeps its last
    /// value and unknown fields are ignored.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = OrderForm::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                "choice" => &mut form.choice,
                "date_needed" => &mut form.date_needed,
                "details" => &mut form.details,
                _ => continue,
            };
            *slot = value;
        }
        form
    }
}

/// Checks submitted order fields and builds a [`NewOrder`].
///
/// Only format and requiredness are checked. Far-future dates and other
/// business concerns are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a submission.
    ///
    /// Every field is checked, so the error map names every offending field
    /// at once. Accepted values are trimmed.
    pub fn validate(&self, form: &OrderForm) -> Result<NewOrder, FieldErrors> {
        let name = form.name.trim();
        let email_address = form.email.trim();
        let phone = form.phone.trim();
        let choice = form.choice.trim();
        let date_needed = form.date_needed.trim();
        let details = form.details.trim();

        let mut errors = FieldErrors::new();
        errors.check("name", name, &[&required(), &max_length(NAME_MAX_LENGTH)]);
        errors.check(
            "email",
            email_address,
            &[&required(), &max_length(EMAIL_MAX_LENGTH), &email()],
        );
        errors.check("phone", phone, &[&required(), &max_length(PHONE_MAX_LENGTH)]);
        errors.check("choice", choice, &[&required(), &in_list(CHOICE_CODES)]);
        errors.check("date_needed", date_needed, &[&required(), &date()]);
        errors.check("details", details, &[&required()]);

        match (Fulfillment::from_code(choice), parse_date(date_needed)) {
            (Some(choice), Some(date_needed)) if errors.is_empty() => Ok(NewOrder {
                name: name.to_string(),
                email: email_address.to_string(),
                phone: phone.to_string(),
                choice,
                date_needed,
                details: details.to_string(),
            }),
            _ => Err(errors),
        }
    }
}
