//! Validation of submitted forms
//!
//! Validators turn raw submitted text into typed payloads. A malformed
//! submission is a normal outcome: it yields a [`FieldErrors`] map keyed by
//! field name instead of an error type, so handlers can show the form again
//! with the user's input and a message next to each offending field.

pub mod club;
pub mod order;
pub mod validators;

pub use club::{ClubForm, ClubSignup};
pub use order::{OrderForm, OrderValidator};

use indexmap::IndexMap;
use serde::Serialize;

/// Field name to human-readable messages, in the order fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Run a list of validators over one field.
    ///
    /// Stops at the first failing validator so a missing value does not also
    /// report a format problem.
    pub fn check(
        &mut self,
        field: &str,
        value: &str,
        rules: &[&dyn Fn(&str, &str) -> Result<(), String>],
    ) {
        for rule in rules {
            if let Err(message) = rule(field, value) {
                self.add(field, message);
                return;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the given field has at least one message
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the offending fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Turn the collected messages into a result
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}
