//! The order entity and its fulfillment choice

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How the customer receives an order.
///
/// Persisted as its single-letter code (`P` / `D`). Messages and pages must
/// go through [`Fulfillment::display_name`], never the raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fulfillment {
    #[serde(rename = "P")]
    PickUp,
    #[serde(rename = "D")]
    Delivery,
}

impl Fulfillment {
    /// All choices, in the order they are offered on the form
    pub const ALL: [Fulfillment; 2] = [Fulfillment::PickUp, Fulfillment::Delivery];

    /// Storage and form code
    pub fn code(&self) -> &'static str {
        match self {
            Fulfillment::PickUp => "P",
            Fulfillment::Delivery => "D",
        }
    }

    /// Human-readable label used in pages and notifications
    pub fn display_name(&self) -> &'static str {
        match self {
            Fulfillment::PickUp => "Pick-up",
            Fulfillment::Delivery => "Delivery",
        }
    }

    /// Parse a submitted code. Only the exact codes are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(Fulfillment::PickUp),
            "D" => Some(Fulfillment::Delivery),
            _ => None,
        }
    }
}

impl fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Fulfillment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown fulfillment code '{}'", s))
    }
}

/// A validated order that has not been stored yet.
///
/// Produced by the order validator; the store turns it into an [`Order`] by
/// assigning `id` and `created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub choice: Fulfillment,
    pub date_needed: NaiveDate,
    pub details: String,
}

/// A persisted bakery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub choice: Fulfillment,
    pub date_needed: NaiveDate,
    pub details: String,
    pub created: DateTime<Utc>,
}

impl Order {
    /// Build a stored order from a validated payload and store-generated fields
    pub fn from_new(new: NewOrder, id: Uuid, created: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            choice: new.choice,
            date_needed: new.date_needed,
            details: new.details,
            created,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order #{} — {}", self.id, self.name)
    }
}
