//! Core module containing the domain types and traits of the order service

pub mod error;
pub mod events;
pub mod order;
pub mod service;
pub mod validation;

pub use error::{ConfigError, DispatchFault, HoneybeeError, StoreError};
pub use events::{EventBus, Flow, Recipient, WorkflowEvent};
pub use order::{Fulfillment, NewOrder, Order};
pub use service::OrderStore;
pub use validation::{ClubForm, ClubSignup, FieldErrors, OrderForm, OrderValidator};
