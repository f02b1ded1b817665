//! # Honeybee
//!
//! Order intake for a small bakery: a public form captures a customer order,
//! stores it, and notifies both the customer and the business inbox.
//!
//! ## Features
//!
//! - **Submission Workflow**: validate, persist, compose, dispatch, redirect
//! - **Field-Level Errors**: rejected forms come back with the user's input
//! - **Independent Dispatch**: customer and business mail succeed or fail on their own
//! - **Escaped Templates**: HTML output is escaped by default, plaintext is not
//! - **Pluggable Storage**: SQLite by default (`sqlite` feature), in-memory on request
//! - **Pluggable Mail**: log transport for development, SendGrid behind `sendgrid`
//! - **Southern Sweets Club**: newsletter signup sharing the same dispatch path
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use honeybee::prelude::*;
//!
//! ServerBuilder::new()
//!     .with_config(AppConfig::from_env()?)
//!     .with_order_store(InMemoryOrderStore::new())
//!     .with_transport(LogTransport::new())
//!     .serve("0.0.0.0:8000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod notifications;
pub mod orders;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        DispatchFault, EventBus, FieldErrors, Fulfillment, HoneybeeError, NewOrder, Order,
        OrderForm, OrderStore, OrderValidator, StoreError, WorkflowEvent,
        validation::{ClubForm, ClubSignup},
    };

    // === Workflows ===
    pub use crate::orders::{
        AppState, ClubOutcome, ClubWorkflow, OrderWorkflow, SubmissionOutcome,
    };

    // === Notifications ===
    #[cfg(feature = "sendgrid")]
    pub use crate::notifications::SendGridTransport;
    pub use crate::notifications::{
        Composer, DispatchReport, Dispatcher, LogTransport, MailTransport, Message,
    };

    // === Storage ===
    pub use crate::storage::InMemoryOrderStore;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteOrderStore;

    // === Config ===
    pub use crate::config::{AppConfig, MailBackend, OrderDatabase};

    // === Server ===
    pub use crate::server::{Pages, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use uuid::Uuid;
}
