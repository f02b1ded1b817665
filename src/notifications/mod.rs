//! Customer and business notifications
//!
//! - [`Composer`] renders messages from an order or a club signup (pure)
//! - [`Dispatcher`] sends them through a [`MailTransport`], bounded by a timeout,
//!   and reports each recipient's outcome on its own

pub mod composer;
pub mod dispatcher;
pub mod message;
#[cfg(feature = "sendgrid")]
pub mod sendgrid;
pub mod templates;
pub mod transport;

pub use composer::Composer;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use message::{ComposedMessages, Message};
#[cfg(feature = "sendgrid")]
pub use sendgrid::SendGridTransport;
pub use templates::{MessageTemplates, TemplateError};
pub use transport::{LogTransport, MailTransport};
