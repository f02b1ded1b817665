//! Order intake and club signup flows, and their HTTP handlers

pub mod club;
pub mod handlers;
pub mod workflow;

pub use club::{ClubOutcome, ClubWorkflow};
pub use handlers::AppState;
pub use workflow::{OrderWorkflow, SubmissionOutcome};
