//! Server module for building the order site
//!
//! `ServerBuilder` wires the configuration, order store and mail transport
//! into the workflows and exposes them through an axum router.

pub mod builder;
pub mod pages;
pub mod router;

pub use builder::ServerBuilder;
pub use pages::Pages;
pub use router::build_routes;
