//! Data models for the Converta marketing site and admin panel.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod blog;
mod lead;
mod service;
mod site_config;
mod snapshot;

pub use blog::*;
pub use lead::*;
pub use service::*;
pub use site_config::*;
pub use snapshot::*;
