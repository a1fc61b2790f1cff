//! Demo Plan Module
//!
//! Describes what the demo does, independent of how it is executed.
//!
//! # Structure
//!
//! - [`model`]: `Step` and `Action`
//! - [`builder`]: ordered step lists derived from a `DemoConfig`
//! - [`payload`]: registration payloads and curl command building

pub mod builder;
pub mod model;
pub mod payload;

pub use builder::{health_steps, prerequisite_steps, startup_steps};
pub use model::{Action, Step};
pub use payload::{post_json_command, unique_email, RegistrationPayload};
