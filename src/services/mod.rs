//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod tokens;
mod user_service;

pub use tokens::{issue_action_token, verify_action_token, ActionClaims, TokenPurpose};
pub use user_service::{UserAdmin, UserService};
