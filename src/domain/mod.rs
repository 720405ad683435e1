//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns:
//! the user entity, submitted-form validation and the self-edit
//! business-rule pipeline.

pub mod category;
pub mod rules;
pub mod user;
pub mod validation;

pub use category::{category_options, UserCategory};
pub use rules::{apply_self_edit_rules, SelfEditRule, Violation};
pub use user::{ActivateForm, User, UserForm, UserResponse};
