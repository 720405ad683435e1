//! User administration API
//!
//! REST API for managing user accounts: paginated listing, creation with
//! a queued set-password invitation, updates with self-edit business
//! rules, activation toggling and deletion with a queued mailing-list
//! unsubscription.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities, validation and rules
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, mailing-list API)
//! - **jobs**: Background jobs (email, unsubscription)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Start the background worker
//! cargo run -- jobs work
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserForm};
pub use errors::{AppError, AppResult};
