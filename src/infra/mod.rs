//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - The mailing-list API client

pub mod db;
pub mod newsletter;
pub mod repositories;

pub use db::{Database, Migrator};
pub use newsletter::{subscriber_hash, Interest, NewsletterApi, NewsletterClient};
pub use repositories::{CategoryRepository, CategoryStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use newsletter::MockNewsletterApi;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCategoryRepository, MockUserRepository};
