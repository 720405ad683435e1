//! Job dispatch abstraction.
//!
//! Services enqueue work through this trait; the Postgres-backed
//! implementation shares its pool with the apalis worker started by the
//! `jobs work` command.

use async_trait::async_trait;

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;

use super::{EmailJob, UnsubscribeJob};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Queue producer used by the service layer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    /// Enqueue an outgoing email
    async fn dispatch_email(&self, job: EmailJob) -> AppResult<()>;

    /// Enqueue a mailing-list unsubscription for a deleted user
    async fn dispatch_unsubscribe(&self, job: UnsubscribeJob) -> AppResult<()>;
}

/// Postgres-backed queue producer (apalis storage).
#[derive(Clone)]
pub struct PostgresQueue {
    email: PostgresStorage<EmailJob>,
    unsubscribe: PostgresStorage<UnsubscribeJob>,
}

impl PostgresQueue {
    /// Connect to the queue database and ensure the apalis tables exist.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| AppError::internal(format!("Failed to connect to job storage: {}", e)))?;

        PostgresStorage::setup(&pool)
            .await
            .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

        Ok(Self {
            email: PostgresStorage::new(pool.clone()),
            unsubscribe: PostgresStorage::new(pool),
        })
    }

    /// Storage handle for the email worker.
    pub fn email_storage(&self) -> PostgresStorage<EmailJob> {
        self.email.clone()
    }

    /// Storage handle for the unsubscribe worker.
    pub fn unsubscribe_storage(&self) -> PostgresStorage<UnsubscribeJob> {
        self.unsubscribe.clone()
    }
}

#[async_trait]
impl JobDispatcher for PostgresQueue {
    async fn dispatch_email(&self, job: EmailJob) -> AppResult<()> {
        let mut storage = self.email.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue email job: {}", e)))?;
        Ok(())
    }

    async fn dispatch_unsubscribe(&self, job: UnsubscribeJob) -> AppResult<()> {
        let mut storage = self.unsubscribe.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue unsubscribe job: {}", e)))?;
        Ok(())
    }
}
