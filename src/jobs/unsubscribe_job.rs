//! Mailing-list unsubscribe job.
//!
//! Queued once per successful user deletion. The worker clears every
//! interest flag of the deleted user's subscriber record; delivery is
//! at-least-once and retries are left to the queue backend's default
//! policy. The deleting request never observes the outcome.

use std::collections::HashMap;
use std::sync::Arc;

use apalis::prelude::Data;
use serde::{Deserialize, Serialize};

use crate::config::NewsletterConfig;
use crate::errors::AppError;
use crate::infra::newsletter::{subscriber_hash, NewsletterApi};

/// Payload of the user-deleted event as it travels through the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeJob {
    /// Email address of the deleted user
    pub email: String,
}

impl UnsubscribeJob {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Apalis entry point; the API client and list configuration are worker
/// data extensions.
pub async fn unsubscribe_job_handler(
    job: UnsubscribeJob,
    api: Data<Arc<dyn NewsletterApi>>,
    config: Data<NewsletterConfig>,
) -> Result<(), AppError> {
    run_unsubscribe(&job, api.as_ref(), &config).await
}

/// Clear all interest flags for the deleted user's subscriber record.
///
/// When the configured interest category has no interests the job exits
/// without touching the subscriber.
pub async fn run_unsubscribe(
    job: &UnsubscribeJob,
    api: &dyn NewsletterApi,
    config: &NewsletterConfig,
) -> Result<(), AppError> {
    let hash = subscriber_hash(&job.email);

    let interests = api
        .interests(&config.list_id, &config.interest_category_id)
        .await?;

    if interests.is_empty() {
        tracing::debug!(email = %job.email, "No interests configured, nothing to clear");
        return Ok(());
    }

    let cleared: HashMap<String, bool> = interests
        .into_iter()
        .map(|interest| (interest.id, false))
        .collect();

    api.set_member_interests(&config.list_id, &hash, cleared)
        .await?;

    tracing::info!(email = %job.email, "Subscriber interests cleared");
    Ok(())
}
