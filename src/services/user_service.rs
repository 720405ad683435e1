//! User service - the user-management use cases.
//!
//! Orchestrates structural validation, the self-edit rule pipeline,
//! persistence and job dispatch. The acting user's identity is an
//! explicit parameter on every operation that needs it, so tests can
//! supply arbitrary actor/target combinations.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::tokens::{issue_action_token, TokenPurpose};
use crate::config::{
    Config, EMAIL_SUBJECT_REGISTRATION, EMAIL_SUBJECT_VERIFICATION, MSG_EMAIL_TAKEN,
    MSG_NO_SELF_ACTIVATE_TOGGLE, MSG_NO_SELF_DELETE,
};
use crate::domain::{apply_self_edit_rules, User, UserForm};
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::infra::{CategoryRepository, UserRepository};
use crate::jobs::{EmailJob, JobDispatcher, UnsubscribeJob};
use crate::types::Paginated;

/// User service trait for dependency injection.
///
/// `actor_id` is the authenticated user performing the operation; the
/// self-modification guards compare it against the target id.
#[async_trait]
pub trait UserService: Send + Sync {
    /// One fixed-size listing page (1-indexed)
    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>>;

    /// Category alias -> title pairs for the account-type selection list
    async fn category_options(&self) -> AppResult<Vec<(String, String)>>;

    /// Validate and persist a new user; queues the set-password
    /// invitation email
    async fn create_user(&self, form: UserForm) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Validate (structural + self-edit rules) and persist changes;
    /// queues a verification email when the address changed
    async fn update_user(&self, actor_id: Uuid, id: Uuid, form: UserForm) -> AppResult<User>;

    /// Persist only the activated flag; acting on your own account is
    /// rejected outright
    async fn set_activated(&self, actor_id: Uuid, id: Uuid, activated: bool) -> AppResult<User>;

    /// Delete a user and queue the mailing-list unsubscription;
    /// self-deletion is rejected
    async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserAdmin {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    jobs: Arc<dyn JobDispatcher>,
    config: Config,
}

impl UserAdmin {
    /// Create new user service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        jobs: Arc<dyn JobDispatcher>,
        config: Config,
    ) -> Self {
        Self {
            users,
            categories,
            jobs,
            config,
        }
    }

    /// Queue the set-password invitation sent to newly created users.
    async fn send_set_password_invitation(&self, user: &User) -> AppResult<()> {
        let token =
            issue_action_token(&self.config, user.id, &user.email, TokenPurpose::SetPassword)?;
        let link = format!("{}/account/password/set?token={}", self.config.app_url, token);
        let body = format!(
            "Beste {},\n\nEr is een account voor je aangemaakt. \
             Stel je wachtwoord in via onderstaande link:\n\n{}\n",
            user.first_name, link
        );

        self.jobs
            .dispatch_email(EmailJob::new(&user.email, EMAIL_SUBJECT_REGISTRATION, body))
            .await
    }

    /// Queue the verification mail addressed to a changed email address.
    async fn send_email_verification(&self, user: &User) -> AppResult<()> {
        let token =
            issue_action_token(&self.config, user.id, &user.email, TokenPurpose::VerifyEmail)?;
        let link = format!("{}/account/email/verify?token={}", self.config.app_url, token);
        let body = format!(
            "Beste {},\n\nJe e-mailadres is gewijzigd. \
             Bevestig je nieuwe adres via onderstaande link:\n\n{}\n",
            user.first_name, link
        );

        self.jobs
            .dispatch_email(EmailJob::new(&user.email, EMAIL_SUBJECT_VERIFICATION, body))
            .await
    }
}

#[async_trait]
impl UserService for UserAdmin {
    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>> {
        let page = page.max(1);
        let (users, total) = self.users.paginate(page - 1).await?;
        Ok(Paginated::new(users, page, total))
    }

    async fn category_options(&self) -> AppResult<Vec<(String, String)>> {
        let categories = self.categories.list().await?;
        Ok(crate::domain::category_options(categories))
    }

    async fn create_user(&self, form: UserForm) -> AppResult<User> {
        let mut fields = FieldErrors::new();
        if let Err(errors) = form.validate() {
            fields.extend_from_validator(&errors);
        }

        // Email must be unique across users; only checked here, not on
        // update, since a record may keep its own address.
        if fields.field("email").is_none()
            && self.users.find_by_email(&form.email).await?.is_some()
        {
            fields.add("email", MSG_EMAIL_TAKEN);
        }

        if !fields.is_empty() {
            return Err(AppError::Validation(fields));
        }

        let user = self.users.create(form).await?;
        tracing::info!(user_id = %user.id, "User created");

        // The invitation doubles as the initial set-password flow
        self.send_set_password_invitation(&user).await?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn update_user(&self, actor_id: Uuid, id: Uuid, mut form: UserForm) -> AppResult<User> {
        let target = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        let mut fields = FieldErrors::new();
        if let Err(errors) = form.validate() {
            fields.extend_from_validator(&errors);
        }

        // Business rules run after structural validation; violations are
        // reported on the same response and revert the offending field.
        for violation in apply_self_edit_rules(actor_id, &target, &mut form) {
            tracing::debug!(rule = violation.rule, "Self-edit rule rejected");
            fields.add(violation.field, violation.message);
        }

        if !fields.is_empty() {
            return Err(AppError::Validation(fields));
        }

        let previous_email = target.email;
        let updated = self.users.update(id, form).await?;
        tracing::info!(user_id = %updated.id, "User updated");

        if updated.email != previous_email {
            self.send_email_verification(&updated).await?;
        }

        Ok(updated)
    }

    async fn set_activated(&self, actor_id: Uuid, id: Uuid, activated: bool) -> AppResult<User> {
        // Rejected outright, regardless of payload
        if actor_id == id {
            return Err(AppError::self_modification(MSG_NO_SELF_ACTIVATE_TOGGLE));
        }

        let user = self.users.set_activated(id, activated).await?;
        tracing::info!(user_id = %user.id, activated, "User activation changed");
        Ok(user)
    }

    async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> AppResult<()> {
        if actor_id == id {
            return Err(AppError::self_modification(MSG_NO_SELF_DELETE));
        }

        let user = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        // Fire-and-forget from the request's point of view: the queue
        // worker unsubscribes the address later.
        self.jobs
            .dispatch_unsubscribe(UnsubscribeJob::new(user.email))
            .await?;

        Ok(())
    }
}
