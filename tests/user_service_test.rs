//! User service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use user_admin_api::config::{
    Config, EMAIL_SUBJECT_REGISTRATION, EMAIL_SUBJECT_VERIFICATION, MSG_EMAIL_TAKEN,
    MSG_NO_SELF_ACCOUNT_TYPE_CHANGE, MSG_NO_SELF_DEACTIVATE,
};
use user_admin_api::domain::{User, UserForm};
use user_admin_api::errors::AppError;
use user_admin_api::infra::{MockCategoryRepository, MockUserRepository};
use user_admin_api::jobs::MockJobDispatcher;
use user_admin_api::services::{UserAdmin, UserService};

fn test_config() -> Config {
    std::env::set_var("JWT_SECRET", "test-secret-key-for-testing-only-32chars");
    Config::from_env()
}

fn stored_user(id: Uuid) -> User {
    User {
        id,
        first_name: "Jan".to_string(),
        name_prefix: None,
        last_name: "Jansen".to_string(),
        email: "j.jansen@hz.nl".to_string(),
        phone_number: None,
        address: "Edisonweg 4".to_string(),
        zip_code: "4382 NW".to_string(),
        city: "Vlissingen".to_string(),
        account_type: "student".to_string(),
        activated: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn valid_form() -> UserForm {
    UserForm {
        first_name: "Jan".to_string(),
        name_prefix: None,
        last_name: "Jansen".to_string(),
        email: "j.jansen@hz.nl".to_string(),
        phone_number: None,
        address: "Edisonweg 4".to_string(),
        zip_code: "4382 NW".to_string(),
        city: "Vlissingen".to_string(),
        account_type: "student".to_string(),
        activated: true,
    }
}

fn service(
    users: MockUserRepository,
    jobs: MockJobDispatcher,
) -> UserAdmin {
    UserAdmin::new(
        Arc::new(users),
        Arc::new(MockCategoryRepository::new()),
        Arc::new(jobs),
        test_config(),
    )
}

#[tokio::test]
async fn test_get_user_success() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(stored_user(id))));

    let service = service(users, MockJobDispatcher::new());
    let result = service.get_user(user_id).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = service(users, MockJobDispatcher::new());
    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_list_users_first_page_is_zero_indexed_in_storage() {
    let mut users = MockUserRepository::new();
    users
        .expect_paginate()
        .with(eq(0u64))
        .returning(|_| Ok((vec![stored_user(Uuid::new_v4())], 20)));

    let service = service(users, MockJobDispatcher::new());
    let page = service.list_users(1).await.unwrap();

    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.per_page, 15);
    assert_eq!(page.meta.total, 20);
    assert_eq!(page.meta.total_pages, 2);
}

#[tokio::test]
async fn test_list_users_clamps_page_zero_to_one() {
    let mut users = MockUserRepository::new();
    users
        .expect_paginate()
        .with(eq(0u64))
        .returning(|_| Ok((vec![], 0)));

    let service = service(users, MockJobDispatcher::new());
    let page = service.list_users(0).await.unwrap();

    assert_eq!(page.meta.page, 1);
}

#[tokio::test]
async fn test_create_user_queues_set_password_invitation() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_create().returning(|form| {
        let mut user = stored_user(Uuid::new_v4());
        user.email = form.email;
        Ok(user)
    });

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email()
        .times(1)
        .withf(|job| job.subject == EMAIL_SUBJECT_REGISTRATION && job.to == "j.jansen@hz.nl")
        .returning(|_| Ok(()));

    let service = service(users, jobs);
    let result = service.create_user(valid_form()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_user_rejects_non_hz_email() {
    let mut users = MockUserRepository::new();
    // Uniqueness is not even checked when the address is malformed
    users.expect_find_by_email().never();
    users.expect_create().never();

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email().never();

    let mut form = valid_form();
    form.email = "jan@gmail.com".to_string();

    let service = service(users, jobs);
    let err = service.create_user(form).await.unwrap_err();

    match err {
        AppError::Validation(fields) => {
            assert!(fields.field("email").is_some());
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_user_rejects_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("j.jansen@hz.nl"))
        .returning(|email| {
            let mut user = stored_user(Uuid::new_v4());
            user.email = email.to_string();
            Ok(Some(user))
        });
    users.expect_create().never();

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email().never();

    let service = service(users, jobs);
    let err = service.create_user(valid_form()).await.unwrap_err();

    match err {
        AppError::Validation(fields) => {
            assert_eq!(
                fields.field("email"),
                Some(&[MSG_EMAIL_TAKEN.to_string()][..])
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_user_collects_multiple_field_errors() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().never();
    users.expect_create().never();

    let mut form = valid_form();
    form.first_name = "J4n".to_string();
    form.email = "jan@gmail.com".to_string();
    form.zip_code = "4382 SS".to_string();

    let service = service(users, MockJobDispatcher::new());
    let err = service.create_user(form).await.unwrap_err();

    match err {
        AppError::Validation(fields) => {
            assert!(fields.field("first_name").is_some());
            assert!(fields.field("email").is_some());
            assert!(fields.field("zip_code").is_some());
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_rejects_self_deactivation_without_persisting() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(stored_user(id))));
    users.expect_update().never();

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email().never();

    let mut form = valid_form();
    form.activated = false;

    let service = service(users, jobs);
    let err = service.update_user(user_id, user_id, form).await.unwrap_err();

    match err {
        AppError::Validation(fields) => {
            assert_eq!(
                fields.field("activated"),
                Some(&[MSG_NO_SELF_DEACTIVATE.to_string()][..])
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_rejects_self_account_type_change() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(stored_user(id))));
    users.expect_update().never();

    let mut form = valid_form();
    form.account_type = "employee".to_string();

    let service = service(users, MockJobDispatcher::new());
    let err = service.update_user(user_id, user_id, form).await.unwrap_err();

    match err {
        AppError::Validation(fields) => {
            assert_eq!(
                fields.field("account_type"),
                Some(&[MSG_NO_SELF_ACCOUNT_TYPE_CHANGE.to_string()][..])
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_by_admin_can_deactivate_other_user() {
    let actor_id = Uuid::new_v4();
    let target_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(target_id))
        .returning(|id| Ok(Some(stored_user(id))));
    users.expect_update().times(1).returning(|id, form| {
        let mut user = stored_user(id);
        user.activated = form.activated;
        Ok(user)
    });

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email().never();

    let mut form = valid_form();
    form.activated = false;

    let service = service(users, jobs);
    let updated = service.update_user(actor_id, target_id, form).await.unwrap();

    assert!(!updated.activated);
}

#[tokio::test]
async fn test_update_with_changed_email_queues_one_verification_mail() {
    let actor_id = Uuid::new_v4();
    let target_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(stored_user(id))));
    users.expect_update().returning(|id, form| {
        let mut user = stored_user(id);
        user.email = form.email;
        Ok(user)
    });

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email()
        .times(1)
        .withf(|job| job.subject == EMAIL_SUBJECT_VERIFICATION && job.to == "nieuw@hz.nl")
        .returning(|_| Ok(()));

    let mut form = valid_form();
    form.email = "nieuw@hz.nl".to_string();

    let service = service(users, jobs);
    let result = service.update_user(actor_id, target_id, form).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_with_unchanged_email_sends_no_mail() {
    let actor_id = Uuid::new_v4();
    let target_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(stored_user(id))));
    users.expect_update().returning(|id, form| {
        let mut user = stored_user(id);
        user.email = form.email;
        Ok(user)
    });

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_email().never();

    let service = service(users, jobs);
    let result = service.update_user(actor_id, target_id, valid_form()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_activate_rejects_own_account_even_when_activating() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_set_activated().never();

    let service = service(users, MockJobDispatcher::new());
    let err = service.set_activated(user_id, user_id, true).await.unwrap_err();

    assert!(matches!(err, AppError::SelfModification(_)));
}

#[tokio::test]
async fn test_activate_other_user_persists_flag() {
    let actor_id = Uuid::new_v4();
    let target_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_set_activated()
        .with(eq(target_id), eq(false))
        .returning(|id, activated| {
            let mut user = stored_user(id);
            user.activated = activated;
            Ok(user)
        });

    let service = service(users, MockJobDispatcher::new());
    let user = service.set_activated(actor_id, target_id, false).await.unwrap();

    assert!(!user.activated);
}

#[tokio::test]
async fn test_delete_rejects_own_account_and_keeps_record() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_delete().never();

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_unsubscribe().never();

    let service = service(users, jobs);
    let err = service.delete_user(user_id, user_id).await.unwrap_err();

    assert!(matches!(err, AppError::SelfModification(_)));
}

#[tokio::test]
async fn test_delete_queues_unsubscription_for_deleted_address() {
    let actor_id = Uuid::new_v4();
    let target_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(target_id))
        .returning(|id| Ok(Some(stored_user(id))));
    users.expect_delete().with(eq(target_id)).returning(|_| Ok(()));

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_unsubscribe()
        .times(1)
        .withf(|job| job.email == "j.jansen@hz.nl")
        .returning(|_| Ok(()));

    let service = service(users, jobs);
    let result = service.delete_user(actor_id, target_id).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users.expect_delete().never();

    let mut jobs = MockJobDispatcher::new();
    jobs.expect_dispatch_unsubscribe().never();

    let service = service(users, jobs);
    let err = service
        .delete_user(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}
