//! Unsubscribe job unit tests.

use mockall::predicate::eq;

use user_admin_api::config::Config;
use user_admin_api::infra::{subscriber_hash, Interest, MockNewsletterApi};
use user_admin_api::jobs::{run_unsubscribe, UnsubscribeJob};

fn newsletter_config() -> user_admin_api::config::NewsletterConfig {
    std::env::set_var("JWT_SECRET", "test-secret-key-for-testing-only-32chars");
    std::env::set_var("MAILCHIMP_LIST_ID", "abc123");
    std::env::set_var("MAILCHIMP_INTEREST_CATEGORY_ID", "cat456");
    Config::from_env().newsletter
}

fn interest(id: &str) -> Interest {
    Interest {
        id: id.to_string(),
        name: String::new(),
    }
}

#[tokio::test]
async fn test_unsubscribe_clears_every_interest_flag() {
    let config = newsletter_config();
    let job = UnsubscribeJob::new("verwijderd@hz.nl");

    let mut api = MockNewsletterApi::new();
    api.expect_interests()
        .with(eq("abc123"), eq("cat456"))
        .returning(|_, _| Ok(vec![interest("i1"), interest("i2"), interest("i3")]));
    api.expect_set_member_interests()
        .times(1)
        .withf(|list_id, hash, interests| {
            list_id == "abc123"
                && hash == "c693535631e739d0e060bd90173e54e7"
                && interests.len() == 3
                && interests.values().all(|enabled| !enabled)
        })
        .returning(|_, _, _| Ok(()));

    let result = run_unsubscribe(&job, &api, &config).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unsubscribe_with_no_interests_patches_nothing() {
    let config = newsletter_config();
    let job = UnsubscribeJob::new("verwijderd@hz.nl");

    let mut api = MockNewsletterApi::new();
    api.expect_interests().returning(|_, _| Ok(vec![]));
    api.expect_set_member_interests().never();

    let result = run_unsubscribe(&job, &api, &config).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unsubscribe_propagates_interest_fetch_failure() {
    let config = newsletter_config();
    let job = UnsubscribeJob::new("verwijderd@hz.nl");

    let mut api = MockNewsletterApi::new();
    api.expect_interests()
        .returning(|_, _| Err(user_admin_api::errors::AppError::internal("provider down")));
    api.expect_set_member_interests().never();

    let result = run_unsubscribe(&job, &api, &config).await;

    assert!(result.is_err());
}

#[test]
fn test_subscriber_hash_matches_provider_convention() {
    assert_eq!(
        subscriber_hash("J.Jansen@HZ.nl"),
        "a5c173c4cd0772b158bc2ae9f35fb68e"
    );
}
