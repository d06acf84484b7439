use std::sync::Arc;
use std::time::Duration;

use voxrelay::application::ports::SecretError;
use voxrelay::application::services::CredentialCache;
use voxrelay::infrastructure::secrets::MockSecretSource;

#[tokio::test]
async fn given_two_concurrent_first_callers_when_getting_then_only_one_fetch_happens() {
    let source = Arc::new(
        MockSecretSource::new()
            .with_secret("ApiKey", "sekrit")
            .with_delay(Duration::from_millis(50)),
    );
    let cache = Arc::new(CredentialCache::new(source.clone()));

    let first = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get("ApiKey").await })
    };
    let second = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get("ApiKey").await })
    };

    let (first, second) = (first.await.unwrap(), second.await.unwrap());

    assert_eq!(first.unwrap(), "sekrit");
    assert_eq!(second.unwrap(), "sekrit");
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn given_cached_secret_when_getting_again_then_no_further_fetch() {
    let source = Arc::new(MockSecretSource::new().with_secret("ApiKey", "sekrit"));
    let cache = CredentialCache::new(source.clone());

    assert_eq!(cache.get("ApiKey").await.unwrap(), "sekrit");
    assert_eq!(cache.get("ApiKey").await.unwrap(), "sekrit");
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn given_failed_first_fetch_when_retrying_then_cache_is_not_poisoned() {
    let source = Arc::new(
        MockSecretSource::new()
            .with_secret("ApiKey", "sekrit")
            .failing_once("ApiKey"),
    );
    let cache = CredentialCache::new(source.clone());

    assert!(matches!(
        cache.get("ApiKey").await,
        Err(SecretError::Unavailable(_, _))
    ));
    assert_eq!(cache.get("ApiKey").await.unwrap(), "sekrit");
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn given_keyed_document_secret_when_getting_then_field_named_like_secret_is_unwrapped() {
    let source = Arc::new(
        MockSecretSource::new().with_secret("OpenAiApiKey", r#"{"OpenAiApiKey": "sk-test-123"}"#),
    );
    let cache = CredentialCache::new(source);

    assert_eq!(cache.get("OpenAiApiKey").await.unwrap(), "sk-test-123");
}

#[tokio::test]
async fn given_unstructured_secret_when_getting_then_value_is_returned_verbatim() {
    let source = Arc::new(MockSecretSource::new().with_secret("OpenAiApiKey", "sk-raw"));
    let cache = CredentialCache::new(source);

    assert_eq!(cache.get("OpenAiApiKey").await.unwrap(), "sk-raw");
}

#[tokio::test]
async fn given_credential_pair_secret_when_getting_fields_then_both_resolve() {
    let source = Arc::new(MockSecretSource::new().with_secret(
        "TwilioCredentials",
        r#"{"accountSid": "AC123", "authToken": "tok456"}"#,
    ));
    let cache = CredentialCache::new(source.clone());

    assert_eq!(
        cache
            .get_field("TwilioCredentials", "accountSid")
            .await
            .unwrap(),
        "AC123"
    );
    assert_eq!(
        cache
            .get_field("TwilioCredentials", "authToken")
            .await
            .unwrap(),
        "tok456"
    );
    // Both fields come from the one cached document.
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn given_missing_field_when_getting_field_then_missing_field_error() {
    let source =
        Arc::new(MockSecretSource::new().with_secret("TwilioCredentials", r#"{"accountSid": "AC123"}"#));
    let cache = CredentialCache::new(source);

    assert!(matches!(
        cache.get_field("TwilioCredentials", "authToken").await,
        Err(SecretError::MissingField(_, _))
    ));
}
