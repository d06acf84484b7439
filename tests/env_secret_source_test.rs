use voxrelay::application::ports::{SecretError, SecretSource};
use voxrelay::infrastructure::secrets::EnvSecretSource;

#[tokio::test]
async fn given_set_environment_variable_when_fetching_then_value_is_returned() {
    std::env::set_var("VOXRELAY_TEST_OPEN_AI_API_KEY", "sk-from-env");

    let source = EnvSecretSource::new("VOXRELAY_TEST_");
    let value = source.fetch_secret("OpenAiApiKey").await.unwrap();

    assert_eq!(value, "sk-from-env");
    std::env::remove_var("VOXRELAY_TEST_OPEN_AI_API_KEY");
}

#[tokio::test]
async fn given_unset_environment_variable_when_fetching_then_unavailable() {
    let source = EnvSecretSource::new("VOXRELAY_TEST_");
    let result = source.fetch_secret("NoSuchSecret").await;

    assert!(matches!(result, Err(SecretError::Unavailable(_, _))));
}
