use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::ObjectStore;
use tokio::net::TcpListener;

use voxrelay::application::services::{
    AudioPipeline, CompletionService, CredentialCache, TranscriptionOrchestrator,
};
use voxrelay::infrastructure::clock::TokioClock;
use voxrelay::infrastructure::llm::OpenAiChatBackend;
use voxrelay::infrastructure::media::HttpMediaFetcher;
use voxrelay::infrastructure::observability::{init_tracing, TracingConfig};
use voxrelay::infrastructure::secrets::EnvSecretSource;
use voxrelay::infrastructure::staging::TempArtifactStager;
use voxrelay::infrastructure::storage::ObjectStoreUploader;
use voxrelay::infrastructure::transcription::HttpTranscriptionBackend;
use voxrelay::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(TracingConfig::default(), settings.server.port);

    let http_client = reqwest::Client::new();

    let credentials = Arc::new(CredentialCache::new(Arc::new(EnvSecretSource::new(
        "SECRET_",
    ))));

    let completion = Arc::new(CompletionService::new(
        Arc::new(OpenAiChatBackend::new(
            http_client.clone(),
            &settings.llm.endpoint,
        )),
        settings.llm.chat_model.clone(),
        settings.llm.system_prompt.clone(),
        settings.llm.temperature,
    ));

    let orchestrator = Arc::new(TranscriptionOrchestrator::new(
        Arc::new(HttpTranscriptionBackend::new(
            http_client.clone(),
            &settings.transcription.endpoint,
        )),
        Arc::new(TokioClock),
        settings.transcription.language_code.clone(),
        settings.transcription.media_format.clone(),
        Duration::from_secs(settings.transcription.poll_interval_secs),
        settings.transcription.max_attempts,
    ));

    let store = build_object_store(&settings.storage.bucket_uri)?;
    let uploader = Arc::new(ObjectStoreUploader::new(
        store,
        settings.storage.bucket_uri.clone(),
        settings.storage.key_prefix.clone(),
        settings.transcription.media_format.clone(),
    ));

    let audio_pipeline = Arc::new(AudioPipeline::new(
        Arc::clone(&credentials),
        Arc::new(HttpMediaFetcher::new(http_client)),
        Arc::new(TempArtifactStager::new()),
        uploader,
        orchestrator,
        Arc::clone(&completion),
        settings.secrets.media_credentials_name.clone(),
        settings.secrets.media_username_field.clone(),
        settings.secrets.media_password_field.clone(),
    ));

    let state = AppState {
        credentials,
        completion,
        audio_pipeline,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_object_store(bucket_uri: &str) -> anyhow::Result<Arc<dyn ObjectStore>> {
    if let Some(bucket) = bucket_uri.strip_prefix("s3://") {
        let s3 = AmazonS3Builder::from_env()
            .with_bucket_name(bucket.trim_matches('/'))
            .build()?;
        return Ok(Arc::new(s3));
    }
    let prefix = bucket_uri
        .strip_prefix("file://")
        .unwrap_or(bucket_uri)
        .to_string();
    std::fs::create_dir_all(&prefix)?;
    Ok(Arc::new(LocalFileSystem::new_with_prefix(prefix)?))
}
