use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use voxrelay::application::ports::{ChatCompletionBackend, MediaFetcher};
use voxrelay::application::services::{
    AudioPipeline, CompletionService, CredentialCache, TranscriptionOrchestrator,
    AUDIO_FAILURE_REPLY,
};
use voxrelay::domain::{IncomingMessage, StageOutcome};
use voxrelay::infrastructure::clock::ManualClock;
use voxrelay::infrastructure::llm::MockChatBackend;
use voxrelay::infrastructure::media::MockMediaFetcher;
use voxrelay::infrastructure::secrets::MockSecretSource;
use voxrelay::infrastructure::staging::TempArtifactStager;
use voxrelay::infrastructure::storage::MockObjectUploader;
use voxrelay::infrastructure::transcription::MockTranscriptionBackend;

const MEDIA_SECRET: &str = "TwilioCredentials";
const MEDIA_SECRET_VALUE: &str = r#"{"accountSid": "AC123", "authToken": "tok456"}"#;

struct PipelineFixture {
    pipeline: AudioPipeline,
    fetcher: Arc<MockMediaFetcher>,
    completion_backend: Arc<MockChatBackend>,
}

fn build_pipeline(
    staging_dir: &Path,
    source: MockSecretSource,
    fetcher: MockMediaFetcher,
    uploader: MockObjectUploader,
    backend: MockTranscriptionBackend,
    completion_backend: MockChatBackend,
) -> PipelineFixture {
    let fetcher = Arc::new(fetcher);
    let completion_backend = Arc::new(completion_backend);

    let orchestrator = Arc::new(TranscriptionOrchestrator::new(
        Arc::new(backend),
        Arc::new(ManualClock::new()),
        "en-US".to_string(),
        "mp3".to_string(),
        Duration::from_secs(10),
        5,
    ));

    let completion = Arc::new(CompletionService::new(
        Arc::clone(&completion_backend) as Arc<dyn ChatCompletionBackend>,
        "gpt-3.5-turbo".to_string(),
        "You are a helpful assistant.".to_string(),
        0.7,
    ));

    let pipeline = AudioPipeline::new(
        Arc::new(CredentialCache::new(Arc::new(source))),
        Arc::clone(&fetcher) as Arc<dyn MediaFetcher>,
        Arc::new(TempArtifactStager::in_dir(staging_dir.to_path_buf())),
        Arc::new(uploader),
        orchestrator,
        completion,
        MEDIA_SECRET.to_string(),
        "accountSid".to_string(),
        "authToken".to_string(),
    );

    PipelineFixture {
        pipeline,
        fetcher,
        completion_backend,
    }
}

fn audio_message() -> IncomingMessage {
    IncomingMessage::new(
        "+1234567890".to_string(),
        String::new(),
        Some("https://media.example.com/recording.mp3".to_string()),
    )
}

fn staging_dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn given_all_stages_succeed_when_processing_then_reply_comes_from_completion_stage() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = build_pipeline(
        dir.path(),
        MockSecretSource::new().with_secret(MEDIA_SECRET, MEDIA_SECRET_VALUE),
        MockMediaFetcher::returning(b"fake audio bytes".to_vec()),
        MockObjectUploader::returning("mem://voxrelay-media/audio/a.mp3"),
        MockTranscriptionBackend::completing_with("order a pizza"),
        MockChatBackend::echoing(),
    );

    let outcome = fixture
        .pipeline
        .process(&audio_message(), "sk-test", &CancellationToken::new())
        .await;

    assert!(!outcome.degraded);
    // The reply is the completion output over the transcript, not the raw
    // transcript itself.
    assert_eq!(outcome.reply, "You said: order a pizza");
    assert!(outcome
        .trace
        .entries()
        .iter()
        .all(|e| e.outcome == StageOutcome::Ok));
    assert!(staging_dir_is_empty(dir.path()));
}

#[tokio::test]
async fn given_media_fetch_fails_when_processing_then_fixed_failure_reply_and_no_leaked_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = build_pipeline(
        dir.path(),
        MockSecretSource::new().with_secret(MEDIA_SECRET, MEDIA_SECRET_VALUE),
        MockMediaFetcher::failing("connection reset"),
        MockObjectUploader::returning("mem://voxrelay-media/audio/a.mp3"),
        MockTranscriptionBackend::completing_with("unused"),
        MockChatBackend::echoing(),
    );

    let outcome = fixture
        .pipeline
        .process(&audio_message(), "sk-test", &CancellationToken::new())
        .await;

    assert!(outcome.degraded);
    assert_eq!(outcome.reply, AUDIO_FAILURE_REPLY);
    assert_eq!(fixture.completion_backend.calls(), 0);
    assert!(staging_dir_is_empty(dir.path()));
}

#[tokio::test]
async fn given_upload_fails_when_processing_then_staged_artifact_is_still_released() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = build_pipeline(
        dir.path(),
        MockSecretSource::new().with_secret(MEDIA_SECRET, MEDIA_SECRET_VALUE),
        MockMediaFetcher::returning(b"fake audio bytes".to_vec()),
        MockObjectUploader::failing("bucket unavailable"),
        MockTranscriptionBackend::completing_with("unused"),
        MockChatBackend::echoing(),
    );

    let outcome = fixture
        .pipeline
        .process(&audio_message(), "sk-test", &CancellationToken::new())
        .await;

    assert!(outcome.degraded);
    assert_eq!(outcome.reply, AUDIO_FAILURE_REPLY);
    assert!(staging_dir_is_empty(dir.path()));
}

#[tokio::test]
async fn given_transcription_job_fails_when_processing_then_fixed_failure_reply() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = build_pipeline(
        dir.path(),
        MockSecretSource::new().with_secret(MEDIA_SECRET, MEDIA_SECRET_VALUE),
        MockMediaFetcher::returning(b"fake audio bytes".to_vec()),
        MockObjectUploader::returning("mem://voxrelay-media/audio/a.mp3"),
        MockTranscriptionBackend::with_polls(
            vec![voxrelay::application::ports::JobPoll {
                status: voxrelay::domain::TranscriptionJobStatus::Failed,
                failure_reason: Some("unsupported codec".to_string()),
                transcript_uri: None,
            }],
            "",
        ),
        MockChatBackend::echoing(),
    );

    let outcome = fixture
        .pipeline
        .process(&audio_message(), "sk-test", &CancellationToken::new())
        .await;

    assert!(outcome.degraded);
    assert_eq!(outcome.reply, AUDIO_FAILURE_REPLY);
    assert_eq!(fixture.completion_backend.calls(), 0);
    assert!(staging_dir_is_empty(dir.path()));
}

#[tokio::test]
async fn given_missing_media_credentials_when_processing_then_fetch_never_happens() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = build_pipeline(
        dir.path(),
        MockSecretSource::new(),
        MockMediaFetcher::returning(b"fake audio bytes".to_vec()),
        MockObjectUploader::returning("mem://voxrelay-media/audio/a.mp3"),
        MockTranscriptionBackend::completing_with("unused"),
        MockChatBackend::echoing(),
    );

    let outcome = fixture
        .pipeline
        .process(&audio_message(), "sk-test", &CancellationToken::new())
        .await;

    assert!(outcome.degraded);
    assert_eq!(outcome.reply, AUDIO_FAILURE_REPLY);
    assert_eq!(fixture.fetcher.calls(), 0);
}
