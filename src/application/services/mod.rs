mod audio_pipeline;
mod completion_service;
mod credential_cache;
mod transcription_orchestrator;

pub use audio_pipeline::{AudioPipeline, PipelineError, PipelineOutcome, AUDIO_FAILURE_REPLY};
pub use completion_service::{CompletionService, NO_PROMPT_REPLY, NO_RESPONSE_REPLY};
pub use credential_cache::CredentialCache;
pub use transcription_orchestrator::{TranscriptionError, TranscriptionOrchestrator};
