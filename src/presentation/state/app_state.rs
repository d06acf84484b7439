use std::sync::Arc;

use crate::application::services::{AudioPipeline, CompletionService, CredentialCache};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialCache>,
    pub completion: Arc<CompletionService>,
    pub audio_pipeline: Arc<AudioPipeline>,
    pub settings: Settings,
}
