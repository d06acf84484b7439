mod http_transcription_backend;
mod mock_transcription_backend;

pub use http_transcription_backend::HttpTranscriptionBackend;
pub use mock_transcription_backend::MockTranscriptionBackend;
