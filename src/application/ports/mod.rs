mod artifact_stager;
mod clock;
mod completion_backend;
mod media_fetcher;
mod object_uploader;
mod secret_source;
mod transcription_backend;

pub use artifact_stager::{ArtifactStager, ScopedArtifact, StagingError};
pub use clock::Clock;
pub use completion_backend::{ChatCompletionBackend, CompletionBackendError, CompletionRequest};
pub use media_fetcher::{FetchedMedia, MediaCredentials, MediaFetchError, MediaFetcher};
pub use object_uploader::{ObjectUploader, UploadError};
pub use secret_source::{SecretError, SecretSource};
pub use transcription_backend::{JobPoll, TranscriptionBackend, TranscriptionBackendError};
